use crate::database::postgres_repository::PostgresTransaction;
use crate::error::app_error::AppError;
use crate::models::income::{Income, IncomeRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait IncomeRepository: Send {
    async fn create_income(&mut self, budget_id: &Uuid, request: &IncomeRequest) -> Result<Income, AppError>;
    async fn update_income(&mut self, income: &Income) -> Result<Income, AppError>;
    async fn delete_income(&mut self, id: &Uuid) -> Result<(), AppError>;
    async fn list_incomes(&mut self, budget_id: &Uuid) -> Result<Vec<Income>, AppError>;
}

#[async_trait::async_trait]
impl IncomeRepository for PostgresTransaction {
    async fn create_income(&mut self, budget_id: &Uuid, request: &IncomeRequest) -> Result<Income, AppError> {
        let income = sqlx::query_as::<_, Income>(
            r#"
            INSERT INTO income (budget_id, description, amount, income_date, income_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, budget_id, description, amount, income_date, income_type, created_at
            "#,
        )
        .bind(budget_id)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.income_date)
        .bind(request.income_type)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(income)
    }

    async fn update_income(&mut self, income: &Income) -> Result<Income, AppError> {
        let income = sqlx::query_as::<_, Income>(
            r#"
            UPDATE income
            SET description = $1, amount = $2, income_date = $3, income_type = $4
            WHERE id = $5 AND budget_id = $6
            RETURNING id, budget_id, description, amount, income_date, income_type, created_at
            "#,
        )
        .bind(&income.description)
        .bind(income.amount)
        .bind(income.income_date)
        .bind(income.income_type)
        .bind(income.id)
        .bind(income.budget_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(income)
    }

    async fn delete_income(&mut self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM income WHERE id = $1").bind(id).execute(&mut *self.tx).await?;
        Ok(())
    }

    async fn list_incomes(&mut self, budget_id: &Uuid) -> Result<Vec<Income>, AppError> {
        let incomes = sqlx::query_as::<_, Income>(
            r#"
            SELECT id, budget_id, description, amount, income_date, income_type, created_at
            FROM income
            WHERE budget_id = $1
            ORDER BY income_date, created_at
            "#,
        )
        .bind(budget_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(incomes)
    }
}
