use crate::database::postgres_repository::PostgresTransaction;
use crate::error::app_error::AppError;
use crate::models::budget_day::{BudgetDay, NewBudgetDay};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait BudgetDayRepository: Send {
    async fn create_budget_day(&mut self, day: &NewBudgetDay) -> Result<BudgetDay, AppError>;
    async fn update_budget_day(&mut self, day: &BudgetDay) -> Result<(), AppError>;
    async fn delete_budget_day(&mut self, id: &Uuid) -> Result<(), AppError>;
    async fn list_budget_days(&mut self, budget_id: &Uuid) -> Result<Vec<BudgetDay>, AppError>;
}

#[async_trait::async_trait]
impl BudgetDayRepository for PostgresTransaction {
    async fn create_budget_day(&mut self, day: &NewBudgetDay) -> Result<BudgetDay, AppError> {
        let budget_day = sqlx::query_as::<_, BudgetDay>(
            r#"
            INSERT INTO budget_day (budget_id, day_date, amount, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, budget_id, day_date, amount, description
            "#,
        )
        .bind(day.budget_id)
        .bind(day.day_date)
        .bind(day.amount)
        .bind(&day.description)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(budget_day)
    }

    async fn update_budget_day(&mut self, day: &BudgetDay) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE budget_day
            SET amount = $1, description = $2
            WHERE id = $3
            "#,
        )
        .bind(day.amount)
        .bind(&day.description)
        .bind(day.id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget day not found".to_string()));
        }
        Ok(())
    }

    async fn delete_budget_day(&mut self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM budget_day WHERE id = $1").bind(id).execute(&mut *self.tx).await?;
        Ok(())
    }

    async fn list_budget_days(&mut self, budget_id: &Uuid) -> Result<Vec<BudgetDay>, AppError> {
        let days = sqlx::query_as::<_, BudgetDay>(
            r#"
            SELECT id, budget_id, day_date, amount, description
            FROM budget_day
            WHERE budget_id = $1
            ORDER BY day_date
            "#,
        )
        .bind(budget_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(days)
    }
}
