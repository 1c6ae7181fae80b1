use crate::database::postgres_repository::PostgresTransaction;
use crate::error::app_error::AppError;
use crate::models::expense::{Expense, ExpenseRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait ExpenseRepository: Send {
    async fn create_expense(&mut self, budget_id: &Uuid, request: &ExpenseRequest) -> Result<Expense, AppError>;
    async fn update_expense(&mut self, expense: &Expense) -> Result<Expense, AppError>;
    async fn delete_expense(&mut self, id: &Uuid) -> Result<(), AppError>;
    async fn list_expenses(&mut self, budget_id: &Uuid) -> Result<Vec<Expense>, AppError>;
}

#[async_trait::async_trait]
impl ExpenseRepository for PostgresTransaction {
    async fn create_expense(&mut self, budget_id: &Uuid, request: &ExpenseRequest) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expense (budget_id, description, amount, expense_date, expense_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, budget_id, description, amount, expense_date, expense_type, created_at
            "#,
        )
        .bind(budget_id)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.expense_date)
        .bind(request.expense_type)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(expense)
    }

    async fn update_expense(&mut self, expense: &Expense) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expense
            SET description = $1, amount = $2, expense_date = $3, expense_type = $4
            WHERE id = $5 AND budget_id = $6
            RETURNING id, budget_id, description, amount, expense_date, expense_type, created_at
            "#,
        )
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.expense_date)
        .bind(expense.expense_type)
        .bind(expense.id)
        .bind(expense.budget_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(expense)
    }

    async fn delete_expense(&mut self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expense WHERE id = $1").bind(id).execute(&mut *self.tx).await?;
        Ok(())
    }

    async fn list_expenses(&mut self, budget_id: &Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, budget_id, description, amount, expense_date, expense_type, created_at
            FROM expense
            WHERE budget_id = $1
            ORDER BY expense_date, created_at
            "#,
        )
        .bind(budget_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(expenses)
    }
}
