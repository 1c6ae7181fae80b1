use crate::database::budget_day::BudgetDayRepository;
use crate::database::expense::ExpenseRepository;
use crate::database::income::IncomeRepository;
use crate::database::postgres_repository::PostgresTransaction;
use crate::error::app_error::AppError;
use crate::models::budget::{Budget, BudgetRequest};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Identifies a budget together with its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct BudgetKey {
    pub budget_id: Uuid,
    pub user_id: Uuid,
}

#[async_trait::async_trait]
pub trait BudgetRepository: Send {
    async fn create_budget(&mut self, user_id: &Uuid, request: &BudgetRequest) -> Result<Budget, AppError>;
    /// Loads the budget with its incomes, expenses and days, each ordered by date.
    async fn get_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Option<Budget>, AppError>;
    async fn list_budgets(&mut self, user_id: &Uuid) -> Result<Vec<Budget>, AppError>;
    async fn update_budget(&mut self, budget: &Budget) -> Result<(), AppError>;
    async fn delete_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<(), AppError>;
    async fn list_budget_keys(&mut self) -> Result<Vec<BudgetKey>, AppError>;
}

#[derive(sqlx::FromRow)]
struct BudgetRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    amount: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BudgetRow> for Budget {
    fn from(row: BudgetRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            amount: row.amount,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
            created_at: row.created_at,
            incomes: Vec::new(),
            expenses: Vec::new(),
            budget_days: Vec::new(),
        }
    }
}

impl PostgresTransaction {
    async fn populate(&mut self, mut budget: Budget) -> Result<Budget, AppError> {
        budget.incomes = self.list_incomes(&budget.id).await?;
        budget.expenses = self.list_expenses(&budget.id).await?;
        budget.budget_days = self.list_budget_days(&budget.id).await?;
        Ok(budget)
    }
}

#[async_trait::async_trait]
impl BudgetRepository for PostgresTransaction {
    async fn create_budget(&mut self, user_id: &Uuid, request: &BudgetRequest) -> Result<Budget, AppError> {
        let row = sqlx::query_as::<_, BudgetRow>(
            r#"
            INSERT INTO budget (user_id, name, amount, start_date, end_date, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, amount, start_date, end_date, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(request.amount)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.description)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row.into())
    }

    async fn get_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Option<Budget>, AppError> {
        let row = sqlx::query_as::<_, BudgetRow>(
            r#"
            SELECT id, user_id, name, amount, start_date, end_date, description, created_at
            FROM budget
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(budget_id)
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(Some(self.populate(row.into()).await?)),
            None => Ok(None),
        }
    }

    async fn list_budgets(&mut self, user_id: &Uuid) -> Result<Vec<Budget>, AppError> {
        let rows = sqlx::query_as::<_, BudgetRow>(
            r#"
            SELECT id, user_id, name, amount, start_date, end_date, description, created_at
            FROM budget
            WHERE user_id = $1
            ORDER BY start_date, created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut budgets = Vec::with_capacity(rows.len());
        for row in rows {
            budgets.push(self.populate(row.into()).await?);
        }

        Ok(budgets)
    }

    async fn update_budget(&mut self, budget: &Budget) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE budget
            SET name = $1, amount = $2, start_date = $3, end_date = $4, description = $5
            WHERE id = $6 AND user_id = $7
            "#,
        )
        .bind(&budget.name)
        .bind(budget.amount)
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(&budget.description)
        .bind(budget.id)
        .bind(budget.user_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn delete_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM budget WHERE id = $1 AND user_id = $2")
            .bind(budget_id)
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn list_budget_keys(&mut self) -> Result<Vec<BudgetKey>, AppError> {
        let keys = sqlx::query_as::<_, BudgetKey>("SELECT id AS budget_id, user_id FROM budget ORDER BY created_at")
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(keys)
    }
}
