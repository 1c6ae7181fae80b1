use crate::models::budget::Budget;
use chrono::NaiveDate;
use rocket::serde::Serialize;
use schemars::JsonSchema;
use uuid::Uuid;

/// Running balance of one calendar day of a budget.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BudgetDay {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub day_date: NaiveDate,
    pub amount: i64,
    pub description: String,
}

/// A day record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetDay {
    pub budget_id: Uuid,
    pub day_date: NaiveDate,
    pub amount: i64,
    pub description: String,
}

impl NewBudgetDay {
    /// A day opened at the budget's starting amount, before any income or expense applies.
    pub fn opening(budget: &Budget, day_date: NaiveDate) -> Self {
        Self {
            budget_id: budget.id,
            day_date,
            amount: budget.amount,
            description: day_description(day_date),
        }
    }
}

pub fn day_description(day_date: NaiveDate) -> String {
    format!("Balance on {}", day_date)
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct BudgetDayResponse {
    pub id: Uuid,
    pub day_date: NaiveDate,
    pub amount: i64,
    pub description: String,
}

impl From<&BudgetDay> for BudgetDayResponse {
    fn from(day: &BudgetDay) -> Self {
        Self {
            id: day.id,
            day_date: day.day_date,
            amount: day.amount,
            description: day.description.clone(),
        }
    }
}
