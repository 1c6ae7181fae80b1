use chrono::{DateTime, NaiveDate, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseType {
    #[default]
    Groceries,
    Utilities,
    Rent,
    Mortgage,
    Transportation,
    Healthcare,
    Insurance,
    Entertainment,
    Education,
    Travel,
    DiningOut,
    Charity,
    PersonalCare,
    HomeRepairs,
    Subscriptions,
}

/// Money taken out of a budget on a specific date.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub description: Option<String>,
    pub amount: i64,
    pub expense_date: NaiveDate,
    pub expense_type: ExpenseType,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct ExpenseRequest {
    pub id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub amount: i64,
    pub expense_date: NaiveDate,
    pub expense_type: ExpenseType,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub description: Option<String>,
    pub amount: i64,
    pub expense_date: NaiveDate,
    pub expense_type: ExpenseType,
}

impl From<&Expense> for ExpenseResponse {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description.clone(),
            amount: expense.amount,
            expense_date: expense.expense_date,
            expense_type: expense.expense_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_type_round_trips_through_json() {
        let parsed: ExpenseType = serde_json::from_str("\"DINING_OUT\"").unwrap();
        assert_eq!(parsed, ExpenseType::DiningOut);
        assert_eq!(serde_json::to_string(&ExpenseType::HomeRepairs).unwrap(), "\"HOME_REPAIRS\"");
    }

    #[test]
    fn unknown_expense_type_is_rejected() {
        assert!(serde_json::from_str::<ExpenseType>("\"YACHTS\"").is_err());
    }
}
