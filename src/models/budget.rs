use crate::models::budget_day::{BudgetDay, BudgetDayResponse};
use crate::models::expense::{Expense, ExpenseResponse};
use crate::models::income::{Income, IncomeResponse};
use chrono::{DateTime, NaiveDate, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A starting amount planned over an inclusive date range.
///
/// The budget owns its incomes, expenses and day ledger by value; each child
/// only refers back through `budget_id`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub budget_days: Vec<BudgetDay>,
}

impl Budget {
    /// Whether `date` lies inside the budget period, both ends included.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn period(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date)
    }

    pub fn apply(&mut self, request: &BudgetRequest) {
        self.name = request.name.clone();
        self.amount = request.amount;
        self.start_date = request.start_date;
        self.end_date = request.end_date;
        self.description = request.description.clone();
    }
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct BudgetRequest {
    /// Must be absent on create and equal to the path id on update.
    pub id: Option<Uuid>,
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 0))]
    pub amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

impl BudgetRequest {
    pub fn has_valid_period(&self) -> bool {
        self.end_date >= self.start_date
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct BudgetResponse {
    pub id: Uuid,
    pub name: String,
    pub amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub incomes: Vec<IncomeResponse>,
    pub expenses: Vec<ExpenseResponse>,
    pub budget_days: Vec<BudgetDayResponse>,
}

impl From<&Budget> for BudgetResponse {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id,
            name: budget.name.clone(),
            amount: budget.amount,
            start_date: budget.start_date,
            end_date: budget.end_date,
            description: budget.description.clone(),
            incomes: budget.incomes.iter().map(IncomeResponse::from).collect(),
            expenses: budget.expenses.iter().map(ExpenseResponse::from).collect(),
            budget_days: budget.budget_days.iter().map(BudgetDayResponse::from).collect(),
        }
    }
}
