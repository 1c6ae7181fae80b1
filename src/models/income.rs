use chrono::{DateTime, NaiveDate, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeType {
    #[default]
    Salary,
    Investments,
    BusinessIncome,
    RentalIncome,
    Commission,
    Dividends,
    Gifts,
    LotteryWinnings,
    Royalties,
    Interest,
    Bonus,
    Grants,
    Refunds,
    Awards,
    Alimony,
}

/// Money added to a budget on a specific date.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Income {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub description: Option<String>,
    pub amount: i64,
    pub income_date: NaiveDate,
    pub income_type: IncomeType,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct IncomeRequest {
    pub id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub amount: i64,
    pub income_date: NaiveDate,
    pub income_type: IncomeType,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct IncomeResponse {
    pub id: Uuid,
    pub description: Option<String>,
    pub amount: i64,
    pub income_date: NaiveDate,
    pub income_type: IncomeType,
}

impl From<&Income> for IncomeResponse {
    fn from(income: &Income) -> Self {
        Self {
            id: income.id,
            description: income.description.clone(),
            amount: income.amount,
            income_date: income.income_date,
            income_type: income.income_type,
        }
    }
}
