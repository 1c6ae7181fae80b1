pub mod budget;
pub mod budget_day;
pub mod expense;
pub mod health;
pub mod income;
pub mod user;
