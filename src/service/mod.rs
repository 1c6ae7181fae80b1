pub mod budget;
pub mod expense;
pub mod income;
pub mod ledger;
pub mod service_util;
pub mod user;
