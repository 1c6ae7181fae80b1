pub mod budget;
pub mod budget_day;
pub mod expense;
pub mod income;
pub mod postgres_repository;
pub mod user;

use budget::BudgetRepository;
use budget_day::BudgetDayRepository;
use expense::ExpenseRepository;
use income::IncomeRepository;
use user::UserRepository;

/// Everything the budget services need from one unit of work.
pub trait LedgerStore: BudgetRepository + BudgetDayRepository + IncomeRepository + ExpenseRepository + UserRepository {}

impl<T> LedgerStore for T where T: BudgetRepository + BudgetDayRepository + IncomeRepository + ExpenseRepository + UserRepository + ?Sized {}
