use crate::database::budget_day::BudgetDayRepository;
use crate::error::app_error::AppError;
use crate::models::budget::Budget;
use crate::models::budget_day::{BudgetDay, NewBudgetDay};
use crate::models::expense::Expense;
use crate::models::income::Income;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Outcome of reconciling a day ledger with a new budget period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReformatSummary {
    pub removed: usize,
    pub created: usize,
}

/// Builds and maintains the per-day running balance of a budget.
///
/// The engine borrows the day store for one unit of work; every day it
/// creates, updates or deletes goes through that store.
pub struct LedgerEngine<'a, S: BudgetDayRepository + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: BudgetDayRepository + ?Sized> LedgerEngine<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Creates one day per date of the budget period, each opened at the budget amount.
    pub async fn create_days(&mut self, budget: &Budget) -> Result<Vec<BudgetDay>, AppError> {
        let mut days = Vec::new();
        for day_date in budget_dates(budget.start_date, budget.end_date) {
            let day = self.store.create_budget_day(&NewBudgetDay::opening(budget, day_date)).await?;
            days.push(day);
        }
        sort_by_date(&mut days);

        debug!(budget_id = %budget.id, days = days.len(), "created budget days");
        Ok(days)
    }

    /// Recomputes the running balance of every day from the budget amount and
    /// the incomes and expenses dated on or before it.
    ///
    /// Every balance is computed before the first write, so a balance that
    /// does not fit in `i64` leaves the stored days untouched.
    pub async fn calculate_budget(&mut self, budget: &mut Budget) -> Result<(), AppError> {
        let deltas = daily_deltas(&budget.incomes, &budget.expenses)?;
        sort_by_date(&mut budget.budget_days);

        let mut balance = budget.amount;
        let mut balances = Vec::with_capacity(budget.budget_days.len());
        for day in &budget.budget_days {
            let delta = deltas.get(&day.day_date).copied().unwrap_or(0);
            balance = balance.checked_add(delta).ok_or(AppError::BalanceOverflow(day.day_date))?;
            balances.push(balance);
        }

        for (day, amount) in budget.budget_days.iter_mut().zip(balances) {
            day.amount = amount;
            self.store.update_budget_day(day).await?;
        }

        debug!(
            budget_id = %budget.id,
            days = budget.budget_days.len(),
            closing_balance = balance,
            "recalculated budget days"
        );
        Ok(())
    }

    /// Reconciles the day ledger with the current budget period. Days outside
    /// the period are deleted, missing dates are created at the budget amount,
    /// and retained days keep their balances until the next calculation.
    pub async fn reformat_days(&mut self, budget: &mut Budget) -> Result<ReformatSummary, AppError> {
        let (mut kept, dropped): (Vec<BudgetDay>, Vec<BudgetDay>) =
            std::mem::take(&mut budget.budget_days).into_iter().partition(|day| budget.covers(day.day_date));

        for day in &dropped {
            self.store.delete_budget_day(&day.id).await?;
        }

        let present: HashSet<NaiveDate> = kept.iter().map(|day| day.day_date).collect();
        let mut created = 0;
        for day_date in budget_dates(budget.start_date, budget.end_date) {
            if present.contains(&day_date) {
                continue;
            }
            kept.push(self.store.create_budget_day(&NewBudgetDay::opening(budget, day_date)).await?);
            created += 1;
        }

        sort_by_date(&mut kept);
        budget.budget_days = kept;

        let summary = ReformatSummary {
            removed: dropped.len(),
            created,
        };
        info!(
            budget_id = %budget.id,
            removed = summary.removed,
            created = summary.created,
            "reformatted budget days"
        );
        Ok(summary)
    }
}

/// Every date from `start` to `end`, both included.
pub fn budget_dates(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Net change per date: incomes add, expenses subtract.
pub fn daily_deltas(incomes: &[Income], expenses: &[Expense]) -> Result<HashMap<NaiveDate, i64>, AppError> {
    let mut deltas: HashMap<NaiveDate, i64> = HashMap::new();
    for income in incomes {
        let delta = deltas.entry(income.income_date).or_insert(0);
        *delta = delta.checked_add(income.amount).ok_or(AppError::BalanceOverflow(income.income_date))?;
    }
    for expense in expenses {
        let delta = deltas.entry(expense.expense_date).or_insert(0);
        *delta = delta.checked_sub(expense.amount).ok_or(AppError::BalanceOverflow(expense.expense_date))?;
    }
    Ok(deltas)
}

pub fn sort_by_date(days: &mut [BudgetDay]) {
    days.sort_by_key(|day| day.day_date);
}
