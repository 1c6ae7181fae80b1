use crate::database::LedgerStore;
use crate::error::app_error::AppError;
use crate::models::budget::{Budget, BudgetRequest};
use crate::models::budget_day::BudgetDay;
use crate::service::ledger::{LedgerEngine, ReformatSummary};
use crate::service::service_util::{ensure_matching_id, ensure_no_id, owned_budget, require_user};
use tracing::info;
use uuid::Uuid;

pub struct BudgetService<'a, S: LedgerStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: LedgerStore + ?Sized> BudgetService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        BudgetService { store }
    }

    pub async fn create_budget(&mut self, user_id: &Uuid, request: &BudgetRequest) -> Result<Budget, AppError> {
        ensure_no_id(request.id.as_ref(), "Budget")?;
        if !request.has_valid_period() {
            return Err(AppError::InvalidDateRange);
        }
        require_user(&mut *self.store, user_id).await?;

        let mut budget = self.store.create_budget(user_id, request).await?;
        budget.budget_days = LedgerEngine::new(&mut *self.store).create_days(&budget).await?;

        info!(budget_id = %budget.id, user_id = %user_id, days = budget.budget_days.len(), "budget created");
        Ok(budget)
    }

    /// Applies the request to the stored budget. A changed period first evicts
    /// entries that fall outside it and reconciles the day ledger; the running
    /// balances are recalculated in every case.
    pub async fn update_budget(&mut self, user_id: &Uuid, budget_id: &Uuid, request: &BudgetRequest) -> Result<Budget, AppError> {
        ensure_matching_id(request.id.as_ref(), budget_id, "Budget")?;
        if !request.has_valid_period() {
            return Err(AppError::InvalidDateRange);
        }

        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let previous_period = budget.period();
        budget.apply(request);
        self.store.update_budget(&budget).await?;

        if budget.period() != previous_period {
            self.delete_entries_outside_range(&mut budget).await?;
            LedgerEngine::new(&mut *self.store).reformat_days(&mut budget).await?;
        }
        LedgerEngine::new(&mut *self.store).calculate_budget(&mut budget).await?;

        info!(budget_id = %budget.id, user_id = %user_id, "budget updated");
        Ok(budget)
    }

    pub async fn delete_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<(), AppError> {
        let budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        self.store.delete_budget(user_id, &budget.id).await?;

        info!(budget_id = %budget.id, user_id = %user_id, "budget deleted");
        Ok(())
    }

    pub async fn get_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Budget, AppError> {
        owned_budget(&mut *self.store, user_id, budget_id).await
    }

    pub async fn list_budgets(&mut self, user_id: &Uuid) -> Result<Vec<Budget>, AppError> {
        require_user(&mut *self.store, user_id).await?;
        self.store.list_budgets(user_id).await
    }

    pub async fn list_budget_days(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Vec<BudgetDay>, AppError> {
        Ok(owned_budget(&mut *self.store, user_id, budget_id).await?.budget_days)
    }

    /// Brings a budget's entries and day ledger back in line with its period
    /// and recalculates, whether or not anything was out of place.
    pub async fn rebuild_ledger(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<(Budget, ReformatSummary), AppError> {
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;

        let evicted = self.delete_entries_outside_range(&mut budget).await?;
        let summary = LedgerEngine::new(&mut *self.store).reformat_days(&mut budget).await?;
        LedgerEngine::new(&mut *self.store).calculate_budget(&mut budget).await?;

        info!(
            budget_id = %budget.id,
            evicted,
            removed = summary.removed,
            created = summary.created,
            "budget ledger rebuilt"
        );
        Ok((budget, summary))
    }

    /// Deletes the incomes and expenses dated outside the budget period and
    /// drops them from the budget. Returns how many entries were removed.
    pub async fn delete_entries_outside_range(&mut self, budget: &mut Budget) -> Result<usize, AppError> {
        let (incomes, stale_incomes): (Vec<_>, Vec<_>) = std::mem::take(&mut budget.incomes).into_iter().partition(|i| budget.covers(i.income_date));
        for income in &stale_incomes {
            self.store.delete_income(&income.id).await?;
        }
        budget.incomes = incomes;

        let (expenses, stale_expenses): (Vec<_>, Vec<_>) = std::mem::take(&mut budget.expenses).into_iter().partition(|e| budget.covers(e.expense_date));
        for expense in &stale_expenses {
            self.store.delete_expense(&expense.id).await?;
        }
        budget.expenses = expenses;

        let evicted = stale_incomes.len() + stale_expenses.len();
        if evicted > 0 {
            info!(budget_id = %budget.id, incomes = stale_incomes.len(), expenses = stale_expenses.len(), "removed entries outside budget period");
        }
        Ok(evicted)
    }
}
