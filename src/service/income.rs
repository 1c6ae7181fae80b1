use crate::database::LedgerStore;
use crate::error::app_error::AppError;
use crate::models::budget::Budget;
use crate::models::income::{Income, IncomeRequest};
use crate::service::ledger::LedgerEngine;
use crate::service::service_util::{ensure_matching_id, ensure_no_id, owned_budget};
use tracing::debug;
use uuid::Uuid;

/// Income bookkeeping scoped to one user's budget. Every mutation is followed
/// by a recalculation of the budget's day ledger.
pub struct IncomeService<'a, S: LedgerStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: LedgerStore + ?Sized> IncomeService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        IncomeService { store }
    }

    pub async fn create_income(&mut self, user_id: &Uuid, budget_id: &Uuid, request: &IncomeRequest) -> Result<Income, AppError> {
        ensure_no_id(request.id.as_ref(), "Income")?;
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        if !budget.covers(request.income_date) {
            return Err(AppError::InvalidEntryDate(request.income_date));
        }

        let income = self.store.create_income(&budget.id, request).await?;
        budget.incomes.push(income.clone());
        self.recalculate(&mut budget).await?;

        debug!(income_id = %income.id, budget_id = %budget.id, "income created");
        Ok(income)
    }

    pub async fn update_income(&mut self, user_id: &Uuid, budget_id: &Uuid, income_id: &Uuid, request: &IncomeRequest) -> Result<Income, AppError> {
        ensure_matching_id(request.id.as_ref(), income_id, "Income")?;
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, income_id)?;
        if !budget.covers(request.income_date) {
            return Err(AppError::InvalidEntryDate(request.income_date));
        }

        let mut income = budget.incomes[position].clone();
        income.description = request.description.clone();
        income.amount = request.amount;
        income.income_date = request.income_date;
        income.income_type = request.income_type;

        let income = self.store.update_income(&income).await?;
        budget.incomes[position] = income.clone();
        self.recalculate(&mut budget).await?;

        debug!(income_id = %income.id, budget_id = %budget.id, "income updated");
        Ok(income)
    }

    pub async fn delete_income(&mut self, user_id: &Uuid, budget_id: &Uuid, income_id: &Uuid) -> Result<(), AppError> {
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, income_id)?;

        self.store.delete_income(income_id).await?;
        budget.incomes.remove(position);
        self.recalculate(&mut budget).await?;

        debug!(income_id = %income_id, budget_id = %budget.id, "income deleted");
        Ok(())
    }

    pub async fn get_income(&mut self, user_id: &Uuid, budget_id: &Uuid, income_id: &Uuid) -> Result<Income, AppError> {
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, income_id)?;
        Ok(budget.incomes.swap_remove(position))
    }

    pub async fn list_incomes(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Vec<Income>, AppError> {
        Ok(owned_budget(&mut *self.store, user_id, budget_id).await?.incomes)
    }

    async fn recalculate(&mut self, budget: &mut Budget) -> Result<(), AppError> {
        LedgerEngine::new(&mut *self.store).calculate_budget(budget).await
    }
}

fn position_of(budget: &Budget, income_id: &Uuid) -> Result<usize, AppError> {
    budget
        .incomes
        .iter()
        .position(|income| income.id == *income_id)
        .ok_or_else(|| AppError::NotFound("Income not found".to_string()))
}
