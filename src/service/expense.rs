use crate::database::LedgerStore;
use crate::error::app_error::AppError;
use crate::models::budget::Budget;
use crate::models::expense::{Expense, ExpenseRequest};
use crate::service::ledger::LedgerEngine;
use crate::service::service_util::{ensure_matching_id, ensure_no_id, owned_budget};
use tracing::debug;
use uuid::Uuid;

pub struct ExpenseService<'a, S: LedgerStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: LedgerStore + ?Sized> ExpenseService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        ExpenseService { store }
    }

    pub async fn create_expense(&mut self, user_id: &Uuid, budget_id: &Uuid, request: &ExpenseRequest) -> Result<Expense, AppError> {
        ensure_no_id(request.id.as_ref(), "Expense")?;
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        if !budget.covers(request.expense_date) {
            return Err(AppError::InvalidEntryDate(request.expense_date));
        }

        let expense = self.store.create_expense(&budget.id, request).await?;
        budget.expenses.push(expense.clone());
        LedgerEngine::new(&mut *self.store).calculate_budget(&mut budget).await?;

        debug!(expense_id = %expense.id, budget_id = %budget.id, "expense created");
        Ok(expense)
    }

    pub async fn update_expense(&mut self, user_id: &Uuid, budget_id: &Uuid, expense_id: &Uuid, request: &ExpenseRequest) -> Result<Expense, AppError> {
        ensure_matching_id(request.id.as_ref(), expense_id, "Expense")?;
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, expense_id)?;
        if !budget.covers(request.expense_date) {
            return Err(AppError::InvalidEntryDate(request.expense_date));
        }

        let mut expense = budget.expenses[position].clone();
        expense.description = request.description.clone();
        expense.amount = request.amount;
        expense.expense_date = request.expense_date;
        expense.expense_type = request.expense_type;

        let expense = self.store.update_expense(&expense).await?;
        budget.expenses[position] = expense.clone();
        LedgerEngine::new(&mut *self.store).calculate_budget(&mut budget).await?;

        debug!(expense_id = %expense.id, budget_id = %budget.id, "expense updated");
        Ok(expense)
    }

    pub async fn delete_expense(&mut self, user_id: &Uuid, budget_id: &Uuid, expense_id: &Uuid) -> Result<(), AppError> {
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, expense_id)?;

        self.store.delete_expense(expense_id).await?;
        budget.expenses.remove(position);
        LedgerEngine::new(&mut *self.store).calculate_budget(&mut budget).await?;

        debug!(expense_id = %expense_id, budget_id = %budget.id, "expense deleted");
        Ok(())
    }

    pub async fn get_expense(&mut self, user_id: &Uuid, budget_id: &Uuid, expense_id: &Uuid) -> Result<Expense, AppError> {
        let mut budget = owned_budget(&mut *self.store, user_id, budget_id).await?;
        let position = position_of(&budget, expense_id)?;
        Ok(budget.expenses.swap_remove(position))
    }

    pub async fn list_expenses(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Vec<Expense>, AppError> {
        Ok(owned_budget(&mut *self.store, user_id, budget_id).await?.expenses)
    }
}

fn position_of(budget: &Budget, expense_id: &Uuid) -> Result<usize, AppError> {
    budget
        .expenses
        .iter()
        .position(|expense| expense.id == *expense_id)
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
}
