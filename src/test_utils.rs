use crate::database::budget::{BudgetKey, BudgetRepository};
use crate::database::budget_day::BudgetDayRepository;
use crate::database::expense::ExpenseRepository;
use crate::database::income::IncomeRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::budget::{Budget, BudgetRequest};
use crate::models::budget_day::{BudgetDay, NewBudgetDay};
use crate::models::expense::{Expense, ExpenseRequest, ExpenseType};
use crate::models::income::{Income, IncomeRequest, IncomeType};
use crate::models::user::{User, UserRequest, UserUpdateRequest};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn budget_request(amount: i64, start_date: NaiveDate, end_date: NaiveDate) -> BudgetRequest {
    BudgetRequest {
        id: None,
        name: "Groceries".to_string(),
        amount,
        start_date,
        end_date,
        description: None,
    }
}

pub fn income_request(amount: i64, income_date: NaiveDate) -> IncomeRequest {
    IncomeRequest {
        id: None,
        description: None,
        amount,
        income_date,
        income_type: IncomeType::Salary,
    }
}

pub fn expense_request(amount: i64, expense_date: NaiveDate) -> ExpenseRequest {
    ExpenseRequest {
        id: None,
        description: None,
        amount,
        expense_date,
        expense_type: ExpenseType::Groceries,
    }
}

/// Builds a budget in memory without touching any store.
pub fn budget(amount: i64, start_date: NaiveDate, end_date: NaiveDate) -> Budget {
    Budget {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Groceries".to_string(),
        amount,
        start_date,
        end_date,
        created_at: Utc::now(),
        ..Budget::default()
    }
}

pub fn income(budget: &Budget, amount: i64, income_date: NaiveDate) -> Income {
    Income {
        id: Uuid::new_v4(),
        budget_id: budget.id,
        amount,
        income_date,
        ..Income::default()
    }
}

pub fn expense(budget: &Budget, amount: i64, expense_date: NaiveDate) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        budget_id: budget.id,
        amount,
        expense_date,
        ..Expense::default()
    }
}

/// In-memory stand-in for a Postgres unit of work. Budget rows are stored
/// without children; reads assemble them the way the SQL joins would.
#[derive(Default)]
pub struct MockRepository {
    pub users: HashMap<Uuid, User>,
    pub budgets: HashMap<Uuid, Budget>,
    pub incomes: HashMap<Uuid, Income>,
    pub expenses: HashMap<Uuid, Expense>,
    pub days: HashMap<Uuid, BudgetDay>,
    pub day_creates: usize,
    pub day_updates: usize,
    pub day_deletes: usize,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&mut self, username: &str) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "mock-hash".to_string(),
            created_at: Utc::now(),
        };
        let id = user.id;
        self.users.insert(id, user);
        id
    }

    pub fn reset_counters(&mut self) {
        self.day_creates = 0;
        self.day_updates = 0;
        self.day_deletes = 0;
    }

    pub fn days_of(&self, budget_id: &Uuid) -> Vec<BudgetDay> {
        let mut days: Vec<BudgetDay> = self.days.values().filter(|d| d.budget_id == *budget_id).cloned().collect();
        days.sort_by_key(|d| d.day_date);
        days
    }

    fn assemble(&self, row: &Budget) -> Budget {
        let mut budget = row.clone();

        budget.incomes = self.incomes.values().filter(|i| i.budget_id == row.id).cloned().collect();
        budget.incomes.sort_by_key(|i| i.income_date);
        budget.expenses = self.expenses.values().filter(|e| e.budget_id == row.id).cloned().collect();
        budget.expenses.sort_by_key(|e| e.expense_date);
        budget.budget_days = self.days_of(&row.id);

        budget
    }
}

#[async_trait::async_trait]
impl BudgetDayRepository for MockRepository {
    async fn create_budget_day(&mut self, day: &NewBudgetDay) -> Result<BudgetDay, AppError> {
        let budget_day = BudgetDay {
            id: Uuid::new_v4(),
            budget_id: day.budget_id,
            day_date: day.day_date,
            amount: day.amount,
            description: day.description.clone(),
        };
        self.days.insert(budget_day.id, budget_day.clone());
        self.day_creates += 1;
        Ok(budget_day)
    }

    async fn update_budget_day(&mut self, day: &BudgetDay) -> Result<(), AppError> {
        let stored = self
            .days
            .get_mut(&day.id)
            .ok_or_else(|| AppError::NotFound("Budget day not found".to_string()))?;
        *stored = day.clone();
        self.day_updates += 1;
        Ok(())
    }

    async fn delete_budget_day(&mut self, id: &Uuid) -> Result<(), AppError> {
        self.days.remove(id);
        self.day_deletes += 1;
        Ok(())
    }

    async fn list_budget_days(&mut self, budget_id: &Uuid) -> Result<Vec<BudgetDay>, AppError> {
        Ok(self.days_of(budget_id))
    }
}

#[async_trait::async_trait]
impl BudgetRepository for MockRepository {
    async fn create_budget(&mut self, user_id: &Uuid, request: &BudgetRequest) -> Result<Budget, AppError> {
        let mut budget = Budget {
            id: Uuid::new_v4(),
            user_id: *user_id,
            created_at: Utc::now(),
            ..Budget::default()
        };
        budget.apply(request);
        self.budgets.insert(budget.id, budget.clone());
        Ok(budget)
    }

    async fn get_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<Option<Budget>, AppError> {
        Ok(self.budgets.get(budget_id).filter(|b| b.user_id == *user_id).map(|row| self.assemble(row)))
    }

    async fn list_budgets(&mut self, user_id: &Uuid) -> Result<Vec<Budget>, AppError> {
        let mut budgets: Vec<Budget> = self.budgets.values().filter(|b| b.user_id == *user_id).map(|row| self.assemble(row)).collect();
        budgets.sort_by_key(|b| b.start_date);
        Ok(budgets)
    }

    async fn update_budget(&mut self, budget: &Budget) -> Result<(), AppError> {
        let row = Budget {
            incomes: Vec::new(),
            expenses: Vec::new(),
            budget_days: Vec::new(),
            ..budget.clone()
        };
        self.budgets.insert(budget.id, row);
        Ok(())
    }

    async fn delete_budget(&mut self, user_id: &Uuid, budget_id: &Uuid) -> Result<(), AppError> {
        if self.budgets.get(budget_id).is_some_and(|b| b.user_id == *user_id) {
            self.budgets.remove(budget_id);
            self.incomes.retain(|_, i| i.budget_id != *budget_id);
            self.expenses.retain(|_, e| e.budget_id != *budget_id);
            self.days.retain(|_, d| d.budget_id != *budget_id);
        }
        Ok(())
    }

    async fn list_budget_keys(&mut self) -> Result<Vec<BudgetKey>, AppError> {
        Ok(self
            .budgets
            .values()
            .map(|b| BudgetKey {
                budget_id: b.id,
                user_id: b.user_id,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl IncomeRepository for MockRepository {
    async fn create_income(&mut self, budget_id: &Uuid, request: &IncomeRequest) -> Result<Income, AppError> {
        let income = Income {
            id: Uuid::new_v4(),
            budget_id: *budget_id,
            description: request.description.clone(),
            amount: request.amount,
            income_date: request.income_date,
            income_type: request.income_type,
            created_at: Utc::now(),
        };
        self.incomes.insert(income.id, income.clone());
        Ok(income)
    }

    async fn update_income(&mut self, income: &Income) -> Result<Income, AppError> {
        self.incomes.insert(income.id, income.clone());
        Ok(income.clone())
    }

    async fn delete_income(&mut self, id: &Uuid) -> Result<(), AppError> {
        self.incomes.remove(id);
        Ok(())
    }

    async fn list_incomes(&mut self, budget_id: &Uuid) -> Result<Vec<Income>, AppError> {
        let mut incomes: Vec<Income> = self.incomes.values().filter(|i| i.budget_id == *budget_id).cloned().collect();
        incomes.sort_by_key(|i| i.income_date);
        Ok(incomes)
    }
}

#[async_trait::async_trait]
impl ExpenseRepository for MockRepository {
    async fn create_expense(&mut self, budget_id: &Uuid, request: &ExpenseRequest) -> Result<Expense, AppError> {
        let expense = Expense {
            id: Uuid::new_v4(),
            budget_id: *budget_id,
            description: request.description.clone(),
            amount: request.amount,
            expense_date: request.expense_date,
            expense_type: request.expense_type,
            created_at: Utc::now(),
        };
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn update_expense(&mut self, expense: &Expense) -> Result<Expense, AppError> {
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense.clone())
    }

    async fn delete_expense(&mut self, id: &Uuid) -> Result<(), AppError> {
        self.expenses.remove(id);
        Ok(())
    }

    async fn list_expenses(&mut self, budget_id: &Uuid) -> Result<Vec<Expense>, AppError> {
        let mut expenses: Vec<Expense> = self.expenses.values().filter(|e| e.budget_id == *budget_id).cloned().collect();
        expenses.sort_by_key(|e| e.expense_date);
        Ok(expenses)
    }
}

#[async_trait::async_trait]
impl UserRepository for MockRepository {
    async fn create_user(&mut self, request: &UserRequest) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            username: request.username.clone(),
            email: request.email.clone(),
            password_hash: format!("mock-hash:{}", request.password.len()),
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).cloned())
    }

    async fn username_taken(&mut self, username: &str, except: Option<&Uuid>) -> Result<bool, AppError> {
        Ok(self.users.values().any(|u| u.username == username && Some(&u.id) != except))
    }

    async fn email_taken(&mut self, email: &str, except: Option<&Uuid>) -> Result<bool, AppError> {
        Ok(self.users.values().any(|u| u.email == email && Some(&u.id) != except))
    }

    async fn update_user(&mut self, id: &Uuid, request: &UserUpdateRequest) -> Result<User, AppError> {
        let user = self.users.get_mut(id).ok_or(AppError::UserNotFound)?;
        user.username = request.username.clone();
        user.email = request.email.clone();
        Ok(user.clone())
    }

    async fn delete_user(&mut self, id: &Uuid) -> Result<(), AppError> {
        self.users.remove(id);
        let owned: Vec<Uuid> = self.budgets.values().filter(|b| b.user_id == *id).map(|b| b.id).collect();
        for budget_id in owned {
            self.delete_budget(id, &budget_id).await?;
        }
        Ok(())
    }
}
