use crate::database::budget::BudgetRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::budget::Budget;
use crate::models::user::User;
use uuid::Uuid;

pub async fn require_user<S: UserRepository + ?Sized>(store: &mut S, user_id: &Uuid) -> Result<User, AppError> {
    store.get_user_by_id(user_id).await?.ok_or(AppError::UserNotFound)
}

/// Resolves a budget through its owner: the user must exist and own the budget.
pub async fn owned_budget<S: UserRepository + BudgetRepository + ?Sized>(store: &mut S, user_id: &Uuid, budget_id: &Uuid) -> Result<Budget, AppError> {
    require_user(store, user_id).await?;
    store
        .get_budget(user_id, budget_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
}

/// New resources get their id from the database.
pub fn ensure_no_id(id: Option<&Uuid>, resource: &str) -> Result<(), AppError> {
    match id {
        Some(_) => Err(AppError::IdConflict(format!("{} ID must be null", resource))),
        None => Ok(()),
    }
}

/// Updates name the resource twice, in the path and in the body; both must agree.
pub fn ensure_matching_id(id: Option<&Uuid>, path_id: &Uuid, resource: &str) -> Result<(), AppError> {
    match id {
        None => Err(AppError::IdConflict(format!("{} ID must not be null", resource))),
        Some(id) if id != path_id => Err(AppError::IdConflict(format!("{} ID {} does not match path ID {}", resource, id, path_id))),
        Some(_) => Ok(()),
    }
}
