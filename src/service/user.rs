use crate::database::user::{UserRepository, email_busy, username_busy};
use crate::error::app_error::{AppError, FieldConflict};
use crate::models::user::{User, UserRequest, UserUpdateRequest};
use crate::service::service_util::{ensure_matching_id, require_user};
use tracing::info;
use uuid::Uuid;

pub struct UserService<'a, S: UserRepository + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: UserRepository + ?Sized> UserService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        UserService { store }
    }

    pub async fn register(&mut self, request: &UserRequest) -> Result<User, AppError> {
        let conflicts = self.conflicts(&request.username, &request.email, None).await?;
        if !conflicts.is_empty() {
            return Err(AppError::NotUniqueField(conflicts));
        }

        let user = self.store.create_user(request).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    pub async fn get_user(&mut self, user_id: &Uuid) -> Result<User, AppError> {
        require_user(&mut *self.store, user_id).await
    }

    pub async fn update_user(&mut self, user_id: &Uuid, request: &UserUpdateRequest) -> Result<User, AppError> {
        ensure_matching_id(request.id.as_ref(), user_id, "User")?;
        require_user(&mut *self.store, user_id).await?;

        let conflicts = self.conflicts(&request.username, &request.email, Some(user_id)).await?;
        if !conflicts.is_empty() {
            return Err(AppError::NotUniqueField(conflicts));
        }

        self.store.update_user(user_id, request).await
    }

    pub async fn delete_user(&mut self, user_id: &Uuid) -> Result<(), AppError> {
        require_user(&mut *self.store, user_id).await?;
        self.store.delete_user(user_id).await?;

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }

    async fn conflicts(&mut self, username: &str, email: &str, except: Option<&Uuid>) -> Result<Vec<FieldConflict>, AppError> {
        let mut conflicts = Vec::new();
        if self.store.username_taken(username, except).await? {
            conflicts.push(username_busy(username));
        }
        if self.store.email_taken(email, except).await? {
            conflicts.push(email_busy(email));
        }
        Ok(conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::app_error::ErrorCode;
    use crate::test_utils::MockRepository;

    fn registration(username: &str, email: &str) -> UserRequest {
        UserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_the_user() {
        let mut store = MockRepository::new();
        let user = UserService::new(&mut store).register(&registration("alice", "alice@example.com")).await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(store.users.contains_key(&user.id));
    }

    #[tokio::test]
    async fn register_reports_every_busy_field() {
        let mut store = MockRepository::new();
        store.seed_user("alice");

        let err = UserService::new(&mut store)
            .register(&registration("alice", "alice@example.com"))
            .await
            .unwrap_err();

        match err {
            AppError::NotUniqueField(conflicts) => {
                let codes: Vec<ErrorCode> = conflicts.iter().map(|c| c.error_code).collect();
                assert_eq!(codes, vec![ErrorCode::UsernameBusy, ErrorCode::EmailBusy]);
                assert_eq!(conflicts[0].message, "Username alice is already in use");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_may_keep_own_username() {
        let mut store = MockRepository::new();
        let user_id = store.seed_user("alice");

        let request = UserUpdateRequest {
            id: Some(user_id),
            username: "alice".to_string(),
            email: "new@example.com".to_string(),
        };
        let user = UserService::new(&mut store).update_user(&user_id, &request).await.unwrap();
        assert_eq!(user.email, "new@example.com");
    }

    #[tokio::test]
    async fn update_cannot_take_another_users_email() {
        let mut store = MockRepository::new();
        let user_id = store.seed_user("alice");
        store.seed_user("bob");

        let request = UserUpdateRequest {
            id: Some(user_id),
            username: "alice".to_string(),
            email: "bob@example.com".to_string(),
        };
        let result = UserService::new(&mut store).update_user(&user_id, &request).await;
        assert!(matches!(result, Err(AppError::NotUniqueField(c)) if c.len() == 1));
    }

    #[tokio::test]
    async fn missing_user_is_reported() {
        let mut store = MockRepository::new();
        let result = UserService::new(&mut store).get_user(&Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn delete_user_removes_owned_budgets() {
        use crate::service::budget::BudgetService;
        use crate::test_utils::{budget_request, date};

        let mut store = MockRepository::new();
        let user_id = store.seed_user("alice");
        BudgetService::new(&mut store)
            .create_budget(&user_id, &budget_request(10, date(2024, 1, 1), date(2024, 1, 2)))
            .await
            .unwrap();

        UserService::new(&mut store).delete_user(&user_id).await.unwrap();
        assert!(store.users.is_empty());
        assert!(store.budgets.is_empty());
        assert!(store.days.is_empty());
    }
}
