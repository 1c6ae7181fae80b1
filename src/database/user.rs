use crate::database::postgres_repository::{PostgresTransaction, is_unique_violation, violated_constraint};
use crate::error::app_error::{AppError, ErrorCode, FieldConflict};
use crate::models::user::{User, UserRequest, UserUpdateRequest};
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHasher, SaltString};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait UserRepository: Send {
    async fn create_user(&mut self, request: &UserRequest) -> Result<User, AppError>;
    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError>;
    /// Whether another account already uses `username`; `except` excludes the caller's own row.
    async fn username_taken(&mut self, username: &str, except: Option<&Uuid>) -> Result<bool, AppError>;
    async fn email_taken(&mut self, email: &str, except: Option<&Uuid>) -> Result<bool, AppError>;
    async fn update_user(&mut self, id: &Uuid, request: &UserUpdateRequest) -> Result<User, AppError>;
    async fn delete_user(&mut self, id: &Uuid) -> Result<(), AppError>;
}

pub fn username_busy(username: &str) -> FieldConflict {
    FieldConflict {
        error_code: ErrorCode::UsernameBusy,
        message: format!("Username {} is already in use", username),
    }
}

pub fn email_busy(email: &str) -> FieldConflict {
    FieldConflict {
        error_code: ErrorCode::EmailBusy,
        message: format!("Email {} is already in use", email),
    }
}

/// Maps a unique violation that slipped past the service-level check.
fn conflict_error(err: sqlx::Error, username: &str, email: &str) -> AppError {
    if !is_unique_violation(&err) {
        return err.into();
    }

    let conflict = match violated_constraint(&err) {
        Some(constraint) if constraint.contains("email") => email_busy(email),
        _ => username_busy(username),
    };
    AppError::NotUniqueField(vec![conflict])
}

#[async_trait::async_trait]
impl UserRepository for PostgresTransaction {
    async fn create_user(&mut self, request: &UserRequest) -> Result<User, AppError> {
        let password_hash = password_hash(&request.password)?;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&password_hash)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| conflict_error(e, &request.username, &request.email))
    }

    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(user)
    }

    async fn username_taken(&mut self, username: &str, except: Option<&Uuid>) -> Result<bool, AppError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(username)
        .bind(except)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(taken)
    }

    async fn email_taken(&mut self, email: &str, except: Option<&Uuid>) -> Result<bool, AppError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(taken)
    }

    async fn update_user(&mut self, id: &Uuid, request: &UserUpdateRequest) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2
            WHERE id = $3
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| conflict_error(e, &request.username, &request.email))
    }

    async fn delete_user(&mut self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&mut *self.tx).await?;
        Ok(())
    }
}

pub(crate) fn password_hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::password_hash("Failed to hash password", e))?;

    Ok(hash.to_string())
}
