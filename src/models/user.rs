use chrono::{DateTime, Utc};
use regex::Regex;
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationError};

static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid alphanumeric pattern"));

#[derive(Serialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration payload.
#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct UserRequest {
    #[validate(length(min = 4, max = 8), custom(function = "validate_alphanumeric"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20), custom(function = "validate_alphanumeric"))]
    pub password: String,
}

#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct UserUpdateRequest {
    pub id: Option<Uuid>,
    #[validate(length(min = 4, max = 8), custom(function = "validate_alphanumeric"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !ALPHANUMERIC.is_match(value) {
        return Err(ValidationError::new("must_be_alphanumeric"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str) -> UserRequest {
        UserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(registration("alice1", "alice@example.com", "secret123").validate().is_ok());
    }

    #[test]
    fn username_length_and_charset_are_enforced() {
        assert!(registration("abc", "a@example.com", "secret123").validate().is_err());
        assert!(registration("abcdefghi", "a@example.com", "secret123").validate().is_err());
        assert!(registration("ali_ce", "a@example.com", "secret123").validate().is_err());
    }

    #[test]
    fn password_must_be_alphanumeric_and_long_enough() {
        assert!(registration("alice", "a@example.com", "short1").validate().is_err());
        assert!(registration("alice", "a@example.com", "with space 1").validate().is_err());
    }

    #[test]
    fn email_format_is_checked() {
        let errors = registration("alice", "not-an-email", "secret123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
