use chrono::NaiveDate;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use rocket_okapi::OpenApiError;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use schemars::JsonSchema;
use serde::Serialize;
use std::io::Cursor;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Machine readable error category carried in every error payload.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InternalServerError,
    UsernameBusy,
    EmailBusy,
    ValidationError,
    NotFound,
}

/// One user field that collides with an existing account.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FieldConflict {
    pub error_code: ErrorCode,
    pub message: String,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct ErrorBody {
    pub error_code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldConflict>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error")]
    Db {
        message: String,
        #[source]
        source: sqlx::error::Error,
    },
    #[error("Internal server error")]
    Migration {
        message: String,
        #[source]
        source: sqlx::migrate::MigrateError,
    },
    #[error("User not found")]
    UserNotFound,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    IdConflict(String),
    #[error("Incorrect budget period: end date is before start date")]
    InvalidDateRange,
    #[error("The date {0} is not included in the budget period")]
    InvalidEntryDate(NaiveDate),
    #[error("The balance on {0} is out of range")]
    BalanceOverflow(NaiveDate),
    #[error("Not unique fields")]
    NotUniqueField(Vec<FieldConflict>),
    #[error("Internal server error")]
    PasswordHash { message: String },
    #[error("{message}")]
    UuidError {
        message: String,
        #[source]
        source: uuid::Error,
    },
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error("Internal server error")]
    ConfigurationError {
        message: String,
        #[source]
        source: figment::Error,
    },
}

impl AppError {
    pub fn db(message: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            message: message.into(),
            source,
        }
    }

    pub fn uuid(message: impl Into<String>, source: uuid::Error) -> Self {
        Self::UuidError {
            message: message.into(),
            source,
        }
    }

    pub fn password_hash(message: impl Into<String>, source: password_hash::Error) -> Self {
        Self::PasswordHash {
            message: format!("{}: {}", message.into(), source),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::UserNotFound | AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::IdConflict(_)
            | AppError::InvalidDateRange
            | AppError::InvalidEntryDate(_)
            | AppError::BalanceOverflow(_)
            | AppError::UuidError { .. }
            | AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::NotUniqueField(conflicts) => conflicts.first().map(|c| c.error_code).unwrap_or(ErrorCode::ValidationError),
            AppError::Db { .. } | AppError::Migration { .. } | AppError::PasswordHash { .. } | AppError::ConfigurationError { .. } => {
                ErrorCode::InternalServerError
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        let errors = match self {
            AppError::NotUniqueField(conflicts) => conflicts.clone(),
            _ => Vec::new(),
        };

        ErrorBody {
            error_code: self.error_code(),
            message: self.to_string(),
            errors,
        }
    }
}

impl From<password_hash::Error> for AppError {
    fn from(e: password_hash::Error) -> Self {
        AppError::password_hash("Password hashing failed", e)
    }
}

impl From<uuid::Error> for AppError {
    fn from(e: uuid::Error) -> Self {
        AppError::uuid("Invalid UUID", e)
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::UserNotFound => Status::NotFound,
            AppError::NotFound(_) => Status::NotFound,
            AppError::IdConflict(_) => Status::BadRequest,
            AppError::InvalidDateRange => Status::BadRequest,
            AppError::InvalidEntryDate(_) => Status::BadRequest,
            AppError::BalanceOverflow(_) => Status::BadRequest,
            AppError::NotUniqueField(_) => Status::Conflict,
            AppError::PasswordHash { .. } => Status::InternalServerError,
            AppError::Db { .. } => Status::InternalServerError,
            AppError::Migration { .. } => Status::InternalServerError,
            AppError::UuidError { .. } => Status::BadRequest,
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::ConfigurationError { .. } => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        error!(
            error = ?self,
            request_id = %request_id,
            method = %method,
            uri = %uri,
            "request failed"
        );

        let status = Status::from(&self);
        let body = serde_json::to_string(&self.body()).unwrap_or_else(|_| self.to_string());

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> Result<Responses, OpenApiError> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "Bad Request: identity conflict, invalid dates, balance out of range or invalid payload"),
            ("404", "Not Found: user, budget, income or expense does not exist"),
            ("409", "Conflict: username or email already in use"),
            ("500", "Internal Server Error"),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::ConfigurationError {
            message: "Failed to read configuration".to_string(),
            source: e,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::db("Database error", e),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migration {
            message: "Failed to apply migrations".to_string(),
            source: e,
        }
    }
}
