use crate::error::app_error::{ErrorBody, ErrorCode};
use rocket::serde::json::Json;
use rocket::{Request, catch};

fn body(error_code: ErrorCode, message: &str) -> Json<ErrorBody> {
    Json(ErrorBody {
        error_code,
        message: message.to_string(),
        errors: Vec::new(),
    })
}

#[catch(400)]
pub fn bad_request(_: &Request) -> Json<ErrorBody> {
    body(ErrorCode::ValidationError, "Bad request")
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<ErrorBody> {
    body(ErrorCode::NotFound, "Not found")
}

#[catch(422)]
pub fn unprocessable_entity(_: &Request) -> Json<ErrorBody> {
    body(ErrorCode::ValidationError, "Request body could not be parsed")
}

#[catch(500)]
pub fn internal_error(_: &Request) -> Json<ErrorBody> {
    body(ErrorCode::InternalServerError, "Internal server error")
}
