use crate::database::postgres_repository::PostgresRepository;
use crate::models::health::HealthResponse;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;
use sqlx::PgPool;
use tracing::warn;

/// Liveness probe; also reports whether the database answers.
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck(pool: &State<PgPool>) -> Json<HealthResponse> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let database = match repo.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!(error = ?e, "database health check failed");
            "unavailable"
        }
    };

    Json(HealthResponse { status: "ok", database })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}
