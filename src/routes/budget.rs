use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::budget::{BudgetRequest, BudgetResponse};
use crate::models::budget_day::BudgetDayResponse;
use crate::models::health::MessageResponse;
use crate::routes::ApiBase;
use crate::service::budget::BudgetService;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

fn parse_ids(user_id: &str, budget_id: &str) -> Result<(Uuid, Uuid), AppError> {
    let user_id = Uuid::parse_str(user_id).map_err(|e| AppError::uuid("Invalid user id", e))?;
    let budget_id = Uuid::parse_str(budget_id).map_err(|e| AppError::uuid("Invalid budget id", e))?;
    Ok((user_id, budget_id))
}

/// Create a budget and its day ledger
#[openapi(tag = "Budgets")]
#[post("/<user_id>/budgets", data = "<payload>")]
pub async fn create_budget(
    pool: &State<PgPool>,
    base: &State<ApiBase>,
    user_id: &str,
    payload: JsonBody<BudgetRequest>,
) -> Result<Created<Json<BudgetResponse>>, AppError> {
    payload.validate()?;
    let user_id = Uuid::parse_str(user_id).map_err(|e| AppError::uuid("Invalid user id", e))?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let budget = BudgetService::new(&mut tx).create_budget(&user_id, &payload).await?;
    tx.commit().await?;

    let location = base.location(&format!("/users/{}/budgets/{}", user_id, budget.id));
    Ok(Created::new(location).body(Json(BudgetResponse::from(&budget))))
}

#[openapi(tag = "Budgets")]
#[get("/<user_id>/budgets")]
pub async fn list_budgets(pool: &State<PgPool>, user_id: &str) -> Result<Json<Vec<BudgetResponse>>, AppError> {
    let user_id = Uuid::parse_str(user_id).map_err(|e| AppError::uuid("Invalid user id", e))?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let budgets = BudgetService::new(&mut tx).list_budgets(&user_id).await?;
    tx.commit().await?;

    Ok(Json(budgets.iter().map(BudgetResponse::from).collect()))
}

#[openapi(tag = "Budgets")]
#[get("/<user_id>/budgets/<budget_id>")]
pub async fn get_budget(pool: &State<PgPool>, user_id: &str, budget_id: &str) -> Result<Json<BudgetResponse>, AppError> {
    let (user_id, budget_id) = parse_ids(user_id, budget_id)?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let budget = BudgetService::new(&mut tx).get_budget(&user_id, &budget_id).await?;
    tx.commit().await?;

    Ok(Json(BudgetResponse::from(&budget)))
}

/// Update a budget; a new period reformats the day ledger
#[openapi(tag = "Budgets")]
#[put("/<user_id>/budgets/<budget_id>", data = "<payload>")]
pub async fn put_budget(pool: &State<PgPool>, user_id: &str, budget_id: &str, payload: JsonBody<BudgetRequest>) -> Result<Json<BudgetResponse>, AppError> {
    payload.validate()?;
    let (user_id, budget_id) = parse_ids(user_id, budget_id)?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let budget = BudgetService::new(&mut tx).update_budget(&user_id, &budget_id, &payload).await?;
    tx.commit().await?;

    Ok(Json(BudgetResponse::from(&budget)))
}

#[openapi(tag = "Budgets")]
#[delete("/<user_id>/budgets/<budget_id>")]
pub async fn delete_budget(pool: &State<PgPool>, user_id: &str, budget_id: &str) -> Result<Json<MessageResponse>, AppError> {
    let (user_id, budget_id) = parse_ids(user_id, budget_id)?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    BudgetService::new(&mut tx).delete_budget(&user_id, &budget_id).await?;
    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: format!("Resource /users/{}/budgets/{} was deleted", user_id, budget_id),
    }))
}

/// Running balance of every day of the budget
#[openapi(tag = "Budgets")]
#[get("/<user_id>/budgets/<budget_id>/days")]
pub async fn list_budget_days(pool: &State<PgPool>, user_id: &str, budget_id: &str) -> Result<Json<Vec<BudgetDayResponse>>, AppError> {
    let (user_id, budget_id) = parse_ids(user_id, budget_id)?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let days = BudgetService::new(&mut tx).list_budget_days(&user_id, &budget_id).await?;
    tx.commit().await?;

    Ok(Json(days.iter().map(BudgetDayResponse::from).collect()))
}

/// Rebuild the day ledger from the stored budget, incomes and expenses
#[openapi(tag = "Budgets")]
#[post("/<user_id>/budgets/<budget_id>/recalculate")]
pub async fn recalculate_budget(pool: &State<PgPool>, user_id: &str, budget_id: &str) -> Result<Json<BudgetResponse>, AppError> {
    let (user_id, budget_id) = parse_ids(user_id, budget_id)?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let mut tx = repo.begin().await?;
    let (budget, _) = BudgetService::new(&mut tx).rebuild_ledger(&user_id, &budget_id).await?;
    tx.commit().await?;

    Ok(Json(BudgetResponse::from(&budget)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![
        create_budget,
        list_budgets,
        get_budget,
        put_budget,
        delete_budget,
        list_budget_days,
        recalculate_budget
    ]
}
