use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Local;
use serde_json::json;

use crate::auth::{AdminUser, AuthUser};
use crate::error::AppError;
use crate::handlers::extract::ValidatedJson;
use crate::models::{CreateRentalRequest, RentalDetails, UpdateRentalRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals).post(create_rental))
        .route("/customer/{customer_id}", get(list_customer_rentals))
        .route(
            "/{id}",
            get(get_rental).put(update_rental).delete(delete_rental),
        )
}

async fn list_rentals(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalDetails>>, AppError> {
    Ok(Json(state.rentals.list_all().await?))
}

async fn list_customer_rentals(
    user: AuthUser,
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<RentalDetails>>, AppError> {
    user.ensure_self_or_admin(customer_id)?;
    Ok(Json(state.rentals.list_for_customer(customer_id).await?))
}

async fn get_rental(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RentalDetails>, AppError> {
    Ok(Json(state.rentals.get(id).await?))
}

async fn create_rental(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRentalRequest>,
) -> Result<(StatusCode, Json<RentalDetails>), AppError> {
    let today = Local::now().date_naive();
    let rental = state
        .rentals
        .create(&user.requester(), &request, today)
        .await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

async fn update_rental(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRentalRequest>,
) -> Result<Json<RentalDetails>, AppError> {
    Ok(Json(state.rentals.update(id, &request).await?))
}

async fn delete_rental(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.rentals.delete(id).await?;
    Ok(Json(json!({ "message": "Rental deleted successfully" })))
}
