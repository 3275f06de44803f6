use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::Role;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles))
        .route("/{id}", get(get_role))
}

async fn list_roles(_user: AuthUser, State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.roles.find_all().await?))
}

async fn get_role(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Role>, AppError> {
    state
        .roles
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
}
