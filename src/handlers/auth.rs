use axum::{extract::State, http::StatusCode, response::Json, routing::{get, post}, Router};
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::handlers::extract::ValidatedJson;
use crate::models::{LoginRequest, RegisterRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/validate", get(validate))
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let customer = state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": {
                "id": customer.id,
                "username": customer.username,
                "firstName": customer.first_name,
                "lastName": customer.last_name
            }
        })),
    ))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (token, customer) = state.auth.login(request).await?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": customer.profile()
    })))
}

async fn validate(user: AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Token is valid",
        "user": user.0.profile()
    }))
}
