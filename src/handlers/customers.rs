use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;

use crate::auth::{hash_password, AdminUser, AuthUser};
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::handlers::extract::ValidatedJson;
use crate::models::{CreateCustomerRequest, CustomerChanges, CustomerProfile, UpdateCustomerRequest};
use crate::repository::{check_unique_violation, is_foreign_key_violation};
use crate::service::AccountInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/username/{username}", get(get_customer_by_username))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Customer not found".to_string())
}

fn invalid_role() -> AppError {
    AppError::BadRequest("Invalid role ID".to_string())
}

async fn list_customers(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerProfile>>, AppError> {
    let customers = state.customers.find_all().await?;
    Ok(Json(customers.iter().map(|c| c.profile()).collect()))
}

async fn get_customer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerProfile>, AppError> {
    user.ensure_self_or_admin(id)?;
    let customer = state.customers.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(customer.profile()))
}

async fn get_customer_by_username(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<CustomerProfile>, AppError> {
    let customer = state
        .customers
        .find_by_username(&username)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(customer.profile()))
}

async fn create_customer(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerProfile>), AppError> {
    if state.roles.find_by_id(request.role_id).await?.is_none() {
        return Err(invalid_role());
    }

    let customer = state
        .auth
        .create_account(AccountInput {
            username: request.username,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            role_id: request.role_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(customer.profile())))
}

async fn update_customer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerProfile>, AppError> {
    user.ensure_self_or_admin(id)?;
    if request.changes_privileges() && !user.is_admin() {
        return Err(AppError::Forbidden("Only admin can change user roles".to_string()));
    }

    let existing = state.customers.find_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(username) = request.username.as_deref() {
        if username != existing.username && state.customers.exists_by_username(username).await? {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }
    }
    if let Some(role_id) = request.role_id {
        if state.roles.find_by_id(role_id).await?.is_none() {
            return Err(invalid_role());
        }
    }

    let password_hash = match request.password {
        Some(password) => Some(hash_password(password).await?),
        None => None,
    };

    let changes = CustomerChanges {
        first_name: request.first_name,
        last_name: request.last_name,
        username: request.username,
        password_hash,
        date_of_birth: request.date_of_birth,
        enabled: request.enabled,
        role_id: request.role_id,
    };

    let updated = state
        .customers
        .update(id, &changes)
        .await
        .map_err(|e| {
            if check_unique_violation(&e).is_some() {
                AppError::BadRequest("Username already exists".to_string())
            } else if is_foreign_key_violation(&e) {
                invalid_role()
            } else {
                e.into()
            }
        })?
        .ok_or_else(not_found)?;

    tracing::info!("{} Updated customer {} by {}", API_NAME, id, user.0.username);
    Ok(Json(updated.profile()))
}

async fn delete_customer(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.customers.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!("{} Deleted customer {}", API_NAME, id);
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
