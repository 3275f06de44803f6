use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{Datelike, Local};
use serde_json::json;

use crate::auth::{AdminUser, AuthUser};
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::handlers::extract::ValidatedJson;
use crate::models::car::check_model_year;
use crate::models::{Car, CreateCarRequest, UpdateCarRequest};
use crate::repository::{check_unique_violation, CarChanges, NewCar};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/{id}", get(get_car).put(update_car).delete(delete_car))
}

fn duplicate_plate() -> AppError {
    AppError::BadRequest("License plate already exists".to_string())
}

async fn list_cars(_user: AuthUser, State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    Ok(Json(state.cars.find_all().await?))
}

async fn get_car(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Car>, AppError> {
    state
        .cars
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

async fn create_car(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    check_model_year(request.year, Local::now().year()).map_err(|e| AppError::Validation(vec![e]))?;

    if state.cars.exists_by_license_plate(&request.license_plate).await? {
        return Err(duplicate_plate());
    }

    let car = state
        .cars
        .create(&NewCar {
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            year: request.year,
            category: request.category,
        })
        .await
        .map_err(|e| match check_unique_violation(&e) {
            Some(_) => duplicate_plate(),
            None => e.into(),
        })?;

    tracing::info!("{} Created car {} ({})", API_NAME, car.id, car.license_plate);
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCarRequest>,
) -> Result<Json<Car>, AppError> {
    if let Some(year) = request.year {
        check_model_year(year, Local::now().year()).map_err(|e| AppError::Validation(vec![e]))?;
    }

    let existing = state
        .cars
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    if let Some(plate) = request.license_plate.as_deref() {
        if plate != existing.license_plate && state.cars.exists_by_license_plate(plate).await? {
            return Err(duplicate_plate());
        }
    }

    let changes = CarChanges {
        license_plate: request.license_plate,
        brand: request.brand,
        model: request.model,
        year: request.year,
        category: request.category,
    };
    let car = state
        .cars
        .update(id, &changes)
        .await
        .map_err(|e| match check_unique_violation(&e) {
            Some(_) => duplicate_plate(),
            None => e.into(),
        })?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    Ok(Json(car))
}

async fn delete_car(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.cars.delete(id).await? {
        return Err(AppError::NotFound("Car not found".to_string()));
    }
    tracing::info!("{} Deleted car {}", API_NAME, id);
    Ok(Json(json!({ "message": "Car deleted successfully" })))
}
