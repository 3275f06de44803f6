use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::FieldError;

pub const MIN_MODEL_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "car_category")]
pub enum CarCategory {
    Automobile,
    Commerciale,
    Camper,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: CarCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The car fields embedded in rental responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    pub id: i32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: CarCategory,
}

impl From<&Car> for CarSummary {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            license_plate: car.license_plate.clone(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year,
            category: car.category,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 20, message = "License plate is required"))]
    pub license_plate: String,
    #[validate(length(min = 1, max = 50, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, max = 50, message = "Model is required"))]
    pub model: String,
    pub year: i32,
    pub category: CarCategory,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 20, message = "License plate cannot be empty"))]
    pub license_plate: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Brand cannot be empty"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Model cannot be empty"))]
    pub model: Option<String>,
    pub year: Option<i32>,
    pub category: Option<CarCategory>,
}

/// Model years run from 1900 through next calendar year; the upper bound moves
/// with the clock, so it is checked here rather than by the derive.
pub fn check_model_year(year: i32, current_year: i32) -> Result<(), FieldError> {
    if (MIN_MODEL_YEAR..=current_year + 1).contains(&year) {
        Ok(())
    } else {
        Err(FieldError::new("year", "Valid year is required"))
    }
}
