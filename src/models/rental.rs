use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::car::{CarCategory, CarSummary};
use super::customer::CustomerSummary;
use super::dates::{deserialize_date, deserialize_date_option};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: i32,
    pub car_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRental {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: i32,
    pub car_id: i32,
}

/// A rental as returned by the API, with the customer and car it refers to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: i32,
    pub car_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub referred_customer: CustomerSummary,
    pub rented_car: CarSummary,
}

impl RentalDetails {
    pub fn new(rental: Rental, customer: CustomerSummary, car: CarSummary) -> Self {
        Self {
            id: rental.id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            customer_id: rental.customer_id,
            car_id: rental.car_id,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
            referred_customer: customer,
            rented_car: car,
        }
    }
}

/// Flat row produced by joining rentals with customers and cars.
#[derive(Debug, Clone, FromRow)]
pub struct RentalDetailsRow {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: i32,
    pub car_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_username: String,
    pub car_license_plate: String,
    pub car_brand: String,
    pub car_model: String,
    pub car_year: i32,
    pub car_category: CarCategory,
}

impl From<RentalDetailsRow> for RentalDetails {
    fn from(row: RentalDetailsRow) -> Self {
        Self {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            customer_id: row.customer_id,
            car_id: row.car_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            referred_customer: CustomerSummary {
                id: row.customer_id,
                first_name: row.customer_first_name,
                last_name: row.customer_last_name,
                username: row.customer_username,
            },
            rented_car: CarSummary {
                id: row.car_id,
                license_plate: row.car_license_plate,
                brand: row.car_brand,
                model: row.car_model,
                year: row.car_year,
                category: row.car_category,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
    // Any integer parses; unknown ids are rejected by the booking checks in order.
    pub customer_id: i32,
    pub car_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalRequest {
    #[serde(default, deserialize_with = "deserialize_date_option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date_option")]
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Valid customer ID is required"))]
    pub customer_id: Option<i32>,
    #[validate(range(min = 1, message = "Valid car ID is required"))]
    pub car_id: Option<i32>,
}
