use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{Rental, RentalDetails, RentalDetailsRow};

pub(crate) const RENTAL_COLUMNS: &str =
    "id, start_date, end_date, customer_id, car_id, created_at, updated_at";

const DETAILS_SELECT: &str = "SELECT r.id, r.start_date, r.end_date, r.customer_id, r.car_id, \
     r.created_at, r.updated_at, \
     cu.first_name AS customer_first_name, cu.last_name AS customer_last_name, \
     cu.username AS customer_username, \
     ca.license_plate AS car_license_plate, ca.brand AS car_brand, ca.model AS car_model, \
     ca.year AS car_year, ca.category AS car_category \
     FROM rentals r \
     JOIN customers cu ON cu.id = r.customer_id \
     JOIN cars ca ON ca.id = r.car_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalChanges {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: i32,
    pub car_id: i32,
}

#[derive(Clone)]
pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<RentalDetails>, sqlx::Error> {
        let query = format!("{} ORDER BY r.start_date DESC, r.id DESC", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, RentalDetailsRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(RentalDetails::from).collect())
    }

    pub async fn find_details(&self, id: i32) -> Result<Option<RentalDetails>, sqlx::Error> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        let row = sqlx::query_as::<_, RentalDetailsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(RentalDetails::from))
    }

    pub async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<RentalDetails>, sqlx::Error> {
        let query = format!(
            "{} WHERE r.customer_id = $1 ORDER BY r.start_date DESC, r.id DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, RentalDetailsRow>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(RentalDetails::from).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Rental>, sqlx::Error> {
        let query = format!("SELECT {} FROM rentals WHERE id = $1", RENTAL_COLUMNS);
        sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn update(&self, id: i32, changes: &RentalChanges) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rentals SET start_date = $1, end_date = $2, customer_id = $3, car_id = $4, \
             updated_at = NOW() WHERE id = $5",
        )
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.customer_id)
        .bind(changes.car_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
