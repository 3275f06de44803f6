use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use super::rental_repo::RENTAL_COLUMNS;
use crate::models::{Car, CustomerSummary, NewRental, Rental};
use crate::service::booking::{BookingStore, DateSpan};

/// [`BookingStore`] backed by a single Postgres transaction.
///
/// `find_customer` and `find_car` take `FOR UPDATE` row locks, so a second
/// booking for the same customer or car blocks until this transaction ends
/// and then reads the committed rentals. The validator always looks up the
/// customer before the car, which fixes the lock order.
pub struct PgBookingStore {
    tx: Transaction<'static, Postgres>,
}

impl PgBookingStore {
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_customer(&mut self, id: i32) -> Result<Option<CustomerSummary>, sqlx::Error> {
        sqlx::query_as::<_, CustomerSummary>(
            "SELECT id, first_name, last_name, username FROM customers WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
    }

    async fn find_car(&mut self, id: i32) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(
            "SELECT id, license_plate, brand, model, year, category, created_at, updated_at \
             FROM cars WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
    }

    async fn find_rentals_for_car(&mut self, car_id: i32) -> Result<Vec<DateSpan>, sqlx::Error> {
        let rows: Vec<(NaiveDate, NaiveDate)> =
            sqlx::query_as("SELECT start_date, end_date FROM rentals WHERE car_id = $1")
                .bind(car_id)
                .fetch_all(&mut *self.tx)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(start, end)| DateSpan::new(start, end))
            .collect())
    }

    async fn find_active_or_future_rentals_for_customer(
        &mut self,
        customer_id: i32,
        as_of: NaiveDate,
    ) -> Result<Vec<Rental>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM rentals WHERE customer_id = $1 AND end_date >= $2",
            RENTAL_COLUMNS
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(customer_id)
            .bind(as_of)
            .fetch_all(&mut *self.tx)
            .await
    }

    async fn insert_rental(&mut self, rental: &NewRental) -> Result<Rental, sqlx::Error> {
        let query = format!(
            "INSERT INTO rentals (start_date, end_date, customer_id, car_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            RENTAL_COLUMNS
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(rental.start_date)
            .bind(rental.end_date)
            .bind(rental.customer_id)
            .bind(rental.car_id)
            .fetch_one(&mut *self.tx)
            .await
    }
}
