use chrono::NaiveDate;
use sqlx::PgPool;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{CreateRentalRequest, RentalDetails, UpdateRentalRequest};
use crate::repository::{
    CarRepository, CustomerRepository, PgBookingStore, RentalChanges, RentalRepository,
};
use crate::service::booking::{self, BookingRequest, DateSpan, Requester};

#[derive(Clone)]
pub struct RentalService {
    pool: PgPool,
    rentals: RentalRepository,
    customers: CustomerRepository,
    cars: CarRepository,
}

impl RentalService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            cars: CarRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<RentalDetails>, AppError> {
        Ok(self.rentals.find_all().await?)
    }

    pub async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<RentalDetails>, AppError> {
        Ok(self.rentals.find_by_customer(customer_id).await?)
    }

    pub async fn get(&self, id: i32) -> Result<RentalDetails, AppError> {
        self.rentals
            .find_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))
    }

    /// Validates and inserts a rental inside one transaction.
    pub async fn create(
        &self,
        requester: &Requester,
        request: &CreateRentalRequest,
        today: NaiveDate,
    ) -> Result<RentalDetails, AppError> {
        let booking_request = BookingRequest {
            customer_id: request.customer_id,
            car_id: request.car_id,
            span: DateSpan::new(request.start_date, request.end_date),
        };

        // Rejections that need no data never open a transaction.
        booking::check_request(&booking_request, requester, today)?;

        let mut store = PgBookingStore::begin(&self.pool).await?;
        match booking::book(&mut store, &booking_request, requester, today).await {
            Ok(accepted) => {
                store.commit().await?;
                Ok(RentalDetails::new(accepted.rental, accepted.customer, accepted.car))
            }
            Err(e) => {
                if let Err(rollback_err) = store.rollback().await {
                    tracing::error!("{} Failed to roll back booking: {}", API_NAME, rollback_err);
                }
                Err(e.into())
            }
        }
    }

    /// Administrative edit. Only the ordering of the resulting dates is
    /// re-checked; overlap and active-rental rules are not re-applied.
    pub async fn update(&self, id: i32, request: &UpdateRentalRequest) -> Result<RentalDetails, AppError> {
        let existing = self
            .rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

        let changes = RentalChanges {
            start_date: request.start_date.unwrap_or(existing.start_date),
            end_date: request.end_date.unwrap_or(existing.end_date),
            customer_id: request.customer_id.unwrap_or(existing.customer_id),
            car_id: request.car_id.unwrap_or(existing.car_id),
        };
        booking::check_date_order(DateSpan::new(changes.start_date, changes.end_date))?;

        if changes.customer_id != existing.customer_id
            && self.customers.find_by_id(changes.customer_id).await?.is_none()
        {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }
        if changes.car_id != existing.car_id && self.cars.find_by_id(changes.car_id).await?.is_none() {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        if !self.rentals.update(id, &changes).await? {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        tracing::info!("{} Updated rental {}", API_NAME, id);
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.rentals.delete(id).await? {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        tracing::info!("{} Deleted rental {}", API_NAME, id);
        Ok(())
    }
}
