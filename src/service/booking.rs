//! Rental booking validation.
//!
//! [`book`] decides whether a rental may be created and, if so, inserts it
//! through a [`BookingStore`]. The checks run in a fixed order and the first
//! failure wins:
//!
//! 1. dates are real calendar dates (enforced by the typed request),
//! 2. the start date is not before today,
//! 3. the end date is strictly after the start date,
//! 4. a non-admin books only for themselves,
//! 5. the customer and the car exist,
//! 6. the car has no rental overlapping the requested days,
//! 7. the customer holds no rental ending today or later.
//!
//! Steps 2-4 are pure and never touch the store. The store is expected to
//! serialize concurrent bookings for the same car and customer; see
//! [`crate::repository::PgBookingStore`].

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::API_NAME;
use crate::models::{Car, CarSummary, CustomerSummary, NewRental, Rental, RoleName};

/// The authenticated caller, as vouched for by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: i32,
    pub role: RoleName,
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        self.role == RoleName::Admin
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Two inclusive spans overlap iff each starts no later than the other ends.
    /// Sharing a single boundary day counts.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<&Rental> for DateSpan {
    fn from(rental: &Rental) -> Self {
        Self::new(rental.start_date, rental.end_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customer,
    Car,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Customer => f.write_str("Customer"),
            Resource::Car => f.write_str("Car"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Start date cannot be in the past")]
    PastStartDate,

    #[error("End date must be after start date")]
    InvalidDateRange,

    #[error("You can only create rentals for yourself")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(Resource),

    #[error("Car is not available during the selected period")]
    CarUnavailable,

    #[error("Customer already has an active rental")]
    ActiveRentalExists,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl PartialEq for BookingError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Store(_), Self::Store(_)) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// What the validator needs from persistence. Implementations that back
/// concurrent requests must hold the customer and car rows locked from
/// `find_customer`/`find_car` until the booking is committed or dropped.
#[async_trait]
pub trait BookingStore: Send {
    async fn find_customer(&mut self, id: i32) -> Result<Option<CustomerSummary>, sqlx::Error>;

    async fn find_car(&mut self, id: i32) -> Result<Option<Car>, sqlx::Error>;

    async fn find_rentals_for_car(&mut self, car_id: i32) -> Result<Vec<DateSpan>, sqlx::Error>;

    async fn find_active_or_future_rentals_for_customer(
        &mut self,
        customer_id: i32,
        as_of: NaiveDate,
    ) -> Result<Vec<Rental>, sqlx::Error>;

    async fn insert_rental(&mut self, rental: &NewRental) -> Result<Rental, sqlx::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub customer_id: i32,
    pub car_id: i32,
    pub span: DateSpan,
}

/// An accepted booking: the inserted row plus what it refers to.
#[derive(Debug, Clone)]
pub struct Booking {
    pub rental: Rental,
    pub customer: CustomerSummary,
    pub car: CarSummary,
}

/// Steps 2-4: checks that need nothing but the request, the caller and the date.
pub fn check_request(
    request: &BookingRequest,
    requester: &Requester,
    today: NaiveDate,
) -> Result<(), BookingError> {
    if request.span.start < today {
        return Err(BookingError::PastStartDate);
    }
    check_date_order(request.span)?;
    if !requester.is_admin() && requester.id != request.customer_id {
        return Err(BookingError::Forbidden);
    }
    Ok(())
}

/// The only check re-run when an administrator edits an existing rental.
pub fn check_date_order(span: DateSpan) -> Result<(), BookingError> {
    if span.end <= span.start {
        return Err(BookingError::InvalidDateRange);
    }
    Ok(())
}

pub async fn book<S>(
    store: &mut S,
    request: &BookingRequest,
    requester: &Requester,
    today: NaiveDate,
) -> Result<Booking, BookingError>
where
    S: BookingStore + ?Sized,
{
    check_request(request, requester, today)?;

    let customer = store
        .find_customer(request.customer_id)
        .await?
        .ok_or(BookingError::NotFound(Resource::Customer))?;
    let car = store
        .find_car(request.car_id)
        .await?
        .ok_or(BookingError::NotFound(Resource::Car))?;

    let booked = store.find_rentals_for_car(request.car_id).await?;
    if let Some(conflict) = booked.iter().find(|span| span.overlaps(&request.span)) {
        tracing::warn!(
            "{} Car {} already booked {}..={}, rejecting {}..={}",
            API_NAME,
            request.car_id,
            conflict.start,
            conflict.end,
            request.span.start,
            request.span.end
        );
        return Err(BookingError::CarUnavailable);
    }

    let active = store
        .find_active_or_future_rentals_for_customer(request.customer_id, today)
        .await?;
    if !active.is_empty() {
        tracing::warn!(
            "{} Customer {} already holds {} active rental(s)",
            API_NAME,
            request.customer_id,
            active.len()
        );
        return Err(BookingError::ActiveRentalExists);
    }

    let rental = store
        .insert_rental(&NewRental {
            start_date: request.span.start,
            end_date: request.span.end,
            customer_id: request.customer_id,
            car_id: request.car_id,
        })
        .await?;

    tracing::info!(
        "{} Booked car {} for customer {} from {} to {} (rental {})",
        API_NAME,
        rental.car_id,
        rental.customer_id,
        rental.start_date,
        rental.end_date,
        rental.id
    );

    Ok(Booking {
        rental,
        customer,
        car: CarSummary::from(&car),
    })
}
