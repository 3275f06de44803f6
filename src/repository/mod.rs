pub mod booking_store;
pub mod car_repo;
pub mod customer_repo;
pub mod errors;
pub mod rental_repo;
pub mod role_repo;

pub use booking_store::PgBookingStore;
pub use car_repo::{CarChanges, CarRepository, NewCar};
pub use customer_repo::CustomerRepository;
pub use errors::{check_unique_violation, is_foreign_key_violation};
pub use rental_repo::{RentalChanges, RentalRepository};
pub use role_repo::RoleRepository;
