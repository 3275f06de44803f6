pub mod auth;
pub mod booking;
pub mod rental;
pub mod seed;


pub use auth::{AccountInput, AuthService};
pub use booking::{BookingError, BookingStore, DateSpan, Requester};
pub use rental::RentalService;
pub use seed::seed_defaults;
