pub mod car;
pub mod customer;
pub mod dates;
pub mod rental;
pub mod role;

pub use car::{Car, CarCategory, CarSummary, CreateCarRequest, UpdateCarRequest};
pub use customer::{
    CreateCustomerRequest, Customer, CustomerChanges, CustomerProfile, CustomerSummary,
    LoginRequest, NewCustomer, RegisterRequest, UpdateCustomerRequest,
};
pub use rental::{
    CreateRentalRequest, NewRental, Rental, RentalDetails, RentalDetailsRow, UpdateRentalRequest,
};
pub use role::{Role, RoleName};
