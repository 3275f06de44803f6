use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::config::Config;
use crate::repository::{CarRepository, CustomerRepository, RoleRepository};
use crate::service::{AuthService, RentalService};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub cars: CarRepository,
    pub customers: CustomerRepository,
    pub roles: RoleRepository,
    pub rentals: RentalService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.jwt_ttl_hours));
        let customers = CustomerRepository::new(pool.clone());
        let roles = RoleRepository::new(pool.clone());
        Self {
            cars: CarRepository::new(pool.clone()),
            rentals: RentalService::new(pool),
            auth: AuthService::new(customers.clone(), roles.clone(), tokens.clone()),
            customers,
            roles,
            tokens,
        }
    }
}
