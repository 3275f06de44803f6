use std::sync::Arc;

use chrono::NaiveDate;

use crate::auth::{hash_password, verify_password, TokenService};
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Customer, LoginRequest, NewCustomer, RegisterRequest, RoleName};
use crate::repository::{check_unique_violation, CustomerRepository, RoleRepository};

/// Input shared by self-registration and administrator-created accounts.
#[derive(Debug, Clone)]
pub struct AccountInput {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub role_id: i32,
}

#[derive(Clone)]
pub struct AuthService {
    customers: CustomerRepository,
    roles: RoleRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(customers: CustomerRepository, roles: RoleRepository, tokens: Arc<TokenService>) -> Self {
        Self {
            customers,
            roles,
            tokens,
        }
    }

    /// Registers a new enabled customer with the `CUSTOMER` role.
    pub async fn register(&self, request: RegisterRequest) -> Result<Customer, AppError> {
        let role = self.roles.ensure(RoleName::Customer).await?;
        self.create_account(AccountInput {
            username: request.username,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            role_id: role.id,
        })
        .await
    }

    pub async fn create_account(&self, input: AccountInput) -> Result<Customer, AppError> {
        if self.customers.exists_by_username(&input.username).await? {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let password_hash = hash_password(input.password).await?;
        let created = self
            .customers
            .create(&NewCustomer {
                first_name: input.first_name,
                last_name: input.last_name,
                username: input.username,
                password_hash,
                date_of_birth: input.date_of_birth,
                enabled: true,
                role_id: input.role_id,
            })
            .await;

        match created {
            Ok(customer) => {
                tracing::info!(
                    "{} Created customer {} ({}) with role {}",
                    API_NAME,
                    customer.id,
                    customer.username,
                    customer.role_name
                );
                Ok(customer)
            }
            // Lost a race with a concurrent registration of the same name.
            Err(e) if check_unique_violation(&e).is_some() => {
                Err(AppError::BadRequest("Username already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks credentials and issues a bearer token.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, Customer), AppError> {
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let customer = self
            .customers
            .find_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        if !customer.enabled {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        if !verify_password(request.password, customer.password.clone()).await {
            return Err(invalid());
        }

        let token = self
            .tokens
            .issue(&customer)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        tracing::info!("{} Customer {} logged in", API_NAME, customer.username);
        Ok((token, customer))
    }
}
