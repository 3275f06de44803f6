use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::dates::{deserialize_date, deserialize_date_option};
use super::role::{Role, RoleName};

/// A customer row joined with its role. Holds the password hash, so it is
/// never serialized; responses go through [`CustomerProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub enabled: bool,
    pub role_id: i32,
    pub role_name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn is_admin(&self) -> bool {
        self.role_name == RoleName::Admin
    }

    pub fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            date_of_birth: self.date_of_birth,
            enabled: self.enabled,
            role_id: self.role_id,
            role: Role {
                id: self.role_id,
                role_name: self.role_name,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub enabled: bool,
    pub role_id: i32,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

/// Fields written when a customer row is created.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
    pub enabled: bool,
    pub role_id: i32,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub enabled: Option<bool>,
    pub role_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_of_birth: NaiveDate,
    pub role_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date_option")]
    pub date_of_birth: Option<NaiveDate>,
    pub role_id: Option<i32>,
    pub enabled: Option<bool>,
}

impl UpdateCustomerRequest {
    /// True when the request touches fields only an administrator may change.
    pub fn changes_privileges(&self) -> bool {
        self.role_id.is_some() || self.enabled.is_some()
    }
}
