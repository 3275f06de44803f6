//! Request extractors that turn a bearer token into a known customer.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::Customer;
use crate::service::booking::Requester;
use crate::state::AppState;

/// Any enabled customer holding a valid token.
///
/// The customer row is reloaded on every request so a disabled account or a
/// changed role takes effect immediately.
pub struct AuthUser(pub Customer);

impl AuthUser {
    pub fn requester(&self) -> Requester {
        Requester {
            id: self.0.id,
            role: self.0.role_name,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }

    /// Non-admins may only act on their own customer id.
    pub fn ensure_self_or_admin(&self, customer_id: i32) -> Result<(), AppError> {
        if self.is_admin() || self.0.id == customer_id {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

/// An [`AuthUser`] whose role is `ADMIN`.
pub struct AdminUser(pub Customer);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::warn!("{} Rejected bearer token on {}: {}", API_NAME, parts.uri, e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        match state.customers.find_by_id(claims.user_id).await? {
            Some(customer) if customer.enabled => Ok(Self(customer)),
            _ => Err(AppError::Unauthorized("Invalid or expired token".to_string())),
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(customer) = AuthUser::from_request_parts(parts, state).await?;
        if !customer.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(Self(customer))
    }
}
