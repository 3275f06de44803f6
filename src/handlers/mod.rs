pub mod auth;
pub mod cars;
pub mod customers;
pub mod extract;
pub mod health;
pub mod rentals;
pub mod roles;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Builds the full `/api` router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/cars", cars::router())
        .nest("/api/customers", customers::router())
        .nest("/api/roles", roles::router())
        .nest("/api/rentals", rentals::router())
        .nest("/api", health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
