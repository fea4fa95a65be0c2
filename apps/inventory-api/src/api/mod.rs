//! API routes module

pub mod health;
pub mod inventory;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Everything served under `/api`
pub fn routes(state: &AppState) -> Router {
    inventory::router(state)
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
