//! Store and product routes

use axum::Router;
use domain_inventory::{
    InventoryService, PgProductRepository, PgStoreRepository, ProductRepository, StoreRepository,
    handlers,
};

use crate::state::AppState;

/// `/stores` and `/products` over any repository pair
pub fn routes<S, P>(service: InventoryService<S, P>) -> Router
where
    S: StoreRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .nest("/stores", handlers::stores_router(service.clone()))
        .nest("/products", handlers::products_router(service))
}

/// PostgreSQL-backed routes
pub fn router(state: &AppState) -> Router {
    let service = InventoryService::new(
        PgStoreRepository::new(state.db.clone()),
        PgProductRepository::new(state.db.clone()),
    );
    routes(service)
}
