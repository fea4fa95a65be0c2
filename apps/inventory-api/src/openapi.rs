//! OpenAPI documentation configuration

use axum_helpers::HealthResponse;
use utoipa::OpenApi;

/// Combined OpenAPI documentation for the inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Stores, their products, and per-store inventory summaries"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(crate::api::health::ready),
    components(schemas(HealthResponse)),
    nest(
        (path = "/api/stores", api = domain_inventory::StoresApiDoc),
        (path = "/api/products", api = domain_inventory::ProductsApiDoc)
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
