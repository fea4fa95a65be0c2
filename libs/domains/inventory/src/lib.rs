//! Inventory Domain
//!
//! Stores, the products they stock, and per-store inventory summaries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /stores and /products routers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation, store reference checks, summaries
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← traits + in-memory and PostgreSQL backends
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Query     │  ← product filters, shared by both backends
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{InMemoryInventory, InventoryService, handlers};
//!
//! let backend = InMemoryInventory::new();
//! let service = InventoryService::new(backend.clone(), backend);
//!
//! let stores = handlers::stores_router(service.clone());
//! let products = handlers::products_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod summary;

pub use error::{InventoryError, InventoryResult};
pub use handlers::{ProductsApiDoc, StoresApiDoc};
pub use models::{
    CreateProduct, CreateStore, Product, ProductListResponse, ProductQuery, Store, SummaryQuery,
    UpdateProduct, UpdateStore,
};
pub use postgres::{PgProductRepository, PgStoreRepository};
pub use query::ProductPredicate;
pub use repository::{InMemoryInventory, ProductRepository, StoreRepository};
pub use service::InventoryService;
pub use summary::{CategorySummary, StoreSummary};
