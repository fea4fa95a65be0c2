use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateProduct, CreateStore, DEFAULT_LOW_STOCK_THRESHOLD, Product, ProductListResponse,
    ProductQuery, Store, UpdateProduct, UpdateStore,
};
use crate::repository::{ProductRepository, StoreRepository};
use crate::summary::StoreSummary;

fn validate<T: Validate>(input: &T) -> InventoryResult<()> {
    input
        .validate()
        .map_err(|e| InventoryError::Validation(e.to_string()))
}

/// Service layer for stores, products and store summaries
///
/// Owns id and timestamp generation. Products can only be created for a
/// store that exists at the time of the call; the check and the insert are
/// separate operations.
pub struct InventoryService<S: StoreRepository, P: ProductRepository> {
    stores: Arc<S>,
    products: Arc<P>,
}

impl<S: StoreRepository, P: ProductRepository> Clone for InventoryService<S, P> {
    fn clone(&self) -> Self {
        Self {
            stores: Arc::clone(&self.stores),
            products: Arc::clone(&self.products),
        }
    }
}

impl<S: StoreRepository, P: ProductRepository> InventoryService<S, P> {
    pub fn new(stores: S, products: P) -> Self {
        Self {
            stores: Arc::new(stores),
            products: Arc::new(products),
        }
    }

    pub async fn list_stores(&self) -> InventoryResult<Vec<Store>> {
        self.stores.list().await
    }

    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn get_store(&self, id: Uuid) -> InventoryResult<Store> {
        self.stores
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::StoreNotFound(id))
    }

    #[instrument(skip(self, input), fields(store_name = %input.name))]
    pub async fn create_store(&self, input: CreateStore) -> InventoryResult<Store> {
        validate(&input)?;
        self.stores.create(Store::new(input)).await
    }

    #[instrument(skip(self, input), fields(store_id = %id))]
    pub async fn update_store(&self, id: Uuid, input: UpdateStore) -> InventoryResult<Store> {
        validate(&input)?;
        self.stores
            .update(id, input)
            .await?
            .ok_or(InventoryError::StoreNotFound(id))
    }

    /// Delete a store together with its products
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn delete_store(&self, id: Uuid) -> InventoryResult<()> {
        if !self.stores.delete(id).await? {
            return Err(InventoryError::StoreNotFound(id));
        }
        Ok(())
    }

    pub async fn list_products(&self, query: ProductQuery) -> InventoryResult<ProductListResponse> {
        validate(&query)?;
        self.products.list(query).await
    }

    /// List products of one store. Any `store_id` in the query is replaced by
    /// the given one.
    #[instrument(skip(self, query), fields(store_id = %store_id))]
    pub async fn list_store_products(
        &self,
        store_id: Uuid,
        query: ProductQuery,
    ) -> InventoryResult<ProductListResponse> {
        validate(&query)?;
        self.get_store(store_id).await?;
        self.products.list(query.for_store(store_id)).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: Uuid) -> InventoryResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))
    }

    /// Create a product for an existing store
    #[instrument(skip(self, input), fields(store_id = %input.store_id))]
    pub async fn create_product(&self, input: CreateProduct) -> InventoryResult<Product> {
        validate(&input)?;

        if self.stores.get_by_id(input.store_id).await?.is_none() {
            return Err(InventoryError::InvalidStoreReference(input.store_id));
        }

        self.products.create(Product::new(input)).await
    }

    /// Partial product update. The store reference is not re-checked.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Product> {
        validate(&input)?;
        self.products
            .update(id, input)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: Uuid) -> InventoryResult<()> {
        if !self.products.delete(id).await? {
            return Err(InventoryError::ProductNotFound(id));
        }
        Ok(())
    }

    /// Aggregate view of a store's inventory. Products whose quantity is
    /// strictly below the threshold (default 10) count as low stock.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn store_summary(
        &self,
        store_id: Uuid,
        low_stock_threshold: Option<i32>,
    ) -> InventoryResult<StoreSummary> {
        let store = self.get_store(store_id).await?;
        let products = self.products.list_by_store(store_id).await?;
        let threshold = low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        Ok(StoreSummary::compute(&store, &products, threshold))
    }
}
