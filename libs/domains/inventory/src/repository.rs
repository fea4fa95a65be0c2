use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::InventoryResult;
use crate::models::{Product, ProductListResponse, ProductQuery, Store, UpdateProduct, UpdateStore};

/// Repository trait for Store persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// All stores, oldest first
    async fn list(&self) -> InventoryResult<Vec<Store>>;

    /// Get a store by ID
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Store>>;

    /// Persist a fully-formed store as-is
    async fn create(&self, store: Store) -> InventoryResult<Store>;

    /// Apply a partial update. `None` when the store does not exist.
    async fn update(&self, id: Uuid, input: UpdateStore) -> InventoryResult<Option<Store>>;

    /// Delete a store and its products. `true` iff a store was removed.
    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;
}

/// Repository trait for Product persistence
///
/// Listing goes through [`ProductQuery`]: every supplied filter must match,
/// results are ordered by creation time (insertion order on ties) and `total`
/// counts all matches regardless of `limit` and `offset`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One filtered page of products plus the total match count
    async fn list(&self, query: ProductQuery) -> InventoryResult<ProductListResponse>;

    /// Every product of one store, oldest first
    async fn list_by_store(&self, store_id: Uuid) -> InventoryResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>>;

    /// Persist a fully-formed product as-is
    async fn create(&self, product: Product) -> InventoryResult<Product>;

    /// Apply a partial update. `None` when the product does not exist.
    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Option<Product>>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;
}

#[derive(Debug, Default)]
struct Tables {
    // Vec keeps insertion order, which breaks ties between equal timestamps
    stores: Vec<Store>,
    products: Vec<Product>,
}

/// In-memory implementation of both repositories (for development/testing)
///
/// Clones share the same tables, so one instance can back the store and the
/// product side of a service and deleting a store removes its products.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventory {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn oldest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    // stable sort: equal timestamps stay in insertion order
    items.sort_by_key(|item| created_at(item));
    items
}

#[async_trait]
impl StoreRepository for InMemoryInventory {
    async fn list(&self) -> InventoryResult<Vec<Store>> {
        let tables = self.tables.read().await;
        Ok(oldest_first(tables.stores.clone(), |s| s.created_at))
    }

    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Store>> {
        let tables = self.tables.read().await;
        Ok(tables.stores.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, store: Store) -> InventoryResult<Store> {
        let mut tables = self.tables.write().await;
        tables.stores.push(store.clone());

        tracing::info!(store_id = %store.id, "Created store");
        Ok(store)
    }

    async fn update(&self, id: Uuid, input: UpdateStore) -> InventoryResult<Option<Store>> {
        let mut tables = self.tables.write().await;
        let Some(store) = tables.stores.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(store.clone()));
        }

        store.apply_update(input);
        tracing::info!(store_id = %id, "Updated store");
        Ok(Some(store.clone()))
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.stores.len();
        tables.stores.retain(|s| s.id != id);

        if tables.stores.len() == before {
            return Ok(false);
        }

        tables.products.retain(|p| p.store_id != id);
        tracing::info!(store_id = %id, "Deleted store");
        Ok(true)
    }
}

#[async_trait]
impl ProductRepository for InMemoryInventory {
    async fn list(&self, query: ProductQuery) -> InventoryResult<ProductListResponse> {
        let tables = self.tables.read().await;
        let predicates = query.predicates();

        let matching: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| predicates.iter().all(|pred| pred.matches(p)))
            .cloned()
            .collect();
        let matching = oldest_first(matching, |p| p.created_at);

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();

        Ok(ProductListResponse { items, total })
    }

    async fn list_by_store(&self, store_id: Uuid) -> InventoryResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let products = tables
            .products
            .iter()
            .filter(|p| p.store_id == store_id)
            .cloned()
            .collect();
        Ok(oldest_first(products, |p| p.created_at))
    }

    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: Product) -> InventoryResult<Product> {
        let mut tables = self.tables.write().await;
        tables.products.push(product.clone());

        tracing::info!(product_id = %product.id, store_id = %product.store_id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(product.clone()));
        }

        product.apply_update(input);
        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);

        if tables.products.len() < before {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, CreateStore};
    use rust_decimal::Decimal;

    async fn seed_store(repo: &InMemoryInventory, name: &str) -> Store {
        StoreRepository::create(
            repo,
            Store::new(CreateStore {
                name: name.to_string(),
            }),
        )
        .await
        .unwrap()
    }

    async fn seed_product(
        repo: &InMemoryInventory,
        store: &Store,
        category: &str,
        price: Decimal,
        quantity: i32,
    ) -> Product {
        ProductRepository::create(
            repo,
            Product::new(CreateProduct {
                store_id: store.id,
                name: format!("{} {}", category, quantity),
                category: category.to_string(),
                price,
                quantity_in_stock: quantity,
            }),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_store() {
        let repo = InMemoryInventory::new();
        let store = seed_store(&repo, "Downtown").await;

        let fetched = StoreRepository::get_by_id(&repo, store.id).await.unwrap();
        assert_eq!(fetched, Some(store));
    }

    #[tokio::test]
    async fn test_empty_store_patch_returns_unchanged_record() {
        let repo = InMemoryInventory::new();
        let store = seed_store(&repo, "Downtown").await;

        let updated = StoreRepository::update(&repo, store.id, UpdateStore::default())
            .await
            .unwrap();
        assert_eq!(updated, Some(store));
    }

    #[tokio::test]
    async fn test_update_missing_store_is_none() {
        let repo = InMemoryInventory::new();
        let updated = StoreRepository::update(
            &repo,
            Uuid::now_v7(),
            UpdateStore {
                name: Some("x".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_records_is_false() {
        let repo = InMemoryInventory::new();
        assert!(!StoreRepository::delete(&repo, Uuid::now_v7()).await.unwrap());
        assert!(!ProductRepository::delete(&repo, Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_store_cascades_to_products() {
        let repo = InMemoryInventory::new();
        let doomed = seed_store(&repo, "Doomed").await;
        let kept = seed_store(&repo, "Kept").await;
        let gone = seed_product(&repo, &doomed, "A", Decimal::ONE, 1).await;
        let stays = seed_product(&repo, &kept, "A", Decimal::ONE, 1).await;

        assert!(StoreRepository::delete(&repo, doomed.id).await.unwrap());

        assert!(ProductRepository::get_by_id(&repo, gone.id).await.unwrap().is_none());
        assert!(ProductRepository::get_by_id(&repo, stays.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_total_ignores_pagination() {
        let repo = InMemoryInventory::new();
        let store = seed_store(&repo, "Downtown").await;
        for quantity in 0..7 {
            seed_product(&repo, &store, "A", Decimal::ONE, quantity).await;
        }

        for (limit, offset) in [(2, 0), (2, 6), (100, 0), (3, 10)] {
            let page = ProductRepository::list(
                &repo,
                ProductQuery {
                    limit,
                    offset,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            assert_eq!(page.total, 7);
            assert!(page.items.len() as u64 <= limit);
        }
    }

    #[tokio::test]
    async fn test_pages_follow_insertion_order() {
        let repo = InMemoryInventory::new();
        let store = seed_store(&repo, "Downtown").await;
        let mut created = Vec::new();
        for quantity in 0..5 {
            created.push(seed_product(&repo, &store, "A", Decimal::ONE, quantity).await);
        }

        let page = ProductRepository::list(
            &repo,
            ProductQuery {
                limit: 2,
                offset: 1,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(page.items, created[1..3].to_vec());
        let all = ProductRepository::list(&repo, ProductQuery::default())
            .await
            .unwrap();
        assert!(
            all.items
                .windows(2)
                .all(|w| w[0].created_at <= w[1].created_at)
        );
    }

    #[tokio::test]
    async fn test_filters_combine_with_and() {
        let repo = InMemoryInventory::new();
        let north = seed_store(&repo, "North").await;
        let south = seed_store(&repo, "South").await;
        seed_product(&repo, &north, "Electronics", Decimal::new(2999, 2), 45).await;
        seed_product(&repo, &north, "Electronics", Decimal::new(1250, 2), 3).await;
        seed_product(&repo, &north, "Produce", Decimal::new(499, 2), 80).await;
        seed_product(&repo, &south, "Electronics", Decimal::new(4500, 2), 22).await;

        let query = ProductQuery {
            store_id: Some(north.id),
            category: Some("Electronics".to_string()),
            price_min: Some(Decimal::new(10, 0)),
            stock_min: Some(10),
            ..Default::default()
        };
        let page = ProductRepository::list(&repo, query.clone()).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].price, Decimal::new(2999, 2));
        assert!(page.items.iter().all(|p| query.matches(p)));
    }

    #[tokio::test]
    async fn test_list_by_store_returns_only_that_store() {
        let repo = InMemoryInventory::new();
        let north = seed_store(&repo, "North").await;
        let south = seed_store(&repo, "South").await;
        seed_product(&repo, &north, "A", Decimal::ONE, 1).await;
        seed_product(&repo, &south, "A", Decimal::ONE, 1).await;
        seed_product(&repo, &north, "B", Decimal::ONE, 1).await;

        let products = repo.list_by_store(north.id).await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.store_id == north.id));
    }

    #[tokio::test]
    async fn test_product_update_applies_only_given_fields() {
        let repo = InMemoryInventory::new();
        let store = seed_store(&repo, "Downtown").await;
        let product = seed_product(&repo, &store, "A", Decimal::new(500, 2), 4).await;

        let updated = ProductRepository::update(
            &repo,
            product.id,
            UpdateProduct {
                price: Some(Decimal::new(750, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.price, Decimal::new(750, 2));
        assert_eq!(updated.quantity_in_stock, 4);
        assert_eq!(updated.name, product.name);
    }
}
