use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{product, store},
    error::{InventoryError, InventoryResult},
    models::{Product, ProductListResponse, ProductQuery, Store, UpdateProduct, UpdateStore},
    repository::{ProductRepository, StoreRepository},
};

pub struct PgStoreRepository {
    base: BaseRepository<store::Entity>,
}

impl PgStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn list(&self) -> InventoryResult<Vec<Store>> {
        let models = store::Entity::find()
            .order_by_asc(store::Column::CreatedAt)
            // v7 ids grow monotonically within a process, matching insertion order
            .order_by_asc(store::Column::Id)
            .all(self.base.db())
            .await
            ?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Store>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Store::from))
    }

    async fn create(&self, store: Store) -> InventoryResult<Store> {
        let model = self
            .base
            .insert(store::ActiveModel::from(&store))
            .await
            ?;

        tracing::info!(store_id = %model.id, "Created store");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, input: UpdateStore) -> InventoryResult<Option<Store>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active_model = model.into_active_model();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }

        match self.base.update(active_model).await {
            Ok(updated) => {
                tracing::info!(store_id = %id, "Updated store");
                Ok(Some(updated.into()))
            }
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        // products go with it through ON DELETE CASCADE
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(store_id = %id, "Deleted store");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, query: ProductQuery) -> InventoryResult<ProductListResponse> {
        let condition = query.condition();

        let total = product::Entity::find()
            .filter(condition.clone())
            .count(self.base.db())
            .await
            ?;

        let models = product::Entity::find()
            .filter(condition)
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Seq)
            .limit(query.limit)
            .offset(query.offset)
            .all(self.base.db())
            .await
            ?;

        Ok(ProductListResponse {
            items: models.into_iter().map(Product::from).collect(),
            total,
        })
    }

    async fn list_by_store(&self, store_id: Uuid) -> InventoryResult<Vec<Product>> {
        let models = product::Entity::find()
            .filter(ProductQuery::default().for_store(store_id).condition())
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Seq)
            .all(self.base.db())
            .await
            ?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn create(&self, product: Product) -> InventoryResult<Product> {
        let model = self
            .base
            .insert(product::ActiveModel::from(&product))
            .await
            .map_err(|e| match e.sql_err() {
                // store removed after the service checked it
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    InventoryError::InvalidStoreReference(product.store_id)
                }
                _ => InventoryError::Database(e),
            })?;

        tracing::info!(product_id = %model.id, store_id = %model.store_id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Option<Product>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active_model = model.into_active_model();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(category) = input.category {
            active_model.category = Set(category);
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        if let Some(quantity) = input.quantity_in_stock {
            active_model.quantity_in_stock = Set(quantity);
        }

        match self.base.update(active_model).await {
            Ok(updated) => {
                tracing::info!(product_id = %id, "Updated product");
                Ok(Some(updated.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
