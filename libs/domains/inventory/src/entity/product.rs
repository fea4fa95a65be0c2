use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub created_at: DateTimeWithTimeZone,
    /// Insertion sequence, assigned by the database. Tie-breaker for
    /// products sharing a creation timestamp.
    pub seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_delete = "Cascade"
    )]
    Store,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            name: model.name,
            category: model.category,
            price: model.price,
            quantity_in_stock: model.quantity_in_stock,
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            store_id: Set(product.store_id),
            name: Set(product.name.clone()),
            category: Set(product.category.clone()),
            price: Set(product.price),
            quantity_in_stock: Set(product.quantity_in_stock),
            created_at: Set(product.created_at.into()),
            seq: NotSet,
        }
    }
}
