//! Product filter compilation
//!
//! A [`ProductQuery`] is turned into a list of [`ProductPredicate`]s, one per
//! supplied filter field. Each predicate can be evaluated against a product in
//! memory or rendered as a sea-orm [`Condition`] with bound values, so both
//! repository backends share the same filter semantics.

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::entity::product;
use crate::models::{Product, ProductQuery};

/// A single filter constraint. All bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPredicate {
    StoreIs(Uuid),
    CategoryIs(String),
    PriceAtLeast(Decimal),
    PriceAtMost(Decimal),
    StockAtLeast(i32),
    StockAtMost(i32),
}

impl ProductPredicate {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::StoreIs(id) => product.store_id == *id,
            Self::CategoryIs(category) => product.category == *category,
            Self::PriceAtLeast(min) => product.price >= *min,
            Self::PriceAtMost(max) => product.price <= *max,
            Self::StockAtLeast(min) => product.quantity_in_stock >= *min,
            Self::StockAtMost(max) => product.quantity_in_stock <= *max,
        }
    }

    pub fn condition(&self) -> Condition {
        let expr = match self {
            Self::StoreIs(id) => product::Column::StoreId.eq(*id),
            Self::CategoryIs(category) => product::Column::Category.eq(category.as_str()),
            Self::PriceAtLeast(min) => product::Column::Price.gte(*min),
            Self::PriceAtMost(max) => product::Column::Price.lte(*max),
            Self::StockAtLeast(min) => product::Column::QuantityInStock.gte(*min),
            Self::StockAtMost(max) => product::Column::QuantityInStock.lte(*max),
        };
        Condition::all().add(expr)
    }
}

impl ProductQuery {
    /// Predicates for every filter field that was supplied
    pub fn predicates(&self) -> Vec<ProductPredicate> {
        let mut predicates = Vec::new();
        if let Some(store_id) = self.store_id {
            predicates.push(ProductPredicate::StoreIs(store_id));
        }
        if let Some(category) = &self.category {
            predicates.push(ProductPredicate::CategoryIs(category.clone()));
        }
        if let Some(min) = self.price_min {
            predicates.push(ProductPredicate::PriceAtLeast(min));
        }
        if let Some(max) = self.price_max {
            predicates.push(ProductPredicate::PriceAtMost(max));
        }
        if let Some(min) = self.stock_min {
            predicates.push(ProductPredicate::StockAtLeast(min));
        }
        if let Some(max) = self.stock_max {
            predicates.push(ProductPredicate::StockAtMost(max));
        }
        predicates
    }

    /// True when the product satisfies every supplied filter
    pub fn matches(&self, product: &Product) -> bool {
        self.predicates().iter().all(|p| p.matches(product))
    }

    /// Conjunction of all predicates. An empty query yields an empty
    /// condition, which matches every row.
    pub fn condition(&self) -> Condition {
        self.predicates()
            .iter()
            .fold(Condition::all(), |acc, p| acc.add(p.condition()))
    }
}
