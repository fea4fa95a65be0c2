use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, Store};

/// Per-category rollup inside a [`StoreSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub product_count: u64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Derived inventory snapshot of one store. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub store_id: Uuid,
    pub store_name: String,
    pub total_products: u64,
    #[schema(value_type = f64)]
    pub total_inventory_value: Decimal,
    pub low_stock_count: u64,
    pub low_stock_threshold: i32,
    /// One entry per distinct category, in first-seen order
    pub by_category: Vec<CategorySummary>,
}

impl StoreSummary {
    /// Single pass over the store's products.
    pub fn compute(store: &Store, products: &[Product], low_stock_threshold: i32) -> Self {
        let mut summary = Self {
            store_id: store.id,
            store_name: store.name.clone(),
            total_products: 0,
            total_inventory_value: Decimal::ZERO,
            low_stock_count: 0,
            low_stock_threshold,
            by_category: Vec::new(),
        };

        for product in products {
            let value = product.inventory_value();

            summary.total_products += 1;
            summary.total_inventory_value += value;
            if product.is_low_stock(low_stock_threshold) {
                summary.low_stock_count += 1;
            }

            match summary
                .by_category
                .iter_mut()
                .find(|c| c.category == product.category)
            {
                Some(entry) => {
                    entry.product_count += 1;
                    entry.total_value += value;
                }
                None => summary.by_category.push(CategorySummary {
                    category: product.category.clone(),
                    product_count: 1,
                    total_value: value,
                }),
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, CreateStore, DEFAULT_LOW_STOCK_THRESHOLD};

    fn store() -> Store {
        Store::new(CreateStore {
            name: "Corner Shop".to_string(),
        })
    }

    fn product(store: &Store, category: &str, price: i64, quantity: i32) -> Product {
        Product::new(CreateProduct {
            store_id: store.id,
            name: format!("{} item", category),
            category: category.to_string(),
            price: Decimal::new(price, 0),
            quantity_in_stock: quantity,
        })
    }

    #[test]
    fn test_totals_and_category_rollups() {
        let store = store();
        let products = vec![product(&store, "A", 10, 5), product(&store, "B", 20, 1)];

        let summary = StoreSummary::compute(&store, &products, DEFAULT_LOW_STOCK_THRESHOLD);

        assert_eq!(summary.store_name, "Corner Shop");
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_inventory_value, Decimal::new(70, 0));
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "A");
        assert_eq!(summary.by_category[0].total_value, Decimal::new(50, 0));
        assert_eq!(summary.by_category[1].category, "B");
        assert_eq!(summary.by_category[1].total_value, Decimal::new(20, 0));
    }

    #[test]
    fn test_quantity_equal_to_threshold_is_not_low() {
        let store = store();
        let products = vec![
            product(&store, "A", 1, 5),
            product(&store, "A", 1, 10),
            product(&store, "A", 1, 15),
        ];

        let summary = StoreSummary::compute(&store, &products, 10);

        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.low_stock_threshold, 10);
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let store = store();
        let products = vec![
            product(&store, "Produce", 2, 1),
            product(&store, "Bakery", 3, 1),
            product(&store, "Produce", 4, 2),
        ];

        let summary = StoreSummary::compute(&store, &products, 0);

        let categories: Vec<_> = summary
            .by_category
            .iter()
            .map(|c| (c.category.as_str(), c.product_count))
            .collect();
        assert_eq!(categories, vec![("Produce", 2), ("Bakery", 1)]);
        assert_eq!(summary.by_category[0].total_value, Decimal::new(10, 0));
        assert_eq!(summary.low_stock_count, 0);
    }

    #[test]
    fn test_empty_store() {
        let store = store();
        let summary = StoreSummary::compute(&store, &[], 10);

        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_inventory_value, Decimal::ZERO);
        assert_eq!(summary.low_stock_count, 0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_serializes_camel_case_numbers() {
        let store = store();
        let products = vec![product(&store, "A", 3, 2)];
        let json = serde_json::to_value(StoreSummary::compute(&store, &products, 10)).unwrap();

        assert_eq!(json["totalInventoryValue"].as_f64(), Some(6.0));
        assert_eq!(json["lowStockCount"], 1);
        assert_eq!(json["byCategory"][0]["productCount"], 1);
    }
}
