use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Default page size for product listings
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Quantity below which a product counts as low stock when no threshold is given
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Prices are stored as NUMERIC(12,2)
const PRICE_SCALE: u32 = 2;

/// Largest value a NUMERIC(12,2) column holds
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Offsets are bound as BIGINT
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Creation timestamp, truncated to the microsecond resolution of `timestamptz`
/// so a freshly created record equals its stored form.
pub(crate) fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("price_not_positive")
            .with_message("price must be greater than 0".into()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("price_precision")
            .with_message("price supports at most 2 decimal places".into()));
    }
    if *price > MAX_PRICE {
        return Err(ValidationError::new("price_too_large")
            .with_message("price must be at most 9999999999.99".into()));
    }
    Ok(())
}

fn validate_price_bound(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("range").with_message("must be at least 0".into()));
    }
    Ok(())
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

/// A named inventory location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Build a new store with a generated id and creation timestamp
    pub fn new(input: CreateStore) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            created_at: creation_timestamp(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateStore) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

/// DTO for creating a store
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStore {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// DTO for renaming a store. An empty body leaves the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStore {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

impl UpdateStore {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// A sellable item belonging to exactly one store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub category: String,
    #[schema(value_type = f64, example = 29.99)]
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product with a generated id and creation timestamp
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            store_id: input.store_id,
            name: input.name,
            category: input.category,
            price: input.price,
            quantity_in_stock: input.quantity_in_stock,
            created_at: creation_timestamp(),
        }
    }

    /// `price × quantity_in_stock`
    pub fn inventory_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity_in_stock)
    }

    /// Low stock means strictly below the threshold: a quantity equal to the
    /// threshold is not low. Every consumer goes through this method.
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.quantity_in_stock < threshold
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity_in_stock {
            self.quantity_in_stock = quantity;
        }
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub store_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 29.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity_in_stock: i32,
}

/// DTO for a partial product update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity_in_stock: Option<i32>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity_in_stock.is_none()
    }
}

/// Filter and pagination descriptor for product listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Only products of this store
    pub store_id: Option<Uuid>,
    /// Exact, case-sensitive category match
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[validate(custom(function = "validate_price_bound"))]
    #[param(value_type = Option<f64>)]
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound
    #[validate(custom(function = "validate_price_bound"))]
    #[param(value_type = Option<f64>)]
    pub price_max: Option<Decimal>,
    /// Inclusive lower stock bound
    #[validate(range(min = 0))]
    pub stock_min: Option<i32>,
    /// Inclusive upper stock bound
    #[validate(range(min = 0))]
    pub stock_max: Option<i32>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            store_id: None,
            category: None,
            price_min: None,
            price_max: None,
            stock_min: None,
            stock_max: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ProductQuery {
    /// Same filters, scoped to a single store
    pub fn for_store(mut self, store_id: Uuid) -> Self {
        self.store_id = Some(store_id);
        self
    }
}

/// One page of products plus the total number of matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    pub total: u64,
}

/// Query parameters of the store summary endpoint
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Products with a quantity strictly below this value count as low stock (default 10)
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Decimal, quantity: i32) -> Product {
        Product::new(CreateProduct {
            store_id: Uuid::now_v7(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price,
            quantity_in_stock: quantity,
        })
    }

    #[test]
    fn test_low_stock_is_strictly_below_threshold() {
        assert!(product(Decimal::ONE, 9).is_low_stock(10));
        assert!(!product(Decimal::ONE, 10).is_low_stock(10));
        assert!(!product(Decimal::ONE, 11).is_low_stock(10));
        assert!(!product(Decimal::ONE, 0).is_low_stock(0));
    }

    #[test]
    fn test_inventory_value() {
        let p = product(Decimal::new(1250, 2), 4);
        assert_eq!(p.inventory_value(), Decimal::new(50, 0));
    }

    #[test]
    fn test_create_product_rejects_non_positive_price() {
        let mut input = CreateProduct {
            store_id: Uuid::now_v7(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: Decimal::ZERO,
            quantity_in_stock: 1,
        };
        assert!(input.validate().is_err());

        input.price = Decimal::new(-5, 0);
        assert!(input.validate().is_err());

        input.price = Decimal::new(1999, 2);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_sub_cent_price() {
        let input = CreateProduct {
            store_id: Uuid::now_v7(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: Decimal::new(19999, 3),
            quantity_in_stock: 1,
        };
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("price"));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let input = CreateProduct {
            store_id: Uuid::now_v7(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: Decimal::new(12500, 3),
            quantity_in_stock: 1,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_negative_stock_and_empty_names() {
        let input = CreateProduct {
            store_id: Uuid::now_v7(),
            name: String::new(),
            category: "x".repeat(101),
            price: Decimal::ONE,
            quantity_in_stock: -1,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("category"));
        assert!(fields.contains_key("quantity_in_stock"));
    }

    #[test]
    fn test_product_query_defaults() {
        let query: ProductQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(query.offset, 0);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_product_query_limit_bounds() {
        let mut query = ProductQuery {
            limit: 0,
            ..Default::default()
        };
        assert!(query.validate().is_err());

        query.limit = MAX_PAGE_LIMIT + 1;
        assert!(query.validate().is_err());

        query.limit = MAX_PAGE_LIMIT;
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_price_fits_storage_precision() {
        assert_eq!(MAX_PRICE, Decimal::new(999_999_999_999, 2));

        let mut input = CreateProduct {
            store_id: Uuid::now_v7(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: MAX_PRICE,
            quantity_in_stock: i32::MAX,
        };
        assert!(input.validate().is_ok());
        assert!(product(input.price, input.quantity_in_stock).inventory_value() > Decimal::ZERO);

        input.price = Decimal::new(1_000_000_000_000, 2);
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("price"));

        let update = UpdateProduct {
            price: Some(Decimal::new(i64::MAX, 0)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_product_query_offset_fits_bigint() {
        let mut query = ProductQuery {
            offset: MAX_OFFSET,
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        query.offset = u64::MAX;
        let err = query.validate().unwrap_err();
        assert!(err.field_errors().contains_key("offset"));
    }

    #[test]
    fn test_update_product_apply_partial() {
        let mut p = product(Decimal::ONE, 3);
        let before = p.clone();

        p.apply_update(UpdateProduct {
            quantity_in_stock: Some(42),
            ..Default::default()
        });

        assert_eq!(p.quantity_in_stock, 42);
        assert_eq!(p.name, before.name);
        assert_eq!(p.price, before.price);
        assert_eq!(p.created_at, before.created_at);
    }

    #[test]
    fn test_empty_patches() {
        assert!(UpdateStore::default().is_empty());
        assert!(UpdateProduct::default().is_empty());
        assert!(
            !UpdateProduct {
                price: Some(Decimal::ONE),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let p = product(Decimal::new(1999, 2), 5);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("storeId").is_some());
        assert!(json.get("quantityInStock").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["price"].as_f64(), Some(19.99));
    }
}
