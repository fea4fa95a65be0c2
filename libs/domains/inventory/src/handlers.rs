use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestReferenceResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InventoryResult;
use crate::models::{
    CreateProduct, CreateStore, Product, ProductListResponse, ProductQuery, Store, SummaryQuery,
    UpdateProduct, UpdateStore,
};
use crate::repository::{ProductRepository, StoreRepository};
use crate::service::InventoryService;
use crate::summary::{CategorySummary, StoreSummary};

pub const STORES_TAG: &str = "stores";
pub const PRODUCTS_TAG: &str = "products";

type SharedService<S, P> = State<Arc<InventoryService<S, P>>>;

/// OpenAPI documentation for the `/stores` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        list_stores,
        create_store,
        get_store,
        update_store,
        delete_store,
        list_store_products,
        store_summary,
    ),
    components(
        schemas(Store, CreateStore, UpdateStore, ProductListResponse, StoreSummary, CategorySummary),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = STORES_TAG, description = "Store management and per-store reporting"))
)]
pub struct StoresApiDoc;

/// OpenAPI documentation for the `/products` routes
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductListResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestReferenceResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = PRODUCTS_TAG, description = "Product catalog and stock levels"))
)]
pub struct ProductsApiDoc;

/// Routes mounted under `/stores`
pub fn stores_router<S, P>(service: InventoryService<S, P>) -> Router
where
    S: StoreRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route(
            "/{id}",
            get(get_store).put(update_store).delete(delete_store),
        )
        .route("/{id}/products", get(list_store_products))
        .route("/{id}/summary", get(store_summary))
        .with_state(Arc::new(service))
}

/// Routes mounted under `/products`
pub fn products_router<S, P>(service: InventoryService<S, P>) -> Router
where
    S: StoreRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(Arc::new(service))
}

/// List all stores, oldest first
#[utoipa::path(
    get,
    path = "",
    tag = STORES_TAG,
    responses(
        (status = 200, description = "All stores", body = Vec<Store>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_stores<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
) -> InventoryResult<Json<Vec<Store>>> {
    Ok(Json(service.list_stores().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = STORES_TAG,
    request_body = CreateStore,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_store<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    ValidatedJson(input): ValidatedJson<CreateStore>,
) -> InventoryResult<impl IntoResponse> {
    let store = service.create_store(input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store found", body = Store),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_store<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
) -> InventoryResult<Json<Store>> {
    Ok(Json(service.get_store(id).await?))
}

/// Rename a store. An empty body leaves it unchanged.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID")),
    request_body = UpdateStore,
    responses(
        (status = 200, description = "Store updated", body = Store),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_store<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateStore>,
) -> InventoryResult<Json<Store>> {
    Ok(Json(service.update_store(id, input).await?))
}

/// Delete a store and every product it holds
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 204, description = "Store deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_store<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
) -> InventoryResult<StatusCode> {
    service.delete_store(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Filtered, paginated products of one store. A `storeId` filter in the
/// query string is ignored in favour of the path.
#[utoipa::path(
    get,
    path = "/{id}/products",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID"), ProductQuery),
    responses(
        (status = 200, description = "One page of the store's products", body = ProductListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_store_products<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> InventoryResult<Json<ProductListResponse>> {
    Ok(Json(service.list_store_products(id, query).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/summary",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID"), SummaryQuery),
    responses(
        (status = 200, description = "Inventory totals for the store", body = StoreSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn store_summary<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
    ValidatedQuery(query): ValidatedQuery<SummaryQuery>,
) -> InventoryResult<Json<StoreSummary>> {
    Ok(Json(
        service.store_summary(id, query.low_stock_threshold).await?,
    ))
}

/// Filtered, paginated products across all stores
#[utoipa::path(
    get,
    path = "",
    tag = PRODUCTS_TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of matching products", body = ProductListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> InventoryResult<Json<ProductListResponse>> {
    Ok(Json(service.list_products(query).await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = PRODUCTS_TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestReferenceResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> InventoryResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
) -> InventoryResult<Json<Product>> {
    Ok(Json(service.get_product(id).await?))
}

/// Partial update; omitted fields keep their values
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> InventoryResult<Json<Product>> {
    Ok(Json(service.update_product(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: StoreRepository, P: ProductRepository>(
    State(service): SharedService<S, P>,
    UuidPath(id): UuidPath,
) -> InventoryResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
