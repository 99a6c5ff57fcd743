//! Storefront catalog endpoints: listings, product detail, best products,
//! search, and the category list.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use voltcart_core::filters::{ListingMode, ProductQuerySpec};
use voltcart_db::{CategoryRow, FilterOptions, ProductRow};

use super::{ApiError, AppState};

const BEST_PRODUCTS_LIMIT: i64 = 4;

#[derive(Debug, Serialize)]
pub(super) struct ListingResponse {
    products: Vec<ProductRow>,
    #[serde(rename = "filterOptions")]
    filter_options: FilterOptions,
}

pub(super) async fn list_retail_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListingResponse>, ApiError> {
    list_products(&state, ListingMode::Retail, &params).await
}

pub(super) async fn list_wholesale_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListingResponse>, ApiError> {
    list_products(&state, ListingMode::Wholesale, &params).await
}

/// Shared listing flow: parse the parameter map into a typed spec, run the
/// query, then aggregate facets from the filtered rows plus the full
/// category list. Read-only; view counts are untouched here.
async fn list_products(
    state: &AppState,
    mode: ListingMode,
    params: &HashMap<String, String>,
) -> Result<Json<ListingResponse>, ApiError> {
    let spec = ProductQuerySpec::from_params(mode, params)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let products = voltcart_db::list_products(&state.pool, &spec)
        .await
        .map_err(|e| ApiError::store(&e))?;
    let categories = voltcart_db::list_categories(&state.pool)
        .await
        .map_err(|e| ApiError::store(&e))?;
    let filter_options = voltcart_db::collect_filter_options(mode, &products, categories);

    Ok(Json(ListingResponse {
        products,
        filter_options,
    }))
}

#[derive(Debug, Serialize)]
pub(super) struct ProductResponse {
    product: Option<ProductRow>,
}

/// Detail view. Fetches the row, then bumps the view counter as a separate
/// atomic statement; a missing id yields `product: null` and touches zero
/// rows.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = voltcart_db::get_product(&state.pool, id)
        .await
        .map_err(|e| ApiError::store(&e))?;
    voltcart_db::increment_views(&state.pool, id)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(ProductResponse { product }))
}

#[derive(Debug, Serialize)]
pub(super) struct BestProductsResponse {
    #[serde(rename = "bestProducts")]
    best_products: Vec<ProductRow>,
}

pub(super) async fn best_products(
    State(state): State<AppState>,
) -> Result<Json<BestProductsResponse>, ApiError> {
    let best_products = voltcart_db::list_best_products(&state.pool, BEST_PRODUCTS_LIMIT)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(BestProductsResponse { best_products }))
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    products: Vec<ProductRow>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = params
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::validation("query parameter is missing"))?;

    let products = voltcart_db::search_by_model(&state.pool, term)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(SearchResponse { products }))
}

#[derive(Debug, Serialize)]
pub(super) struct CategoriesResponse {
    categories: Vec<CategoryRow>,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = voltcart_db::list_categories(&state.pool)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(CategoriesResponse { categories }))
}
