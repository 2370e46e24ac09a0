use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    error::{store_err, AppError, AppResult},
    models::{Product, ProductPayload},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    debug!("GET /products");

    let start = Instant::now();
    let products = state
        .products
        .find_all()
        .await
        .map_err(store_err("An exception occurred while retrieving all products"))?;

    info!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok((StatusCode::OK, Json(products)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<Product>)> {
    debug!("GET /products/{}", id);

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(store_err(format!(
            "An exception occurred while retrieving product id {}",
            id
        )))?
        .ok_or_else(|| {
            warn!("GET /products/{}: product not found", id);
            AppError::product_not_found(id)
        })?;

    Ok((StatusCode::OK, Json(product)))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    debug!(name = %payload.name, "POST /product");

    let failure = format!(
        "An exception occurred while creating product with name: {}",
        payload.name
    );
    let product = state
        .products
        .save(Product::new(payload.name))
        .await
        .map_err(store_err(failure))?;

    info!(id = ?product.id, name = %product.name, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    debug!(name = %payload.name, "PUT /product/{}", id);

    let failure = format!("An exception occurred while updating product with id {}", id);

    let mut product = state
        .products
        .find_by_id(id)
        .await
        .map_err(store_err(failure.clone()))?
        .ok_or_else(|| {
            warn!("PUT /product/{}: existing product not found", id);
            AppError::product_not_found(id)
        })?;

    product.name = payload.name;
    let product = state
        .products
        .save(product)
        .await
        .map_err(store_err(failure))?;

    info!(id, name = %product.name, "Updated product");

    Ok((StatusCode::OK, Json(product)))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    debug!("DELETE /product/{}", id);

    let failure = format!("An exception occurred while deleting id: {}", id);

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(store_err(failure.clone()))?
        .ok_or_else(|| {
            warn!("DELETE /product/{}: existing product not found", id);
            AppError::product_not_found(id)
        })?;

    state
        .products
        .delete(&product)
        .await
        .map_err(store_err(failure))?;

    info!(id, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("Product with id {} deleted", id) })),
    ))
}
