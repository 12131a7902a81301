//! Catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use common::ItemId;
use domain::NewItem;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub title: String,
}

#[derive(Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
}

#[derive(Serialize)]
pub struct ItemCreatedResponse {
    pub message: &'static str,
}

/// GET /api/items: the catalog, newest item first.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<ItemListResponse>, ApiError> {
    let items = state
        .catalog
        .list_items()
        .await?
        .into_iter()
        .map(|item| ItemResponse {
            id: item.id,
            title: item.title,
        })
        .collect();

    Ok(Json(ItemListResponse { items }))
}

/// POST /api/items: add a catalog item.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), ApiError> {
    let Json(req) = payload?;
    let item = NewItem::new(req.title).map_err(domain::DomainError::from)?;

    state.catalog.create_item(&item).await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse { message: "created" }),
    ))
}
