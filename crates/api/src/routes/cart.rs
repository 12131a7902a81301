//! Checkout endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use common::OrderId;
use domain::CartLine;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartLineRequest>,
}

#[derive(Deserialize)]
pub struct CartLineRequest {
    pub item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    CartLine::DEFAULT_QUANTITY
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
    pub order_id: OrderId,
}

/// POST /api/cart/checkout: turn the submitted cart into an order.
#[tracing::instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(req) = payload?;
    let lines = req
        .items
        .into_iter()
        .map(|line| CartLine::new(line.item_id, line.quantity))
        .collect();

    let order_id = state.checkout.checkout(lines).await?;

    Ok(Json(CheckoutResponse {
        message: "Purchase successful",
        order_id,
    }))
}
