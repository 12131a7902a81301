//! Order history endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{ItemId, OrderId};
use read_model::OrderSummary;
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub item_id: ItemId,
    pub title: String,
    pub quantity: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub created_at: String,
    pub items: Vec<OrderLineResponse>,
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<OrderSummary> for OrderResponse {
    fn from(order: OrderSummary) -> Self {
        let created_at = order.created_at_iso();
        Self {
            order_id: order.order_id,
            created_at,
            items: order
                .items
                .into_iter()
                .map(|line| OrderLineResponse {
                    item_id: line.item_id,
                    title: line.title,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// GET /api/orders: every order, newest first, with its lines.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderListResponse>, ApiError> {
    let orders = state
        .order_history
        .list_orders()
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(Json(OrderListResponse { orders }))
}
