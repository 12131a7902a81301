//! Order history: every order with its line items and item titles.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use common::{ItemId, OrderId};
use sqlx::AnyConnection;
use store::Store;

use crate::{ReadModelError, Result};

const ORDER_LINES: &str = r#"
    SELECT oi.item_id, i.title, oi.quantity
    FROM order_items oi
    JOIN items i ON i.id = oi.item_id
    WHERE oi.order_id = $1
    ORDER BY oi.id ASC
"#;

/// One line of an order, with the catalog title attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub title: String,
    pub quantity: i64,
}

/// An order and its lines in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

impl OrderSummary {
    /// `created_at` as an ISO-8601 UTC string, e.g. `2026-10-19T08:30:00Z`.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Read-only view over persisted orders.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    store: Store,
}

impl OrderHistory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns all orders, highest id first, each with its line items.
    ///
    /// Runs one query for the orders and one per order for its lines on a
    /// single pooled connection, which goes back to the pool on return.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        metrics::counter!("order_history_queries_total").increment(1);

        let mut conn = self.store.pool().acquire().await?;

        let sql = format!(
            "SELECT id, {} AS created_at FROM orders ORDER BY id DESC",
            self.store.dialect().created_at_text()
        );
        let rows: Vec<(i64, String)> = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for (id, created_at) in rows {
            let items = order_lines(&mut conn, id).await?;
            orders.push(OrderSummary {
                order_id: OrderId::new(id),
                created_at: parse_created_at(&created_at)?,
                items,
            });
        }

        tracing::debug!(orders = orders.len(), "order history assembled");
        Ok(orders)
    }
}

async fn order_lines(conn: &mut AnyConnection, order_id: i64) -> Result<Vec<OrderLine>> {
    let rows: Vec<(i64, String, i64)> = sqlx::query_as(ORDER_LINES)
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(item_id, title, quantity)| OrderLine {
            item_id: ItemId::new(item_id),
            title,
            quantity,
        })
        .collect())
}

/// Parses the dialect's `created_at` text rendering (always UTC).
fn parse_created_at(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|source| ReadModelError::Timestamp {
            value: raw.to_string(),
            source,
        })
}
