//! Checkout: cart in, order out, all inside one transaction.

use std::time::Instant;

use common::OrderId;
use sqlx::AnyConnection;
use store::{Store, StoreError};
use tracing::{info, warn};

use crate::cart::{Cart, CartLine};
use crate::error::DomainError;

const INSERT_ORDER: &str = "INSERT INTO orders (created_at) VALUES (CURRENT_TIMESTAMP)";
const INSERT_ORDER_RETURNING: &str =
    "INSERT INTO orders (created_at) VALUES (CURRENT_TIMESTAMP) RETURNING id";

/// Turns carts into persisted orders.
///
/// Every checkout runs in its own transaction on a pooled connection. The
/// order row and all of its line items commit together or not at all; on
/// failure (or if the future is dropped mid-flight) nothing is visible to
/// later readers.
#[derive(Debug, Clone)]
pub struct CheckoutTransactor {
    store: Store,
}

impl CheckoutTransactor {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates one order with one line item per cart line and returns its id.
    ///
    /// Empty carts and non-positive quantities are rejected before a
    /// transaction is opened. Store failures roll everything back and are
    /// reported as [`DomainError::TransactionFailed`]; no retry is attempted.
    #[tracing::instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn checkout(&self, lines: Vec<CartLine>) -> Result<OrderId, DomainError> {
        let cart = Cart::new(lines)?;

        metrics::counter!("checkout_total").increment(1);
        let started = Instant::now();

        match self.persist(&cart).await {
            Ok(order_id) => {
                metrics::histogram!("checkout_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                metrics::counter!("order_lines_inserted_total").increment(cart.line_count() as u64);
                info!(%order_id, lines = cart.line_count(), "checkout committed");
                Ok(order_id)
            }
            Err(err) => {
                metrics::counter!("checkout_failed_total").increment(1);
                warn!(error = %err, "checkout rolled back");
                Err(DomainError::TransactionFailed(err))
            }
        }
    }

    async fn persist(&self, cart: &Cart) -> store::Result<OrderId> {
        let mut tx = self.store.begin().await?;
        let written = self.write_order(&mut *tx, cart).await;

        match written {
            Ok(order_id) => {
                tx.commit().await?;
                Ok(order_id)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "explicit rollback failed, connection will be reset");
                }
                Err(err)
            }
        }
    }

    async fn write_order(&self, conn: &mut AnyConnection, cart: &Cart) -> store::Result<OrderId> {
        let order_id = self.insert_order(conn).await?;
        let rows_per_statement = rows_per_statement(self.store.dialect().max_bind_parameters());
        insert_line_items(conn, order_id, cart, rows_per_statement).await?;
        Ok(order_id)
    }

    /// Inserts the order row and reads back its generated id, using
    /// `RETURNING` when the backend supports it and the connection's
    /// last-inserted id otherwise.
    async fn insert_order(&self, conn: &mut AnyConnection) -> store::Result<OrderId> {
        let dialect = self.store.dialect();
        let id = if dialect.capabilities().returning_clause {
            sqlx::query_scalar::<_, i64>(INSERT_ORDER_RETURNING)
                .fetch_one(&mut *conn)
                .await?
        } else {
            let result = sqlx::query(INSERT_ORDER).execute(&mut *conn).await?;
            match dialect.last_insert_id_sql() {
                Some(sql) => {
                    sqlx::query_scalar::<_, i64>(sql)
                        .fetch_one(&mut *conn)
                        .await?
                }
                None => result
                    .last_insert_id()
                    .ok_or(StoreError::MissingGeneratedId { table: "orders" })?,
            }
        };

        Ok(OrderId::new(id))
    }
}

/// Writes the cart lines with as few multi-row inserts as the backend's
/// bind limit allows.
async fn insert_line_items(
    conn: &mut AnyConnection,
    order_id: OrderId,
    cart: &Cart,
    rows_per_statement: usize,
) -> store::Result<()> {
    let mut written = 0;
    for chunk in cart.lines().chunks(rows_per_statement) {
        let sql = line_items_insert_sql(chunk.len());

        let mut query = sqlx::query(&sql);
        for line in chunk {
            query = query
                .bind(order_id.as_i64())
                .bind(line.item_id.as_i64())
                .bind(line.quantity);
        }

        written += query.execute(&mut *conn).await?.rows_affected();
    }

    let expected = cart.line_count() as u64;
    if written != expected {
        return Err(StoreError::RowCount {
            table: "order_items",
            expected,
            actual: written,
        });
    }

    Ok(())
}

const PARAMS_PER_LINE: usize = 3;

fn rows_per_statement(max_bind_parameters: usize) -> usize {
    (max_bind_parameters / PARAMS_PER_LINE).max(1)
}

fn line_items_insert_sql(rows: usize) -> String {
    let mut sql = String::from("INSERT INTO order_items (order_id, item_id, quantity) VALUES ");
    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        let first = row * PARAMS_PER_LINE + 1;
        sql.push_str(&format!("(${}, ${}, ${})", first, first + 1, first + 2));
    }
    sql
}
