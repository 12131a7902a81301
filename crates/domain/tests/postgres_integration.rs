//! PostgreSQL checkout tests
//!
//! These tests use a shared PostgreSQL container and exercise the
//! `RETURNING` id strategy end to end, including the order history read.
//! Run with:
//!
//! ```bash
//! cargo test -p domain --test postgres_integration
//! ```

use std::sync::Arc;

use domain::{CartLine, CheckoutTransactor, DomainError, OrderId};
use read_model::OrderHistory;
use serial_test::serial;
use store::{Capabilities, Store, StoreConfig, StoreError};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a store with a freshly created and seeded schema
async fn get_test_store() -> Store {
    let info = get_container_info().await;
    let store = Store::connect(StoreConfig::new(info.connection_string.clone()))
        .await
        .unwrap();

    sqlx::query("DROP TABLE IF EXISTS order_items, orders, items CASCADE")
        .execute(store.pool())
        .await
        .unwrap();
    store.ensure_schema().await.unwrap();

    store
}

async fn count(store: &Store, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
async fn checkout_returns_generated_order_id() {
    let store = get_test_store().await;
    let transactor = CheckoutTransactor::new(store.clone());

    let order_id = transactor
        .checkout(vec![CartLine::new(1, 3)])
        .await
        .unwrap();

    assert_eq!(order_id, OrderId::new(1));
    assert_eq!(count(&store, "order_items").await, 1);
}

#[tokio::test]
#[serial]
async fn checkout_then_history_shows_nested_order() {
    let store = get_test_store().await;
    let transactor = CheckoutTransactor::new(store.clone());
    let history = OrderHistory::new(store);

    let first = transactor
        .checkout(vec![CartLine::new(2, 1)])
        .await
        .unwrap();
    let second = transactor
        .checkout(vec![CartLine::new(1, 2), CartLine::new(2, 1)])
        .await
        .unwrap();

    let orders = history.list_orders().await.unwrap();

    assert_eq!(
        orders.iter().map(|o| o.order_id).collect::<Vec<_>>(),
        vec![second, first]
    );
    let lines: Vec<(i64, &str, i64)> = orders[0]
        .items
        .iter()
        .map(|l| (l.item_id.as_i64(), l.title.as_str(), l.quantity))
        .collect();
    assert_eq!(lines, vec![(1, "Sản phẩm A", 2), (2, "Sản phẩm B", 1)]);
    assert!(orders[0].created_at_iso().ends_with('Z'));
}

#[tokio::test]
#[serial]
async fn dangling_item_rolls_back_whole_checkout() {
    let store = get_test_store().await;
    let transactor = CheckoutTransactor::new(store.clone());

    let err = transactor
        .checkout(vec![CartLine::new(1, 1), CartLine::new(999, 1)])
        .await
        .unwrap_err();

    match err {
        DomainError::TransactionFailed(ref cause) => assert!(cause.is_foreign_key_violation()),
        other => panic!("expected TransactionFailed, got {other:?}"),
    }
    assert_eq!(count(&store, "orders").await, 0);
    assert_eq!(count(&store, "order_items").await, 0);
}

#[tokio::test]
#[serial]
async fn missing_rowid_facility_fails_and_rolls_back() {
    // Postgres reports no last-inserted id, so disabling RETURNING must fail
    // loudly instead of guessing an id.
    let store = get_test_store().await.with_capabilities(Capabilities {
        returning_clause: false,
    });
    let transactor = CheckoutTransactor::new(store.clone());

    let err = transactor
        .checkout(vec![CartLine::new(1, 1)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::TransactionFailed(StoreError::MissingGeneratedId { table: "orders" })
    ));
    assert_eq!(count(&store, "orders").await, 0);
}

#[tokio::test]
#[serial]
async fn cart_beyond_one_statement_bind_limit_is_written_whole() {
    let store = get_test_store().await;
    let transactor = CheckoutTransactor::new(store.clone());
    let lines: Vec<_> = (0..22_000).map(|i| CartLine::new(i % 2 + 1, 1)).collect();

    let order_id = transactor.checkout(lines).await.unwrap();

    assert_eq!(order_id, OrderId::new(1));
    assert_eq!(count(&store, "order_items").await, 22_000);
}

#[tokio::test]
#[serial]
async fn concurrent_checkouts_on_pooled_connections() {
    let store = get_test_store().await;
    let transactor = CheckoutTransactor::new(store.clone());

    let handles: Vec<_> = (1..=20)
        .map(|quantity| {
            let transactor = transactor.clone();
            tokio::spawn(async move {
                transactor
                    .checkout(vec![CartLine::new(1, quantity), CartLine::new(2, quantity)])
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 20);
    assert_eq!(count(&store, "order_items").await, 40);
}
