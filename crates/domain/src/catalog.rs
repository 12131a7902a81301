//! Catalog service: list and add items.

use common::ItemId;
use store::{Store, StoreError};

use crate::error::DomainError;
use crate::item::{Item, NewItem};

/// Read and append access to the `items` table.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns every item, newest (highest id) first.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, DomainError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, title FROM items ORDER BY id DESC")
                .fetch_all(self.store.pool())
                .await
                .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| Item {
                id: ItemId::new(id),
                title,
            })
            .collect())
    }

    /// Inserts a validated item.
    #[tracing::instrument(skip(self, item), fields(title = item.title()))]
    pub async fn create_item(&self, item: &NewItem) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO items (title) VALUES ($1)")
            .bind(item.title())
            .execute(self.store.pool())
            .await
            .map_err(StoreError::from)?;

        metrics::counter!("items_created_total").increment(1);
        tracing::debug!("catalog item created");
        Ok(())
    }
}
