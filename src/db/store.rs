//! Record store abstraction over the `Earthquake` table.

use crate::domain::{EarthquakeRecord, NewEarthquake, SchemaVariant};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Outcome of an insert as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub rows_affected: u64,
}

/// Storage backend for earthquake records.
///
/// The store alone assigns ids. Every call is an independent round trip;
/// implementations hold no cached results.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Table layout this store was opened with.
    fn variant(&self) -> SchemaVariant;

    /// Every record, in the store's natural order.
    async fn list_all(&self) -> Result<Vec<EarthquakeRecord>, StoreError>;

    /// Records with `magnitude >= threshold`, highest magnitude first.
    async fn list_by_min_magnitude(
        &self,
        threshold: f64,
    ) -> Result<Vec<EarthquakeRecord>, StoreError>;

    /// Insert one record. The id is present only when the layout has ids.
    async fn insert(&self, record: &NewEarthquake) -> Result<InsertInfo, StoreError>;

    /// Delete the record with `id`, returning the number of rows removed.
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;

    /// Remove every record and insert `records` atomically.
    async fn replace_all(&self, records: &[NewEarthquake]) -> Result<u64, StoreError>;

    /// Round-trip check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
