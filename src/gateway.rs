//! Query gateway: turns raw caller input into typed record-store calls.
//!
//! Both access surfaces (HTTP and CLI) go through [`QueryGateway`]. It parses
//! raw thresholds and ids, rejects payloads the active schema cannot store,
//! and hands back typed results. Presentation of failures is left to the
//! caller.

pub use crate::db::InsertInfo;

use crate::db::{RecordStore, StoreError};
use crate::domain::{EarthquakeRecord, NewEarthquake, SchemaVariant};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid magnitude threshold: {0:?}")]
    InvalidThreshold(String),
    #[error("invalid record id: {0:?}")]
    InvalidId(String),
    #[error("field `{0}` is not stored by the minimal schema")]
    UnsupportedField(&'static str),
    #[error("{0} requires the extended schema")]
    Unsupported(&'static str),
}

/// Outcome of a delete. Zero rows affected is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInfo {
    pub rows_affected: u64,
}

/// Parse a minimum-magnitude threshold. Only finite numbers are accepted.
pub fn parse_threshold(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Clone)]
pub struct QueryGateway {
    store: Arc<dyn RecordStore>,
}

impl QueryGateway {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.store.variant()
    }

    pub async fn list_all(&self) -> Result<Vec<EarthquakeRecord>, GatewayError> {
        Ok(self.store.list_all().await?)
    }

    /// Records at or above `threshold`, highest magnitude first.
    pub async fn list_by_min_magnitude(
        &self,
        threshold: &str,
    ) -> Result<Vec<EarthquakeRecord>, GatewayError> {
        let threshold = parse_threshold(threshold)
            .ok_or_else(|| GatewayError::InvalidThreshold(threshold.to_string()))?;
        Ok(self.store.list_by_min_magnitude(threshold).await?)
    }

    pub async fn insert(&self, record: NewEarthquake) -> Result<InsertInfo, GatewayError> {
        if self.variant() == SchemaVariant::Minimal {
            if let Some(field) = record.first_extended_field() {
                return Err(GatewayError::UnsupportedField(field));
            }
        }

        Ok(self.store.insert(&record).await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteInfo, GatewayError> {
        if !self.variant().has_ids() {
            return Err(GatewayError::Unsupported("delete by id"));
        }
        let parsed = id
            .trim()
            .parse::<i64>()
            .map_err(|_| GatewayError::InvalidId(id.to_string()))?;

        let rows_affected = self.store.delete_by_id(parsed).await?;
        Ok(DeleteInfo { rows_affected })
    }

    /// Replace the table contents with `records`. Returns the number inserted.
    pub async fn seed(&self, records: &[NewEarthquake]) -> Result<u64, GatewayError> {
        if self.variant() == SchemaVariant::Minimal {
            if let Some(field) = records.iter().find_map(NewEarthquake::first_extended_field) {
                return Err(GatewayError::UnsupportedField(field));
            }
        }
        Ok(self.store.replace_all(records).await?)
    }

    pub async fn ping(&self) -> Result<(), GatewayError> {
        Ok(self.store.ping().await?)
    }
}
