//! In-memory record store for testing without a database file.

use super::store::{InsertInfo, RecordStore, StoreError};
use crate::domain::{EarthquakeRecord, NewEarthquake, SchemaVariant};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<EarthquakeRecord>,
    last_id: i64,
}

/// Record store that keeps rows in a vector, mirroring the SQLite table's
/// NOT NULL magnitude and never reusing ids.
#[derive(Debug)]
pub struct MemoryStore {
    variant: SchemaVariant,
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new(variant: SchemaVariant) -> Self {
        Self {
            variant,
            table: Mutex::new(Table::default()),
        }
    }

    fn build_row(
        &self,
        table: &mut Table,
        record: &NewEarthquake,
    ) -> Result<EarthquakeRecord, StoreError> {
        let name = record.name.clone();
        let magnitude = record.magnitude.ok_or_else(|| {
            StoreError::Constraint("NOT NULL constraint failed: Earthquake.Magnitude".into())
        })?;

        let row = match self.variant {
            SchemaVariant::Minimal => EarthquakeRecord {
                id: None,
                name,
                magnitude,
                occurrence: None,
                longitude: None,
                latitude: None,
            },
            SchemaVariant::Extended => {
                table.last_id += 1;
                EarthquakeRecord {
                    id: Some(table.last_id),
                    name,
                    magnitude,
                    occurrence: record.occurrence,
                    longitude: record.longitude,
                    latitude: record.latitude,
                }
            }
        };
        Ok(row)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(SchemaVariant::default())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn variant(&self) -> SchemaVariant {
        self.variant
    }

    async fn list_all(&self) -> Result<Vec<EarthquakeRecord>, StoreError> {
        Ok(self.table.lock().await.rows.clone())
    }

    async fn list_by_min_magnitude(
        &self,
        threshold: f64,
    ) -> Result<Vec<EarthquakeRecord>, StoreError> {
        let mut matching: Vec<EarthquakeRecord> = self
            .table
            .lock()
            .await
            .rows
            .iter()
            .filter(|r| r.magnitude >= threshold)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
        Ok(matching)
    }

    async fn insert(&self, record: &NewEarthquake) -> Result<InsertInfo, StoreError> {
        let mut table = self.table.lock().await;
        let row = self.build_row(&mut table, record)?;
        let id = row.id;
        table.rows.push(row);
        Ok(InsertInfo {
            id,
            rows_affected: 1,
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let mut table = self.table.lock().await;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != Some(id));
        Ok((before - table.rows.len()) as u64)
    }

    async fn replace_all(&self, records: &[NewEarthquake]) -> Result<u64, StoreError> {
        let mut table = self.table.lock().await;
        let mut staged = Table {
            rows: Vec::with_capacity(records.len()),
            last_id: table.last_id,
        };
        for record in records {
            let row = self.build_row(&mut staged, record)?;
            staged.rows.push(row);
        }
        *table = staged;
        Ok(records.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
