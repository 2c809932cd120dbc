//! SQLite-backed record store.

use crate::db::store::{InsertInfo, RecordStore, StoreError};
use crate::domain::{EarthquakeRecord, NewEarthquake, SchemaVariant};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for the `Earthquake` table.
pub struct Repository {
    pool: SqlitePool,
    variant: SchemaVariant,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    ///
    /// `variant` must match the layout the pool was migrated with.
    pub fn new(pool: SqlitePool, variant: SchemaVariant) -> Self {
        Repository { pool, variant }
    }

    fn select_columns(&self) -> &'static str {
        match self.variant {
            SchemaVariant::Minimal => "SELECT Name AS name, Magnitude AS magnitude FROM Earthquake",
            SchemaVariant::Extended => {
                "SELECT ID AS id, Name AS name, Magnitude AS magnitude, \
                 Occurrence AS occurrence, Longitude AS longitude, Latitude AS latitude \
                 FROM Earthquake"
            }
        }
    }

    fn map_row(&self, row: &SqliteRow) -> Result<EarthquakeRecord, sqlx::Error> {
        let name: Option<String> = row.try_get("name")?;
        let magnitude: f64 = row.try_get("magnitude")?;

        let record = match self.variant {
            SchemaVariant::Minimal => EarthquakeRecord {
                id: None,
                name,
                magnitude,
                occurrence: None,
                longitude: None,
                latitude: None,
            },
            SchemaVariant::Extended => {
                let id: i64 = row.try_get("id")?;
                let occurrence_str: Option<String> = row.try_get("occurrence")?;
                let occurrence = occurrence_str.and_then(|s| {
                    NaiveDate::parse_from_str(&s, DATE_FORMAT)
                        .map_err(|e| {
                            warn!(
                                id,
                                occurrence = %s,
                                error = %e,
                                "Failed to parse occurrence date, leaving it empty"
                            );
                        })
                        .ok()
                });

                EarthquakeRecord {
                    id: Some(id),
                    name,
                    magnitude,
                    occurrence,
                    longitude: row.try_get("longitude")?,
                    latitude: row.try_get("latitude")?,
                }
            }
        };
        Ok(record)
    }

    async fn insert_with<'e, E>(
        &self,
        executor: E,
        record: &NewEarthquake,
    ) -> Result<InsertInfo, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        match self.variant {
            SchemaVariant::Minimal => {
                let result = sqlx::query("INSERT INTO Earthquake (Name, Magnitude) VALUES (?, ?)")
                    .bind(record.name.as_deref())
                    .bind(record.magnitude)
                    .execute(executor)
                    .await?;
                Ok(InsertInfo {
                    id: None,
                    rows_affected: result.rows_affected(),
                })
            }
            SchemaVariant::Extended => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO Earthquake (Name, Magnitude, Occurrence, Longitude, Latitude)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(record.name.as_deref())
                .bind(record.magnitude)
                .bind(record.occurrence.map(|d| d.format(DATE_FORMAT).to_string()))
                .bind(record.longitude)
                .bind(record.latitude)
                .execute(executor)
                .await?;
                Ok(InsertInfo {
                    id: Some(result.last_insert_rowid()),
                    rows_affected: result.rows_affected(),
                })
            }
        }
    }
}

#[async_trait]
impl RecordStore for Repository {
    fn variant(&self) -> SchemaVariant {
        self.variant
    }

    async fn list_all(&self) -> Result<Vec<EarthquakeRecord>, StoreError> {
        let rows = sqlx::query(self.select_columns())
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| self.map_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn list_by_min_magnitude(
        &self,
        threshold: f64,
    ) -> Result<Vec<EarthquakeRecord>, StoreError> {
        let sql = format!(
            "{} WHERE Magnitude >= ? ORDER BY Magnitude DESC",
            self.select_columns()
        );
        let rows = sqlx::query(&sql)
            .bind(threshold)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| self.map_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn insert(&self, record: &NewEarthquake) -> Result<InsertInfo, StoreError> {
        let info = self.insert_with(&self.pool, record).await?;
        debug!(id = ?info.id, rows = info.rows_affected, "Inserted earthquake");
        Ok(info)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM Earthquake WHERE ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn replace_all(&self, records: &[NewEarthquake]) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM Earthquake")
            .execute(&mut *tx)
            .await?;

        let mut inserted = 0u64;
        for record in records {
            inserted += self.insert_with(&mut *tx, record).await?.rows_affected;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::domain::reference_records;
    use tempfile::TempDir;

    async fn setup_repo(variant: SchemaVariant) -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path, variant, 5).await.expect("init_db failed");
        (Repository::new(pool, variant), temp_dir)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;

        let first = repo
            .insert(&NewEarthquake::simple("Earthquake 1", 2.2))
            .await
            .unwrap();
        let second = repo
            .insert(&NewEarthquake::simple("Earthquake 2", 7.0))
            .await
            .unwrap();

        assert_eq!(first.rows_affected, 1);
        assert_eq!(second.rows_affected, 1);
        assert!(second.id.unwrap() > first.id.unwrap());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;

        let id = repo
            .insert(&NewEarthquake::simple("Earthquake 1", 2.2))
            .await
            .unwrap()
            .id
            .unwrap();
        assert_eq!(repo.delete_by_id(id).await.unwrap(), 1);

        let next = repo
            .insert(&NewEarthquake::simple("Earthquake 2", 7.0))
            .await
            .unwrap()
            .id
            .unwrap();
        assert!(next > id);
    }

    #[tokio::test]
    async fn test_extended_round_trips_date_and_location() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;
        let occurrence = NaiveDate::from_ymd_opt(2016, 3, 19).unwrap();

        repo.insert(
            &NewEarthquake::simple("Earthquake 7", 6.6)
                .with_occurrence(occurrence)
                .with_location(-104.990251, 39.739236),
        )
        .await
        .unwrap();

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].occurrence, Some(occurrence));
        assert_eq!(records[0].longitude, Some(-104.990251));
        assert_eq!(records[0].latitude, Some(39.739236));
    }

    #[tokio::test]
    async fn test_missing_magnitude_is_a_database_error() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;

        let err = repo
            .insert(&NewEarthquake {
                name: Some("No magnitude".to_string()),
                ..NewEarthquake::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_missing_name_is_stored_as_null() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;

        let info = repo
            .insert(&NewEarthquake {
                magnitude: Some(3.0),
                ..NewEarthquake::default()
            })
            .await
            .unwrap();
        assert_eq!(info.rows_affected, 1);

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, info.id);
        assert_eq!(records[0].name, None);
        assert_eq!(records[0].magnitude, 3.0);
    }

    #[tokio::test]
    async fn test_undecodable_magnitude_is_a_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("legacy.db")
            .to_string_lossy()
            .to_string();

        // A table created before this service, with no NOT NULL on Magnitude.
        let legacy = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .unwrap();
        sqlx::query("CREATE TABLE Earthquake (Name VARCHAR(20), Magnitude REAL)")
            .execute(&legacy)
            .await
            .unwrap();
        sqlx::query("INSERT INTO Earthquake (Name, Magnitude) VALUES ('x', 'big')")
            .execute(&legacy)
            .await
            .unwrap();
        legacy.close().await;

        let pool = init_db(&db_path, SchemaVariant::Minimal, 1)
            .await
            .expect("init_db failed");
        let repo = Repository::new(pool, SchemaVariant::Minimal);

        let err = repo.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));

        let err = repo.list_by_min_magnitude(0.0).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_minimal_insert_and_list() {
        let (repo, _temp) = setup_repo(SchemaVariant::Minimal).await;

        let info = repo
            .insert(&NewEarthquake::simple("Earthquake 3", 1.8))
            .await
            .unwrap();
        assert_eq!(info.id, None);
        assert_eq!(info.rows_affected, 1);

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].name.as_deref(), Some("Earthquake 3"));
        assert_eq!(records[0].magnitude, 1.8);
    }

    #[tokio::test]
    async fn test_replace_all_clears_previous_rows() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;
        repo.insert(&NewEarthquake::simple("Stale", 9.9))
            .await
            .unwrap();

        let inserted = repo
            .replace_all(&reference_records(SchemaVariant::Extended))
            .await
            .unwrap();
        assert_eq!(inserted, 7);

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| r.name.as_deref() != Some("Stale")));
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_on_failure() {
        let (repo, _temp) = setup_repo(SchemaVariant::Extended).await;
        repo.insert(&NewEarthquake::simple("Kept", 3.3))
            .await
            .unwrap();

        let batch = vec![
            NewEarthquake::simple("Fine", 1.0),
            NewEarthquake::default(),
        ];
        assert!(repo.replace_all(&batch).await.is_err());

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Kept"));
    }

    #[tokio::test]
    async fn test_ping() {
        let (repo, _temp) = setup_repo(SchemaVariant::Minimal).await;
        repo.ping().await.unwrap();
    }
}
