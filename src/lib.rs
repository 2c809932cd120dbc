pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod gateway;

pub use config::Config;
pub use db::{init_db, MemoryStore, RecordStore, Repository, StoreError};
pub use domain::{EarthquakeRecord, NewEarthquake, SchemaVariant};
pub use error::AppError;
pub use gateway::{DeleteInfo, GatewayError, InsertInfo, QueryGateway};
