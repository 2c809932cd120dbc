//! Domain types for earthquake observations.
//!
//! This module provides:
//! - `EarthquakeRecord` and the `NewEarthquake` insert payload
//! - `SchemaVariant`, the minimal/extended table layout switch
//! - Reference seed observations

pub mod earthquake;
pub mod schema;
pub mod seed;

pub use earthquake::{EarthquakeRecord, NewEarthquake};
pub use schema::SchemaVariant;
pub use seed::reference_records;
