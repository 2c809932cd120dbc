//! Database module for the earthquake record store.
//!
//! This module provides:
//! - Database initialization and table creation per schema variant
//! - SQLite pragma configuration
//! - The `RecordStore` trait with SQLite and in-memory implementations

pub mod memory;
pub mod migrations;
pub mod repo;
pub mod store;

pub use memory::MemoryStore;
pub use migrations::init_db;
pub use repo::Repository;
pub use store::{InsertInfo, RecordStore, StoreError};
