//! SQLite persistence for cached external reads.
//!
//! This module provides:
//! - Database initialization, schema and pragma configuration
//! - `SqliteCacheStore`, the durable `CacheStore` backend

pub mod migrations;
pub mod store;

pub use migrations::init_db;
pub use store::SqliteCacheStore;
