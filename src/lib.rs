//! Catalog Backend Library
//!
//! Product catalog CRUD over a pluggable store, with a single configured
//! identity that logs in for a JWT and uses it on mutating routes.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod store;

pub use api::{build_router, App, AppState};
pub use config::{Config, StoreBackend};
pub use error::ApiError;
pub use store::{MemoryProductStore, ProductStore, SqliteProductStore, StoreError};
