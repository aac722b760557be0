pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;
pub mod views;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::CatalogError;

// Export all model types
pub use model::*;

// Export store types
pub use store::{DocumentStore, MemoryStore, PostgresStore};

use axum::Router;
use std::sync::Arc;

/// The full application router bound to a store handle.
pub fn build_app<S: DocumentStore + 'static>(store: Arc<S>) -> Router {
    routes::create_router().with_state(store)
}
