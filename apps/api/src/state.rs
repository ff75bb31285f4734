use sqlx::PgPool;

use std::sync::Arc;

use crate::auth::Authenticator;
use crate::pipeline::Pipeline;
use crate::storage::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: Arc<dyn DocumentStore>,
    /// Session lookup for the CRUD routes. The pipeline holds its own handle.
    pub authenticator: Arc<dyn Authenticator>,
    pub pipeline: Pipeline,
}
