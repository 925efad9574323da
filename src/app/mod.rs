use axum::{middleware, Router};
use sqlx::SqlitePool;

/// Human-readable application name, used in templates and UI.
pub const APP_NAME: &str = "Perftrack";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// Every app route, behind the session resolver.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(features::auth::routes())
        .merge(features::dashboard::routes())
        .merge(features::employees::routes())
        .merge(features::positions::routes())
        .merge(features::tags::routes())
        .merge(features::profile::routes())
        .layer(middleware::from_fn_with_state(state, session::resolve_session))
}

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod session;
pub mod tenant;
