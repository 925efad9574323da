pub mod app;
pub mod seeds;

use axum::Router;
use sqlx::SqlitePool;

/// Build the full application router. Used by main and by integration tests.
pub fn create_router(pool: SqlitePool) -> Router {
    let state = app::AppState { db: pool };
    Router::new()
        .merge(app::routes(state.clone()))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
