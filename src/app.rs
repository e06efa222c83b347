use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/grid", get(handlers::grid_page))
        .route("/api/view", get(handlers::get_view))
        .route("/api/grid", get(handlers::get_grid))
        .route("/api/refresh", post(handlers::refresh))
        .route("/health", get(handlers::health))
        .with_state(state)
}
