use crate::models::{BoardView, HealthResponse};
use crate::state::AppState;
use crate::ui::{render_index, ShellMode};
use axum::{extract::State, response::Html, Json};
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let board = state.board.lock().await;
    Html(render_index(board.view(), ShellMode::Carousel))
}

pub async fn grid_page(State(state): State<AppState>) -> Html<String> {
    let board = state.board.lock().await;
    Html(render_index(&board.grid_view(), ShellMode::Grid))
}

pub async fn get_view(State(state): State<AppState>) -> Json<BoardView> {
    let board = state.board.lock().await;
    Json(board.view().clone())
}

pub async fn get_grid(State(state): State<AppState>) -> Json<BoardView> {
    let board = state.board.lock().await;
    Json(board.grid_view())
}

/// Manual refresh, independent of the timers. Fetch failures end up in the view.
/// The fetch runs detached, so a client hanging up does not abandon it.
pub async fn refresh(State(state): State<AppState>) -> Json<BoardView> {
    if let Err(err) = state.spawn_refresh().await {
        error!(error = %err, "manual refresh task failed");
    }
    let board = state.board.lock().await;
    Json(board.view().clone())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
