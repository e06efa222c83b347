use crate::board::Board;
use crate::config::BoardConfig;
use crate::errors::ConfigError;
use crate::fetcher::{self, Fetcher};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<Board>>,
    pub fetcher: Fetcher,
    pub config: Arc<BoardConfig>,
}

impl AppState {
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let fetcher = Fetcher::new(config.deliveries_url.clone(), config.fetch_timeout)?;
        Ok(Self {
            board: Arc::new(Mutex::new(Board::new(config.failure_display))),
            fetcher,
            config: Arc::new(config),
        })
    }

    pub async fn refresh(&self) -> bool {
        fetcher::refresh(&self.board, &self.fetcher).await
    }

    /// Runs a refresh on its own task. It completes and applies even if the caller
    /// stops waiting, so the sequence number it took is never left dangling.
    pub fn spawn_refresh(&self) -> JoinHandle<bool> {
        let state = self.clone();
        tokio::spawn(async move { state.refresh().await })
    }
}
