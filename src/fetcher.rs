use crate::board::Board;
use crate::errors::{ConfigError, FetchFailure};
use crate::models::ToursSnapshot;
use chrono::Local;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// HTTP client for the tours endpoint.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<ToursSnapshot, FetchFailure> {
        let snapshot = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<ToursSnapshot>()
            .await?;
        Ok(snapshot)
    }
}

/// One refresh cycle. The board lock is released while the request is in flight,
/// and the outcome is dropped if a newer request was issued meanwhile.
///
/// Returns whether the outcome was applied. Failures never propagate.
pub async fn refresh(board: &Mutex<Board>, fetcher: &Fetcher) -> bool {
    let seq = board.lock().await.begin_request();
    let outcome = fetcher.fetch().await;
    let now = Local::now();

    let mut board = board.lock().await;
    let applied = match outcome {
        Ok(snapshot) => {
            let count = snapshot.cards.len();
            let applied = board.apply_snapshot(seq, snapshot.cards, now);
            if applied {
                info!(seq, cards = count, cached = snapshot.cached, "tours refreshed");
            }
            applied
        }
        Err(err) => {
            warn!(seq, url = %fetcher.url(), error = %err, "tour refresh failed");
            board.apply_failure(seq, now)
        }
    };

    if !applied {
        debug!(seq, "discarding stale refresh result");
    }
    applied
}
