use crate::state::AppState;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// The two periodic triggers of the board: refresh and carousel advance.
///
/// Both run until [`Scheduler::stop`] is awaited (or the scheduler is dropped,
/// which closes the shutdown channel).
pub struct Scheduler {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn start(state: AppState) -> Self {
        let (shutdown, rx) = watch::channel(false);
        let refresh_every = state.config.refresh_interval;
        let advance_every = state.config.advance_interval;

        info!(
            refresh_secs = refresh_every.as_secs_f64(),
            advance_secs = advance_every.as_secs_f64(),
            "starting board scheduler"
        );

        let tasks = vec![
            tokio::spawn(refresh_loop(state.clone(), refresh_every, rx.clone())),
            tokio::spawn(advance_loop(state, advance_every, rx)),
        ];

        Self { shutdown, tasks }
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            let _ = task.await;
        }
        info!("board scheduler stopped");
    }
}

async fn refresh_loop(state: AppState, every: Duration, mut shutdown: watch::Receiver<bool>) {
    // First tick completes immediately: that is the initial load.
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }
        debug!("refresh tick");
        tokio::select! {
            _ = state.refresh() => {}
            _ = shutdown.changed() => break,
        }
    }
}

async fn advance_loop(state: AppState, every: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = time::interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut board = state.board.lock().await;
                board.advance();
                debug!(index = ?board.index(), "carousel advanced");
            }
            _ = shutdown.changed() => break,
        }
    }
}
