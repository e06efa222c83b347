pub mod app;
pub mod board;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod markup;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::BoardConfig;
pub use scheduler::Scheduler;
pub use state::AppState;
