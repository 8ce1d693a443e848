pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod source;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use source::{open_source, SalesSource};
pub use summary::summarize;
