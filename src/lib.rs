pub mod config;
pub mod error;
pub mod i18n_manager;
pub mod models;
pub mod paginator;
pub mod report_processor;
pub mod report_store;
pub mod response_cache;
pub mod web_server;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use web_server::{build_router, start_server, AppState};
