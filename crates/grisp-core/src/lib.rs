//! Shared configuration, time windows and text renderings for the GRiSP
//! indicator adapters.

pub mod app_config;
pub mod config;
pub mod error;
pub mod format;
pub mod window;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use window::TrailingWindow;
