use std::path::PathBuf;

use crate::window::TrailingWindow;

#[derive(Clone)]
pub struct AppConfig {
    pub climate_dataset_path: PathBuf,
    pub terrorism_dataset_path: PathBuf,
    /// Stand-in for "now" in every trailing-window computation.
    pub reference_year: i32,
    pub terrorism_window_years: u32,
    pub economic_window_years: u32,
    pub user_agent: String,
    pub log_level: String,
    pub newsapi_key: Option<String>,
    pub google_api_key: Option<String>,
    pub google_cx_id: Option<String>,
    pub twitter_bearer_token: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn terrorism_window(&self) -> TrailingWindow {
        TrailingWindow::new(self.reference_year, self.terrorism_window_years)
    }

    #[must_use]
    pub fn economic_window(&self) -> TrailingWindow {
        TrailingWindow::new(self.reference_year, self.economic_window_years)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("climate_dataset_path", &self.climate_dataset_path)
            .field("terrorism_dataset_path", &self.terrorism_dataset_path)
            .field("reference_year", &self.reference_year)
            .field("terrorism_window_years", &self.terrorism_window_years)
            .field("economic_window_years", &self.economic_window_years)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("google_cx_id", &self.google_cx_id)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
