use std::path::PathBuf;
use std::time::Duration;

/// Explicit configuration for the asset-fetch stage.
///
/// Rate limiting lives here rather than in ambient module state so tests can
/// run the stage with a no-delay configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Remote base URL; assets are requested as `<base_url>/<hex>.svg`.
    pub base_url: String,
    /// Directory receiving one `u<hex>.svg` file per identifier.
    pub output_dir: PathBuf,
    /// Minimum delay between remote requests (fair use toward the host).
    pub delay: Duration,
    /// Bounded retry count per asset after the first attempt.
    pub retries: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            output_dir: output_dir.into(),
            delay: Duration::from_millis(100),
            retries: 2,
            timeout: Duration::from_secs(30),
            user_agent: concat!("kanji-build/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// No-delay configuration for unit tests.
    #[must_use]
    pub fn without_delay(mut self) -> Self {
        self.delay = Duration::ZERO;
        self
    }
}
