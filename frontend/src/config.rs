use std::str::FromStr;

use log::Level;

/// Path prefix every backend route hangs off when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_LOG_LEVEL: Level = Level::Debug;

/// Settings baked into the bundle at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub log_level: Level,
}

impl ClientConfig {
    /// Honour `CAMPAIGN_API_BASE` and `CAMPAIGN_LOG_LEVEL` when they were set for the build.
    pub fn from_build_env() -> Self {
        Self::with_base(option_env!("CAMPAIGN_API_BASE").unwrap_or(DEFAULT_API_BASE))
            .log_level(option_env!("CAMPAIGN_LOG_LEVEL"))
    }

    pub fn with_base(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        Self {
            base_url: trimmed.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    /// Unknown level names keep the current level.
    pub fn log_level(mut self, raw: Option<&str>) -> Self {
        if let Some(level) = raw.and_then(|raw| Level::from_str(raw.trim()).ok()) {
            self.log_level = level;
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base(DEFAULT_API_BASE)
    }
}
