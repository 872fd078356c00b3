use std::time::Duration;
use tracing::warn;

use crate::leaderboard::RefreshConfig;

/// Runtime configuration for the scoreboard server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,
    pub refresh: RefreshConfig,
    /// Load the demo competition on startup
    pub seed_demo_data: bool,
    /// Modality whose live leaderboard is logged, if any
    pub watch_modality: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            refresh: RefreshConfig::default(),
            seed_demo_data: true,
            watch_modality: None,
        }
    }
}

impl AppConfig {
    /// Reads overrides from `SCOREBOARD_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("SCOREBOARD_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(raw) = lookup("SCOREBOARD_REFRESH_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.refresh.interval = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid SCOREBOARD_REFRESH_SECS"),
            }
        }

        if let Some(raw) = lookup("SCOREBOARD_SEED_DEMO") {
            match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.seed_demo_data = true,
                "0" | "false" | "no" => config.seed_demo_data = false,
                _ => warn!(value = %raw, "Ignoring invalid SCOREBOARD_SEED_DEMO"),
            }
        }

        config.watch_modality = lookup("SCOREBOARD_WATCH_MODALITY").filter(|id| !id.is_empty());

        config
    }
}
