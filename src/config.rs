use serde::{Deserialize, Serialize};

use crate::domain::activity::DEFAULT_TRADE_RATIO;
use crate::domain::errors::{DashboardError, DashboardResult};

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 30_000;
pub const DEFAULT_STATS_WINDOW_HOURS: u32 = 24;
/// One week of hourly points.
pub const MAX_STATS_WINDOW_HOURS: u32 = 168;

/// Element ids the DOM targets read and write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub chart: String,
    pub status: String,
    pub account_panel: String,
    pub login: String,
    pub server: String,
    pub balance: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            chart: "activityChart".to_string(),
            status: "connection-status".to_string(),
            account_panel: "account-info".to_string(),
            login: "account-login".to_string(),
            server: "account-server".to_string(),
            balance: "account-balance".to_string(),
        }
    }
}

/// Dashboard settings, passed from JS as a plain object with camelCase keys.
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Prefix for API paths; empty means same origin.
    pub base_url: String,
    pub poll_interval_ms: u32,
    pub stats_window_hours: u32,
    pub trade_ratio: f64,
    pub elements: ElementIds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            stats_window_hours: DEFAULT_STATS_WINDOW_HOURS,
            trade_ratio: DEFAULT_TRADE_RATIO,
            elements: ElementIds::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DashboardError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u32) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_stats_window_hours(mut self, hours: u32) -> Self {
        self.stats_window_hours = hours;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(DashboardError::Config("pollIntervalMs must be positive".to_string()));
        }
        if !(1..=MAX_STATS_WINDOW_HOURS).contains(&self.stats_window_hours) {
            return Err(DashboardError::Config(format!(
                "statsWindowHours must be within 1..={MAX_STATS_WINDOW_HOURS}, got {}",
                self.stats_window_hours
            )));
        }
        if !self.trade_ratio.is_finite() || self.trade_ratio < 0.0 {
            return Err(DashboardError::Config(format!(
                "tradeRatio must be a non-negative number, got {}",
                self.trade_ratio
            )));
        }
        Ok(())
    }
}
