use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value_objects::{HourKey, HourLabel};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::status::format_balance;

/// Symbols listed in the stats headline.
pub const TOP_SYMBOLS: usize = 3;

/// One hour of activity as it appears on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySample {
    pub key: HourKey,
    pub label: HourLabel,
    pub alert_count: u32,
    /// Estimated, not reported by the server.
    pub trade_count: u32,
}

/// Parallel label/value vectors handed to a chart surface.
///
/// Always rebuilt from scratch; the three vectors share one length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub alert_counts: Vec<u32>,
    pub trade_counts: Vec<u32>,
}

impl ChartSeries {
    pub fn from_samples(samples: &[ActivitySample]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(samples.len()),
            alert_counts: Vec::with_capacity(samples.len()),
            trade_counts: Vec::with_capacity(samples.len()),
        };
        for sample in samples {
            series.labels.push(sample.label.value().to_string());
            series.alert_counts.push(sample.alert_count);
            series.trade_counts.push(sample.trade_count);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value across both series, for axis scaling.
    pub fn max_value(&self) -> u32 {
        self.alert_counts
            .iter()
            .chain(self.trade_counts.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn total_alerts(&self) -> u64 {
        self.alert_counts.iter().map(|&c| c as u64).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SymbolActivity {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub profit: f64,
}

/// `GET /api/stats?hours=N` body. `alerts_by_hour` drives the chart, the
/// totals feed [`StatsSummary`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub alerts_by_hour: HashMap<String, u32>,
    #[serde(default)]
    pub alerts_count: u32,
    #[serde(default)]
    pub trades_count: u32,
    #[serde(default)]
    pub successful_trades: u32,
    #[serde(default)]
    pub failed_trades: u32,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub trades_by_symbol: HashMap<String, SymbolActivity>,
}

impl StatsSnapshot {
    /// Normalised hour → count map. Unparseable keys are skipped; counts for
    /// keys that normalise to the same hour are summed.
    pub fn alerts_by_hour_key(&self) -> HashMap<HourKey, u32> {
        let mut buckets = HashMap::with_capacity(self.alerts_by_hour.len());
        for (raw, &count) in &self.alerts_by_hour {
            match HourKey::parse(raw) {
                Ok(key) => *buckets.entry(key).or_insert(0) += count,
                Err(reason) => get_logger().warn(LogComponent::Domain("StatsSnapshot"), &reason),
            }
        }
        buckets
    }

    pub fn summary(&self) -> StatsSummary {
        let mut symbols: Vec<SymbolTotal> = self
            .trades_by_symbol
            .iter()
            .map(|(symbol, activity)| SymbolTotal {
                symbol: symbol.clone(),
                trades: activity.count,
                profit: format_balance(activity.profit),
            })
            .collect();
        symbols.sort_by(|a, b| b.trades.cmp(&a.trades).then_with(|| a.symbol.cmp(&b.symbol)));
        symbols.truncate(TOP_SYMBOLS);

        StatsSummary {
            alerts: self.alerts_count,
            trades: self.trades_count,
            successful: self.successful_trades,
            failed: self.failed_trades,
            total_profit: format_balance(self.total_profit),
            top_symbols: symbols,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTotal {
    pub symbol: String,
    pub trades: u32,
    pub profit: String,
}

/// Window totals reported next to the hourly map, ready for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub alerts: u32,
    pub trades: u32,
    pub successful: u32,
    pub failed: u32,
    pub total_profit: String,
    /// Busiest symbols first, ties by name.
    pub top_symbols: Vec<SymbolTotal>,
}

impl StatsSummary {
    /// Whole-percent share of settled trades that succeeded.
    pub fn success_rate(&self) -> Option<u32> {
        let settled = self.successful as u64 + self.failed as u64;
        (settled > 0).then(|| ((self.successful as u64 * 100 + settled / 2) / settled) as u32)
    }

    pub fn headline(&self) -> String {
        let mut parts = vec![format!("{} alerts", self.alerts), format!("{} trades", self.trades)];
        if let Some(rate) = self.success_rate() {
            parts.push(format!("{} ok / {} failed ({rate}%)", self.successful, self.failed));
        }
        parts.push(format!("P/L {}", self.total_profit));
        if !self.top_symbols.is_empty() {
            let symbols: Vec<String> =
                self.top_symbols.iter().map(|total| format!("{} {}", total.symbol, total.trades)).collect();
            parts.push(symbols.join(", "));
        }
        parts.join(" | ")
    }
}
