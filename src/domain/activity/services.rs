use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::entities::{ActivitySample, ChartSeries};
use super::value_objects::{HourKey, HourLabel};
use crate::time_utils::truncate_to_hour;

pub const DEFAULT_TRADE_RATIO: f64 = 0.8;

/// Source of the per-hour trade figure.
///
/// The stats endpoint reports no trades per hour, so the chart shows an
/// estimate derived from the alert count.
pub trait TradeEstimator {
    fn estimate(&self, alert_count: u32) -> u32;
}

/// `floor(alert_count * ratio)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioTradeEstimator {
    ratio: f64,
}

impl RatioTradeEstimator {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Default for RatioTradeEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_TRADE_RATIO)
    }
}

impl TradeEstimator for RatioTradeEstimator {
    fn estimate(&self, alert_count: u32) -> u32 {
        (alert_count as f64 * self.ratio).floor() as u32
    }
}

/// Turns a sparse hour → count map into a dense, chronological window.
pub struct HourlyBucketer<E: TradeEstimator = RatioTradeEstimator> {
    window_hours: u32,
    estimator: E,
}

impl HourlyBucketer<RatioTradeEstimator> {
    pub fn with_ratio(window_hours: u32, ratio: f64) -> Self {
        Self::new(window_hours, RatioTradeEstimator::new(ratio))
    }
}

impl<E: TradeEstimator> HourlyBucketer<E> {
    pub fn new(window_hours: u32, estimator: E) -> Self {
        Self {
            window_hours,
            estimator,
        }
    }

    pub fn window_hours(&self) -> u32 {
        self.window_hours
    }

    /// One sample per hour, oldest first, ending at the hour containing `now`.
    /// Every hour is labelled in the single offset `now` carries.
    pub fn samples(&self, alerts: &HashMap<HourKey, u32>, now: DateTime<FixedOffset>) -> Vec<ActivitySample> {
        let offset = *now.offset();
        self.samples_in_zone(alerts, now.with_timezone(&Utc), |_| offset)
    }

    /// Like [`HourlyBucketer::samples`], but each hour is labelled in the
    /// offset `offset_at` reports for that instant, so a window spanning a
    /// DST change shows the wall-clock hours that actually occurred.
    /// Hours absent from `alerts` count as zero.
    pub fn samples_in_zone<F>(
        &self,
        alerts: &HashMap<HourKey, u32>,
        now: DateTime<Utc>,
        offset_at: F,
    ) -> Vec<ActivitySample>
    where
        F: Fn(DateTime<Utc>) -> FixedOffset,
    {
        let current_hour = truncate_to_hour(now.with_timezone(&offset_at(now))).with_timezone(&Utc);
        (0..self.window_hours)
            .rev()
            .map(|hours_ago| {
                let instant = current_hour - Duration::hours(hours_ago as i64);
                let hour = instant.with_timezone(&offset_at(instant));
                let key = HourKey::from_hour(&hour);
                let alert_count = alerts.get(&key).copied().unwrap_or(0);
                ActivitySample {
                    label: HourLabel::from_hour(&hour),
                    trade_count: self.estimator.estimate(alert_count),
                    alert_count,
                    key,
                }
            })
            .collect()
    }

    pub fn bucket(&self, alerts: &HashMap<HourKey, u32>, now: DateTime<FixedOffset>) -> ChartSeries {
        ChartSeries::from_samples(&self.samples(alerts, now))
    }

    pub fn bucket_in_zone<F>(&self, alerts: &HashMap<HourKey, u32>, now: DateTime<Utc>, offset_at: F) -> ChartSeries
    where
        F: Fn(DateTime<Utc>) -> FixedOffset,
    {
        ChartSeries::from_samples(&self.samples_in_zone(alerts, now, offset_at))
    }
}
