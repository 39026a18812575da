use crate::domain::activity::ChartSeries;
use crate::domain::chart::ChartOptions;

const PADDING: f64 = 40.0;
const LEGEND_SPACE: f64 = 28.0;
const AXIS_LABEL_SPACE: f64 = 24.0;
/// At most this many y labels; integer ticks are thinned out above it.
const MAX_Y_LABELS: usize = 8;
/// At most this many x labels; hourly labels are thinned out above it.
const MAX_X_LABELS: usize = 12;

/// Pixel mapping for a line chart with integer y ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub left: f64,
    pub top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub y_max: u32,
    pub points: usize,
    ticks: Vec<u32>,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, series: &ChartSeries, options: &ChartOptions) -> Self {
        let ticks = options.y_ticks(series.max_value());
        let y_max = ticks.last().copied().unwrap_or(1).max(1);
        let left = PADDING;
        let top = PADDING + LEGEND_SPACE;
        Self {
            left,
            top,
            plot_width: (width - left - PADDING).max(1.0),
            plot_height: (height - top - PADDING - AXIS_LABEL_SPACE).max(1.0),
            y_max,
            points: series.len(),
            ticks,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.plot_height
    }

    pub fn right(&self) -> f64 {
        self.left + self.plot_width
    }

    /// Points are spread edge to edge; a single point sits in the middle.
    pub fn x_for(&self, index: usize) -> f64 {
        if self.points <= 1 {
            return self.left + self.plot_width / 2.0;
        }
        self.left + self.plot_width * index as f64 / (self.points - 1) as f64
    }

    pub fn y_for(&self, value: u32) -> f64 {
        self.bottom() - self.plot_height * value.min(self.y_max) as f64 / self.y_max as f64
    }

    /// Nearest point index for a pointer x position, if inside the plot.
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if self.points == 0 || x < self.left || x > self.right() {
            return None;
        }
        if self.points == 1 {
            return Some(0);
        }
        let step = self.plot_width / (self.points - 1) as f64;
        let index = ((x - self.left) / step).round() as usize;
        Some(index.min(self.points - 1))
    }

    pub fn y_labels(&self) -> Vec<u32> {
        let stride = self.ticks.len().div_ceil(MAX_Y_LABELS).max(1);
        let mut labels: Vec<u32> = self.ticks.iter().copied().step_by(stride).collect();
        if labels.last() != self.ticks.last() {
            if let Some(&top) = self.ticks.last() {
                labels.push(top);
            }
        }
        labels
    }

    /// Indices whose x label is drawn. The newest hour is always labelled.
    pub fn x_label_indices(&self) -> Vec<usize> {
        if self.points == 0 {
            return Vec::new();
        }
        let stride = self.points.div_ceil(MAX_X_LABELS).max(1);
        let last = self.points - 1;
        let mut indices: Vec<usize> = (0..self.points).rev().step_by(stride).collect();
        indices.reverse();
        debug_assert_eq!(indices.last(), Some(&last));
        indices
    }
}

/// Combined ("index" mode) tooltip: the hour, then every series at that hour.
pub fn tooltip_lines(series: &ChartSeries, options: &ChartOptions, index: usize) -> Option<Vec<String>> {
    let label = series.labels.get(index)?;
    Some(vec![
        label.clone(),
        format!("{}: {}", options.alerts.label, series.alert_counts.get(index)?),
        format!("{}: {}", options.trades.label, series.trade_counts.get(index)?),
    ])
}
