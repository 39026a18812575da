use serde::Serialize;

/// Upper bound on y-axis intervals; the step widens past it.
pub const MAX_Y_TICKS: u64 = 10;

/// Value Object - One line series on the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSpec {
    pub label: &'static str,
    pub color: &'static str,
    pub fill: &'static str,
}

/// Value Object - Static chart configuration applied once at initialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub alerts: DatasetSpec,
    pub trades: DatasetSpec,
    pub begin_at_zero: bool,
    pub step_size: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            alerts: DatasetSpec {
                label: "Alerts",
                color: "rgb(75, 192, 192)",
                fill: "rgba(75, 192, 192, 0.2)",
            },
            trades: DatasetSpec {
                label: "Trades",
                color: "rgb(255, 99, 132)",
                fill: "rgba(255, 99, 132, 0.2)",
            },
            begin_at_zero: true,
            step_size: 1,
        }
    }
}

impl ChartOptions {
    /// Integer ticks from zero up to at least `max_value`, in multiples of
    /// `step_size` and never more than `MAX_Y_TICKS` intervals.
    pub fn y_ticks(&self, max_value: u32) -> Vec<u32> {
        let base = u64::from(self.step_size.max(1));
        let intervals = u64::from(max_value.max(1)).div_ceil(base);
        let step = base * intervals.div_ceil(MAX_Y_TICKS).max(1);
        let top = u64::from(max_value).max(step).div_ceil(step) * step;
        let start = if self.begin_at_zero { 0 } else { step };
        (0..=MAX_Y_TICKS)
            .map(|n| start + n * step)
            .take_while(|&tick| tick <= top)
            .map(|tick| u32::try_from(tick).unwrap_or(u32::MAX))
            .collect()
    }
}
