//! Chart configuration and the surface it is drawn on.

pub mod value_objects;

pub use value_objects::*;

use crate::domain::activity::{ChartSeries, StatsSummary};

/// Something a dual-series line chart can be drawn onto.
pub trait ChartSurface {
    /// Applies static options. Called once, before any data arrives.
    fn configure(&mut self, options: &ChartOptions);

    /// Replaces everything on screen with `series`.
    fn draw(&mut self, series: &ChartSeries);

    /// Window totals for a caption. Surfaces without one ignore it.
    fn show_summary(&mut self, _summary: &StatsSummary) {}
}
