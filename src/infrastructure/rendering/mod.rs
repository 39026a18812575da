pub mod canvas_chart;
pub mod layout;

pub use canvas_chart::CanvasChartSurface;
pub use layout::{ChartLayout, tooltip_lines};
