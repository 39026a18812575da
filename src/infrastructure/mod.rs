pub mod http;
pub mod rendering;
pub mod scheduler;
pub mod services;
pub mod ui;

pub use http::GlooDashboardClient;
pub use rendering::CanvasChartSurface;
pub use scheduler::BrowserScheduler;
pub use services::{BrowserTimeProvider, ConsoleLogger};
pub use ui::DomStatusTarget;
