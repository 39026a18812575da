pub mod status_panel;
pub mod wasm_api;

pub use status_panel::{SignalStatusTarget, StatusPanel};
pub use wasm_api::{WasmDashboard, is_dashboard_running, start_dashboard, stop_dashboard};
