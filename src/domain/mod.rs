pub mod activity;
pub mod chart;
pub mod errors;
pub mod logging;
pub mod repositories;
pub mod status;
