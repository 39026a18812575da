pub mod entities;
pub mod services;

pub use entities::{AccountInfo, ConnectionStatus};
pub use services::{AccountView, StatusBadge, StatusTarget, StatusView, format_balance};
