pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{ActivitySample, ChartSeries, StatsSnapshot, StatsSummary, SymbolActivity, SymbolTotal};
pub use services::{HourlyBucketer, RatioTradeEstimator, TradeEstimator, DEFAULT_TRADE_RATIO};
pub use value_objects::{HourKey, HourLabel};
