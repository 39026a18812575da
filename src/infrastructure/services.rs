use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use wasm_bindgen::JsValue;

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};
use crate::time_utils::offset_from_js_minutes;

/// Console logger implementation for the browser
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = JsValue::from(entry.format_line());
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

/// Clock and zone from `js_sys::Date`.
#[derive(Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        let millis = js_sys::Date::now() as i64;
        Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
    }

    fn local_offset(&self) -> FixedOffset {
        let date = js_sys::Date::new_0();
        offset_from_js_minutes(date.get_timezone_offset()).unwrap_or_else(|| Utc.fix())
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        let date = js_sys::Date::new(&JsValue::from_f64(instant.timestamp_millis() as f64));
        offset_from_js_minutes(date.get_timezone_offset()).unwrap_or_else(|| Utc.fix())
    }
}
