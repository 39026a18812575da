use chrono::{DateTime, FixedOffset, Offset, Utc};
use derive_more::Display;

/// Log levels with automatic Display implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Log components with automatic Display implementation
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// Structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub metadata: Option<String>,
}

/// Wall clock plus the viewer's UTC offset.
///
/// Bucketing and log timestamps both read time through this trait so tests
/// can pin "now" to a fixed instant.
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn local_offset(&self) -> FixedOffset;

    /// Offset in force at `instant`, which differs from the current one
    /// across a DST change.
    fn offset_at(&self, _instant: DateTime<Utc>) -> FixedOffset {
        self.local_offset()
    }

    fn local_now(&self) -> DateTime<FixedOffset> {
        self.now().with_timezone(&self.local_offset())
    }

    fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.local_offset())
            .format("%H:%M:%S%.3f")
            .to_string()
    }
}

/// Domain abstraction for structured logging
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn trace(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Trace, component, message));
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }

    fn log_with_metadata(&self, level: LogLevel, component: LogComponent, message: &str, metadata: &str) {
        self.log(LogEntry::new_with_metadata(level, component, message, metadata));
    }
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().now(),
            level,
            component,
            message: message.to_string(),
            metadata: None,
        }
    }

    pub fn new_with_metadata(level: LogLevel, component: LogComponent, message: &str, metadata: &str) -> Self {
        Self {
            metadata: Some(metadata.to_string()),
            ..Self::new(level, component, message)
        }
    }

    /// `[12:00:01.250]  INFO APP:StatusPoller | message | metadata`
    pub fn format_line(&self) -> String {
        let timestamp = get_time_provider().format_timestamp(self.timestamp);
        match &self.metadata {
            Some(metadata) => format!(
                "[{}] {} {} | {} | {}",
                timestamp, self.level, self.component, self.message, metadata
            ),
            None => format!(
                "[{}] {} {} | {}",
                timestamp, self.level, self.component, self.message
            ),
        }
    }
}

use std::sync::OnceLock;
static GLOBAL_LOGGER: OnceLock<Box<dyn Logger + Sync + Send>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider + Sync + Send>> = OnceLock::new();

/// Initialize global logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger + Sync + Send>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Initialize global time provider. Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider + Sync + Send>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER
        .get()
        .map(|logger| logger.as_ref())
        .unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&SystemTimeProvider)
}

struct NoOpLogger;
impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}
}

/// System clock with a UTC "local" offset. Used until a browser provider is installed.
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        Utc.fix()
    }
}

/// Pinned clock for deterministic bucketing, optionally with one offset
/// change in the past.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider {
    now: DateTime<Utc>,
    offset: FixedOffset,
    earlier: Option<(DateTime<Utc>, FixedOffset)>,
}

impl FixedTimeProvider {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now,
            offset,
            earlier: None,
        }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, SystemTimeProvider.local_offset())
    }

    /// Instants before `change` report `offset` instead of the current one.
    pub fn with_offset_before(mut self, change: DateTime<Utc>, offset: FixedOffset) -> Self {
        self.earlier = Some((change, offset));
        self
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_offset(&self) -> FixedOffset {
        self.offset
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self.earlier {
            Some((change, earlier)) if instant < change => earlier,
            _ => self.offset,
        }
    }
}

/// Simplified logging macros
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().trace($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().debug($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().info($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().warn($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().error($component, &format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Info.to_string(), " INFO");
    }

    #[test]
    fn component_display_carries_layer_prefix() {
        assert_eq!(LogComponent::Application("StatusPoller").to_string(), "APP:StatusPoller");
        assert_eq!(LogComponent::Infrastructure("HTTP").to_string(), "INF:HTTP");
    }

    #[test]
    fn fixed_provider_formats_in_local_offset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 30).unwrap();
        let provider = FixedTimeProvider::new(now, FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(provider.format_timestamp(now), "11:15:30.000");
        assert_eq!(provider.local_now().format("%H:%M").to_string(), "11:15");
    }

    #[test]
    fn metadata_trails_the_message() {
        let entry = LogEntry::new_with_metadata(
            LogLevel::Debug,
            LogComponent::Infrastructure("HTTP"),
            "GET JSON /api/stats",
            "512 bytes",
        );
        let line = entry.format_line();
        assert!(line.ends_with("DEBUG INF:HTTP | GET JSON /api/stats | 512 bytes"), "{line}");
        assert!(LogEntry::new(LogLevel::Info, LogComponent::Domain("X"), "plain").format_line().ends_with("| plain"));
    }

    #[test]
    fn offset_before_a_change_is_the_earlier_one() {
        let change = Utc.with_ymd_and_hms(2024, 10, 27, 1, 0, 0).unwrap();
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let cet = FixedOffset::east_opt(3600).unwrap();
        let provider = FixedTimeProvider::new(change + chrono::Duration::hours(3), cet).with_offset_before(change, cest);
        assert_eq!(provider.offset_at(change - chrono::Duration::minutes(1)), cest);
        assert_eq!(provider.offset_at(change), cet);
        assert_eq!(provider.local_offset(), cet);
    }
}
