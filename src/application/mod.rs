pub mod chart_refresher;
pub mod scheduler;
pub mod status_poller;
pub mod ticker;

pub use chart_refresher::{ChartHandle, ChartRefresher};
pub use scheduler::{ManualScheduler, ManualTimerHandle, Scheduler};
pub use status_poller::StatusPoller;
pub use ticker::DashboardTicker;
