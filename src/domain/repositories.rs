use crate::domain::activity::StatsSnapshot;
use crate::domain::errors::DashboardResult;
use crate::domain::status::ConnectionStatus;

/// Read side of the dashboard backend.
///
/// Futures are polled on the browser's single thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    /// Hourly alert counts for the last `hours` hours.
    async fn fetch_stats(&self, hours: u32) -> DashboardResult<StatsSnapshot>;

    async fn fetch_connection_status(&self) -> DashboardResult<ConnectionStatus>;
}
