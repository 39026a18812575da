#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use alerts_dashboard_wasm::domain::{
    activity::{ChartSeries, StatsSnapshot, StatsSummary},
    chart::{ChartOptions, ChartSurface},
    errors::{DashboardError, DashboardResult, TransportError},
    repositories::DashboardApi,
    status::{AccountInfo, AccountView, ConnectionStatus, StatusTarget},
};
use chrono::{TimeZone, Utc};
use futures::channel::oneshot;

pub type StatusReply = DashboardResult<ConnectionStatus>;

enum Queued<T> {
    Ready(DashboardResult<T>),
    Deferred(oneshot::Receiver<DashboardResult<T>>),
}

/// Scripted backend. Queued replies are served first; once the queue is
/// empty every call gets the fallback.
pub struct FakeApi {
    stats: RefCell<VecDeque<Queued<StatsSnapshot>>>,
    statuses: RefCell<VecDeque<Queued<ConnectionStatus>>>,
    stats_fallback: RefCell<DashboardResult<StatsSnapshot>>,
    status_fallback: RefCell<StatusReply>,
    stats_calls: Cell<usize>,
    status_calls: Cell<usize>,
    requested_hours: RefCell<Vec<u32>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            stats: RefCell::new(VecDeque::new()),
            statuses: RefCell::new(VecDeque::new()),
            stats_fallback: RefCell::new(Ok(StatsSnapshot::default())),
            status_fallback: RefCell::new(Ok(ConnectionStatus::default())),
            stats_calls: Cell::new(0),
            status_calls: Cell::new(0),
            requested_hours: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_stats(&self, reply: DashboardResult<StatsSnapshot>) {
        self.stats.borrow_mut().push_back(Queued::Ready(reply));
    }

    pub fn push_status(&self, reply: StatusReply) {
        self.statuses.borrow_mut().push_back(Queued::Ready(reply));
    }

    /// The next status call waits until the returned sender fires.
    pub fn defer_status(&self) -> oneshot::Sender<StatusReply> {
        let (tx, rx) = oneshot::channel();
        self.statuses.borrow_mut().push_back(Queued::Deferred(rx));
        tx
    }

    pub fn set_stats_fallback(&self, reply: DashboardResult<StatsSnapshot>) {
        *self.stats_fallback.borrow_mut() = reply;
    }

    pub fn set_status_fallback(&self, reply: StatusReply) {
        *self.status_fallback.borrow_mut() = reply;
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.get()
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.get()
    }

    pub fn requested_hours(&self) -> Vec<u32> {
        self.requested_hours.borrow().clone()
    }
}

async fn resolve<T>(queued: Option<Queued<T>>, fallback: DashboardResult<T>) -> DashboardResult<T> {
    match queued {
        Some(Queued::Ready(reply)) => reply,
        Some(Queued::Deferred(rx)) => rx.await.unwrap_or_else(|_| Err(unreachable("reply dropped"))),
        None => fallback,
    }
}

impl DashboardApi for FakeApi {
    async fn fetch_stats(&self, hours: u32) -> DashboardResult<StatsSnapshot> {
        self.stats_calls.set(self.stats_calls.get() + 1);
        self.requested_hours.borrow_mut().push(hours);
        let queued = self.stats.borrow_mut().pop_front();
        let fallback = self.stats_fallback.borrow().clone();
        resolve(queued, fallback).await
    }

    async fn fetch_connection_status(&self) -> DashboardResult<ConnectionStatus> {
        self.status_calls.set(self.status_calls.get() + 1);
        let queued = self.statuses.borrow_mut().pop_front();
        let fallback = self.status_fallback.borrow().clone();
        resolve(queued, fallback).await
    }
}

/// Records every call as a short string and keeps the current widget state.
#[derive(Default)]
pub struct RecordingTarget {
    pub calls: RefCell<Vec<String>>,
    pub badge: RefCell<Option<String>>,
    pub account: RefCell<Option<AccountView>>,
    pub panel_visible: Cell<Option<bool>>,
}

impl StatusTarget for RecordingTarget {
    fn set_connected(&self, connected: bool) {
        let badge = if connected { "Connected" } else { "Disconnected" };
        self.calls.borrow_mut().push(format!("badge:{badge}"));
        *self.badge.borrow_mut() = Some(badge.to_string());
    }

    fn set_account(&self, account: Option<&AccountView>) {
        match account {
            Some(account) => {
                self.calls.borrow_mut().push(format!("account:{}", account.login));
                *self.account.borrow_mut() = Some(account.clone());
                self.panel_visible.set(Some(true));
            }
            None => {
                self.calls.borrow_mut().push("account:hidden".to_string());
                self.panel_visible.set(Some(false));
            }
        }
    }

    fn set_error(&self) {
        self.calls.borrow_mut().push("badge:Error".to_string());
        *self.badge.borrow_mut() = Some("Error".to_string());
    }
}

impl RecordingTarget {
    pub fn badge(&self) -> Option<String> {
        self.badge.borrow().clone()
    }

    pub fn balance(&self) -> Option<String> {
        self.account.borrow().as_ref().map(|account| account.balance.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[derive(Default)]
pub struct SurfaceLog {
    pub options: Vec<ChartOptions>,
    pub draws: Vec<ChartSeries>,
    pub summaries: Vec<StatsSummary>,
}

/// Chart surface whose log outlives the surface itself.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub log: Rc<RefCell<SurfaceLog>>,
}

impl ChartSurface for RecordingSurface {
    fn configure(&mut self, options: &ChartOptions) {
        self.log.borrow_mut().options.push(options.clone());
    }

    fn draw(&mut self, series: &ChartSeries) {
        self.log.borrow_mut().draws.push(series.clone());
    }

    fn show_summary(&mut self, summary: &StatsSummary) {
        self.log.borrow_mut().summaries.push(summary.clone());
    }
}

impl RecordingSurface {
    pub fn configure_count(&self) -> usize {
        self.log.borrow().options.len()
    }

    pub fn draw_count(&self) -> usize {
        self.log.borrow().draws.len()
    }

    pub fn last_draw(&self) -> Option<ChartSeries> {
        self.log.borrow().draws.last().cloned()
    }

    pub fn last_summary(&self) -> Option<StatsSummary> {
        self.log.borrow().summaries.last().cloned()
    }
}

pub fn unreachable(reason: &str) -> DashboardError {
    TransportError::Unreachable {
        url: "/api/test".to_string(),
        reason: reason.to_string(),
    }
    .into()
}

pub fn connected(account: Option<AccountInfo>) -> ConnectionStatus {
    ConnectionStatus {
        connected: true,
        message: None,
        account_info: account,
    }
}

pub fn disconnected() -> ConnectionStatus {
    ConnectionStatus {
        connected: false,
        message: Some("MT5 terminal not running".to_string()),
        account_info: None,
    }
}

pub fn snapshot(alerts_by_hour: &[(&str, u32)]) -> StatsSnapshot {
    StatsSnapshot {
        alerts_by_hour: alerts_by_hour
            .iter()
            .map(|(key, count)| (key.to_string(), *count))
            .collect(),
        ..StatsSnapshot::default()
    }
}

/// 2024-03-01 09:15:00 UTC
pub fn morning() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap()
}
