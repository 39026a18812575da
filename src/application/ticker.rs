use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::chart_refresher::{ChartHandle, ChartRefresher};
use super::scheduler::Scheduler;
use super::status_poller::StatusPoller;
use crate::domain::{
    chart::ChartSurface,
    logging::LogComponent,
    repositories::DashboardApi,
    status::StatusTarget,
};

/// Owns the refresh timer.
///
/// `start()` loads the chart once, polls status once and arms the interval;
/// each tick then re-polls status. `stop()` drops the timer.
pub struct DashboardTicker<A, T, C, S: Scheduler> {
    scheduler: S,
    poll_interval: Duration,
    refresher: Rc<ChartRefresher<A>>,
    poller: Rc<StatusPoller<A, T>>,
    surface: RefCell<Option<C>>,
    chart: RefCell<Option<ChartHandle<C>>>,
    timer: RefCell<Option<S::Handle>>,
    ticks: Rc<Cell<u64>>,
}

impl<A, T, C, S> DashboardTicker<A, T, C, S>
where
    A: DashboardApi + 'static,
    T: StatusTarget + 'static,
    C: ChartSurface + 'static,
    S: Scheduler,
{
    pub fn new(
        scheduler: S,
        poll_interval: Duration,
        refresher: Rc<ChartRefresher<A>>,
        poller: Rc<StatusPoller<A, T>>,
        surface: Option<C>,
    ) -> Self {
        Self {
            scheduler,
            poll_interval,
            refresher,
            poller,
            surface: RefCell::new(surface),
            chart: RefCell::new(None),
            timer: RefCell::new(None),
            ticks: Rc::new(Cell::new(0)),
        }
    }

    pub fn start(&self) {
        if self.is_running() {
            crate::log_warn!(
                LogComponent::Application("DashboardTicker"),
                "start() called while already running, ignoring"
            );
            return;
        }

        if self.chart.borrow().is_none() {
            let surface = self.surface.borrow_mut().take();
            *self.chart.borrow_mut() = self.refresher.initialize(surface);
        }

        if let Some(handle) = self.chart.borrow().clone() {
            let refresher = Rc::clone(&self.refresher);
            self.scheduler
                .spawn(Box::pin(async move { refresher.load_and_render(&handle).await }));
        }

        let poller = Rc::clone(&self.poller);
        self.scheduler
            .spawn(Box::pin(async move { poller.refresh_status().await }));

        let scheduler = self.scheduler.clone();
        let poller = Rc::clone(&self.poller);
        let ticks = Rc::clone(&self.ticks);
        let handle = self.scheduler.every(
            self.poll_interval,
            Box::new(move || {
                ticks.set(ticks.get() + 1);
                crate::log_trace!(LogComponent::Application("DashboardTicker"), "Tick #{}", ticks.get());
                scheduler.spawn(Box::pin(refresh_dashboard(Rc::clone(&poller))));
            }),
        );
        *self.timer.borrow_mut() = Some(handle);

        crate::log_info!(
            LogComponent::Application("DashboardTicker"),
            "🚀 Dashboard started, polling every {:?}",
            self.poll_interval
        );
    }

    pub fn stop(&self) {
        if self.timer.borrow_mut().take().is_some() {
            crate::log_info!(LogComponent::Application("DashboardTicker"), "🛑 Dashboard stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks.get()
    }

    pub fn chart(&self) -> Option<ChartHandle<C>> {
        self.chart.borrow().clone()
    }

    pub fn poller(&self) -> &Rc<StatusPoller<A, T>> {
        &self.poller
    }
}

/// Periodic dashboard refresh: one status poll per tick. The chart is
/// loaded once per `start()` and not re-fetched here.
async fn refresh_dashboard<A: DashboardApi, T: StatusTarget>(poller: Rc<StatusPoller<A, T>>) {
    poller.refresh_status().await;
}
