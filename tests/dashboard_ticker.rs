mod common;

use std::rc::Rc;
use std::time::Duration;

use alerts_dashboard_wasm::application::{ChartRefresher, DashboardTicker, ManualScheduler, StatusPoller};
use alerts_dashboard_wasm::domain::{activity::HourlyBucketer, logging::FixedTimeProvider};
use common::{FakeApi, RecordingSurface, RecordingTarget, connected, morning, snapshot};

type Ticker = DashboardTicker<FakeApi, RecordingTarget, RecordingSurface, ManualScheduler>;

struct Harness {
    api: Rc<FakeApi>,
    scheduler: ManualScheduler,
    surface: RecordingSurface,
    ticker: Ticker,
}

fn harness(with_chart: bool) -> Harness {
    let api = FakeApi::new();
    api.set_stats_fallback(Ok(snapshot(&[("2024-03-01 09:00", 5)])));
    api.set_status_fallback(Ok(connected(None)));

    let scheduler = ManualScheduler::new();
    let surface = RecordingSurface::default();
    let refresher = ChartRefresher::new(
        Rc::clone(&api),
        HourlyBucketer::with_ratio(24, 0.8),
        Rc::new(FixedTimeProvider::utc(morning())),
    );
    let poller = StatusPoller::new(Rc::clone(&api), RecordingTarget::default());
    let ticker = DashboardTicker::new(
        scheduler.clone(),
        Duration::from_secs(30),
        Rc::new(refresher),
        Rc::new(poller),
        with_chart.then(|| surface.clone()),
    );

    Harness {
        api,
        scheduler,
        surface,
        ticker,
    }
}

#[test]
fn start_loads_chart_and_status_once_and_arms_thirty_seconds() {
    let h = harness(true);
    h.ticker.start();
    h.scheduler.run_until_stalled();

    assert!(h.ticker.is_running());
    assert_eq!(h.api.stats_calls(), 1);
    assert_eq!(h.api.status_calls(), 1);
    assert_eq!(h.scheduler.active_periods(), vec![Duration::from_secs(30)]);
    assert_eq!(h.surface.draw_count(), 1);
    assert_eq!(h.ticker.poller().target().badge().as_deref(), Some("Connected"));
}

#[test]
fn each_tick_polls_status_once_and_leaves_the_chart_alone() {
    let h = harness(true);
    h.ticker.start();
    h.scheduler.run_until_stalled();

    for _ in 0..3 {
        h.scheduler.fire();
        h.scheduler.run_until_stalled();
    }

    assert_eq!(h.ticker.tick_count(), 3);
    assert_eq!(h.api.status_calls(), 4);
    assert_eq!(h.api.stats_calls(), 1);
    assert_eq!(h.surface.draw_count(), 1);
}

#[test]
fn stop_cancels_future_ticks() {
    let h = harness(true);
    h.ticker.start();
    h.scheduler.run_until_stalled();
    h.ticker.stop();

    h.scheduler.fire();
    h.scheduler.run_until_stalled();

    assert!(!h.ticker.is_running());
    assert_eq!(h.scheduler.active_timers(), 0);
    assert_eq!(h.ticker.tick_count(), 0);
    assert_eq!(h.api.status_calls(), 1);
}

#[test]
fn second_start_is_ignored() {
    let h = harness(true);
    h.ticker.start();
    h.ticker.start();
    h.scheduler.run_until_stalled();

    assert_eq!(h.scheduler.active_timers(), 1);
    assert_eq!(h.api.stats_calls(), 1);
    assert_eq!(h.api.status_calls(), 1);
}

#[test]
fn restart_reloads_into_the_same_chart() {
    let h = harness(true);
    h.ticker.start();
    h.scheduler.run_until_stalled();
    h.ticker.stop();
    h.ticker.start();
    h.scheduler.run_until_stalled();

    assert_eq!(h.scheduler.active_timers(), 1);
    assert_eq!(h.api.stats_calls(), 2);
    assert_eq!(h.surface.configure_count(), 1);
    assert_eq!(h.ticker.chart().map(|chart| chart.redraw_count()), Some(2));
}

#[test]
fn page_without_chart_still_polls_status() {
    let h = harness(false);
    h.ticker.start();
    h.scheduler.run_until_stalled();
    h.scheduler.fire();
    h.scheduler.run_until_stalled();

    assert!(h.ticker.chart().is_none());
    assert_eq!(h.api.stats_calls(), 0);
    assert_eq!(h.api.status_calls(), 2);
}
