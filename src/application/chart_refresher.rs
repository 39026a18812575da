use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::domain::{
    activity::{ChartSeries, HourlyBucketer, StatsSummary},
    chart::{ChartOptions, ChartSurface},
    logging::{LogComponent, TimeProvider},
    repositories::DashboardApi,
};

/// A configured chart bound to its surface. Cheap to clone; clones share state.
pub struct ChartHandle<S> {
    state: Rc<RefCell<ChartState<S>>>,
}

struct ChartState<S> {
    surface: S,
    series: ChartSeries,
    summary: Option<StatsSummary>,
    redraws: usize,
}

impl<S> Clone for ChartHandle<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S: ChartSurface> ChartHandle<S> {
    fn new(mut surface: S, options: &ChartOptions) -> Self {
        surface.configure(options);
        Self {
            state: Rc::new(RefCell::new(ChartState {
                surface,
                series: ChartSeries::default(),
                summary: None,
                redraws: 0,
            })),
        }
    }

    /// Swaps in a freshly built series and its totals, then redraws.
    pub fn replace_data(&self, series: ChartSeries, summary: StatsSummary) {
        let mut state = self.state.borrow_mut();
        state.series = series;
        let ChartState {
            surface,
            series,
            summary: shown,
            redraws,
        } = &mut *state;
        surface.show_summary(&summary);
        surface.draw(series);
        *shown = Some(summary);
        *redraws += 1;
    }

    pub fn series(&self) -> ChartSeries {
        self.state.borrow().series.clone()
    }

    /// Totals from the last successful load.
    pub fn summary(&self) -> Option<StatsSummary> {
        self.state.borrow().summary.clone()
    }

    pub fn redraw_count(&self) -> usize {
        self.state.borrow().redraws
    }

    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.state.borrow(), |state| &state.surface)
    }
}

/// Loads the hourly activity summary once and hands it to the chart.
pub struct ChartRefresher<A> {
    api: Rc<A>,
    bucketer: HourlyBucketer,
    clock: Rc<dyn TimeProvider>,
    options: ChartOptions,
}

impl<A: DashboardApi> ChartRefresher<A> {
    pub fn new(api: Rc<A>, bucketer: HourlyBucketer, clock: Rc<dyn TimeProvider>) -> Self {
        Self {
            api,
            bucketer,
            clock,
            options: ChartOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Configures an empty two-series chart. A page without a chart mount
    /// point passes `None` and gets `None` back.
    pub fn initialize<S: ChartSurface>(&self, surface: Option<S>) -> Option<ChartHandle<S>> {
        let Some(surface) = surface else {
            crate::log_debug!(
                LogComponent::Application("ChartRefresher"),
                "No chart surface on this page, skipping chart"
            );
            return None;
        };

        crate::log_debug!(
            LogComponent::Application("ChartRefresher"),
            "Chart initialized: '{}' + '{}'",
            self.options.alerts.label,
            self.options.trades.label
        );
        Some(ChartHandle::new(surface, &self.options))
    }

    /// One fetch, one redraw. A failed fetch is logged and the chart keeps
    /// whatever it showed before.
    pub async fn load_and_render<S: ChartSurface>(&self, handle: &ChartHandle<S>) {
        let hours = self.bucketer.window_hours();
        match self.api.fetch_stats(hours).await {
            Ok(snapshot) => {
                let alerts = snapshot.alerts_by_hour_key();
                let clock = &self.clock;
                let series = self
                    .bucketer
                    .bucket_in_zone(&alerts, clock.now(), |instant| clock.offset_at(instant));
                let summary = snapshot.summary();
                crate::log_info!(
                    LogComponent::Application("ChartRefresher"),
                    "📊 Loaded {} hourly points ({} alerts in window): {}",
                    series.len(),
                    series.total_alerts(),
                    summary.headline()
                );
                handle.replace_data(series, summary);
            }
            Err(e) => {
                crate::log_error!(LogComponent::Application("ChartRefresher"), "❌ Failed to load chart data: {e}");
            }
        }
    }
}
