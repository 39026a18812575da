use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::Promise;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use super::status_panel::{SignalStatusTarget, StatusPanel};
use crate::application::{ChartRefresher, DashboardTicker, StatusPoller};
use crate::config::DashboardConfig;
use crate::domain::{activity::HourlyBucketer, logging::LogComponent};
use crate::infrastructure::{
    BrowserScheduler, BrowserTimeProvider, CanvasChartSurface, DomStatusTarget, GlooDashboardClient,
};

type PageStatusTarget = (DomStatusTarget, SignalStatusTarget);
type PageTicker = DashboardTicker<GlooDashboardClient, PageStatusTarget, CanvasChartSurface, BrowserScheduler>;

thread_local! {
    static PAGE_DASHBOARD: RefCell<Option<WasmDashboard>> = const { RefCell::new(None) };
}

/// Dashboard handle exported to JS.
///
/// ```js
/// const dashboard = new WasmDashboard({ pollIntervalMs: 10000 });
/// dashboard.start();
/// ```
#[wasm_bindgen]
pub struct WasmDashboard {
    ticker: PageTicker,
    panel: SignalStatusTarget,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// `config` may be `undefined`; missing keys fall back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmDashboard, JsValue> {
        let config = parse_config(config)?;
        Ok(Self::from_config(&config))
    }

    pub fn start(&self) {
        self.ticker.start();
    }

    pub fn stop(&self) {
        self.ticker.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    #[wasm_bindgen(js_name = tickCount)]
    pub fn tick_count(&self) -> f64 {
        self.ticker.tick_count() as f64
    }

    /// Totals from the last chart load, or `undefined` before the first one
    /// (and on pages without a chart).
    #[wasm_bindgen(js_name = statsSummary)]
    pub fn stats_summary(&self) -> Result<JsValue, JsValue> {
        match self.ticker.chart().and_then(|chart| chart.summary()) {
            Some(summary) => JsValue::from_serde(&summary).map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Polls connection status once, outside the timer.
    #[wasm_bindgen(js_name = refreshStatus)]
    pub fn refresh_status(&self) -> Promise {
        let poller = Rc::clone(self.ticker.poller());
        future_to_promise(async move {
            poller.refresh_status().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Mounts the reactive status panel into `element_id`. It mirrors the
    /// same status the plain DOM elements receive.
    #[wasm_bindgen(js_name = mountStatusPanel)]
    pub fn mount_status_panel(&self, element_id: &str) -> Result<(), JsValue> {
        let parent = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(element_id))
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("element '{element_id}' not found")))?;

        let status = self.panel.signal();
        mount_to(parent, move || view! { <StatusPanel status=status/> });

        crate::log_info!(
            LogComponent::Presentation("WasmDashboard"),
            "🔌 Status panel mounted into '{element_id}'"
        );
        Ok(())
    }
}

impl WasmDashboard {
    fn from_config(config: &DashboardConfig) -> Self {
        let api = Rc::new(GlooDashboardClient::from_config(config));
        let panel = SignalStatusTarget::new();
        let target = (DomStatusTarget::new(config.elements.clone()), panel);

        let refresher = ChartRefresher::new(
            Rc::clone(&api),
            HourlyBucketer::with_ratio(config.stats_window_hours, config.trade_ratio),
            Rc::new(BrowserTimeProvider::new()),
        );
        let poller = StatusPoller::new(api, target);

        let surface = CanvasChartSurface::from_element_id(&config.elements.chart);
        if surface.is_none() {
            crate::log_debug!(
                LogComponent::Presentation("WasmDashboard"),
                "No canvas '{}' on this page",
                config.elements.chart
            );
        }

        let ticker = DashboardTicker::new(
            BrowserScheduler,
            Duration::from_millis(u64::from(config.poll_interval_ms)),
            Rc::new(refresher),
            Rc::new(poller),
            surface,
        );

        Self { ticker, panel }
    }
}

fn parse_config(config: JsValue) -> Result<DashboardConfig, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        DashboardConfig::default()
    } else {
        config
            .into_serde::<DashboardConfig>()
            .map_err(|e| JsValue::from_str(&format!("invalid dashboard config: {e}")))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Builds and starts the page-wide dashboard. Calling it again replaces
/// the running instance; an invalid config leaves it untouched.
#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    PAGE_DASHBOARD.with(|cell| {
        replace_running(
            cell,
            |previous| previous.stop(),
            || {
                let dashboard = WasmDashboard::from_config(&config);
                dashboard.start();
                dashboard
            },
        )
    });
    Ok(())
}

/// Whether the page-wide dashboard exists and is polling.
#[wasm_bindgen(js_name = isDashboardRunning)]
pub fn is_dashboard_running() -> bool {
    PAGE_DASHBOARD.with(|cell| cell.borrow().as_ref().is_some_and(WasmDashboard::is_running))
}

/// The old instance is stopped and dropped before the new one is started,
/// so two tickers never poll at once.
fn replace_running<T>(slot: &RefCell<Option<T>>, stop: impl FnOnce(T), start: impl FnOnce() -> T) {
    let previous = slot.borrow_mut().take();
    if let Some(previous) = previous {
        stop(previous);
    }
    let next = start();
    *slot.borrow_mut() = Some(next);
}

/// Stops the page-wide dashboard, if any.
#[wasm_bindgen(js_name = stopDashboard)]
pub fn stop_dashboard() {
    PAGE_DASHBOARD.with(|cell| {
        if let Some(dashboard) = cell.borrow_mut().take() {
            dashboard.stop();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_instance_stops_before_the_next_starts() {
        let events = RefCell::new(Vec::new());
        let slot = RefCell::new(Some("first"));

        replace_running(
            &slot,
            |previous| events.borrow_mut().push(format!("stop {previous}")),
            || {
                assert!(slot.borrow().is_none());
                events.borrow_mut().push("start second".to_string());
                "second"
            },
        );

        assert_eq!(*events.borrow(), vec!["stop first", "start second"]);
        assert_eq!(*slot.borrow(), Some("second"));
    }

    #[test]
    fn empty_slot_just_starts() {
        let slot = RefCell::new(None);
        replace_running(&slot, |_: u8| panic!("nothing to stop"), || 7);
        assert_eq!(*slot.borrow(), Some(7));
    }
}
