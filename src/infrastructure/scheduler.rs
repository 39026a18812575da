use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo::timers::callback::Interval;

use crate::application::scheduler::Scheduler;

/// `setInterval` + `spawn_local`. Dropping the [`Interval`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Interval;

    fn every(&self, period: Duration, mut task: Box<dyn FnMut()>) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || task())
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
