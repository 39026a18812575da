use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::domain::logging::{LogComponent, get_logger};

/// Timers and task spawning for a single-threaded event loop.
pub trait Scheduler: Clone + 'static {
    /// Dropping the handle cancels the timer.
    type Handle: 'static;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;

    /// Fire-and-forget. The task is never awaited or cancelled by the caller.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Scheduler driven by hand: timers fire on [`ManualScheduler::fire`] and
/// spawned tasks run on [`ManualScheduler::run_until_stalled`].
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

struct ManualInner {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    timers: RefCell<Vec<ManualTimer>>,
}

struct ManualTimer {
    period: Duration,
    task: Box<dyn FnMut()>,
    active: Rc<Cell<bool>>,
}

pub struct ManualTimerHandle {
    active: Rc<Cell<bool>>,
}

impl Drop for ManualTimerHandle {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualInner {
                pool: RefCell::new(pool),
                spawner,
                timers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Runs every live timer callback once, as if each period had elapsed.
    pub fn fire(&self) {
        let mut timers = self.inner.timers.take();
        timers.retain(|timer| timer.active.get());
        for timer in timers.iter_mut() {
            (timer.task)();
        }
        // Timers armed from inside a callback land in the fresh vec.
        let mut armed_meanwhile = self.inner.timers.take();
        timers.append(&mut armed_meanwhile);
        *self.inner.timers.borrow_mut() = timers;
    }

    /// Polls spawned tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    pub fn active_timers(&self) -> usize {
        self.inner
            .timers
            .borrow()
            .iter()
            .filter(|timer| timer.active.get())
            .count()
    }

    pub fn active_periods(&self) -> Vec<Duration> {
        self.inner
            .timers
            .borrow()
            .iter()
            .filter(|timer| timer.active.get())
            .map(|timer| timer.period)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimerHandle;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> ManualTimerHandle {
        let active = Rc::new(Cell::new(true));
        self.inner.timers.borrow_mut().push(ManualTimer {
            period,
            task,
            active: active.clone(),
        });
        ManualTimerHandle { active }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.inner.spawner.spawn_local(task) {
            get_logger().error(
                LogComponent::Application("ManualScheduler"),
                &format!("Failed to spawn task: {e}"),
            );
        }
    }
}
