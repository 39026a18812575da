use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::domain::{
    logging::LogComponent,
    repositories::DashboardApi,
    status::{StatusTarget, StatusView},
};

/// Fetches connection status and projects it onto a [`StatusTarget`].
///
/// Every request takes a sequence number. Overlapping requests may complete
/// in any order; a response is dropped when a newer one has already been
/// rendered.
pub struct StatusPoller<A, T> {
    api: Rc<A>,
    target: T,
    issued: Cell<u64>,
    applied: Cell<u64>,
    last_view: RefCell<Option<StatusView>>,
}

impl<A: DashboardApi, T: StatusTarget> StatusPoller<A, T> {
    pub fn new(api: Rc<A>, target: T) -> Self {
        Self {
            api,
            target,
            issued: Cell::new(0),
            applied: Cell::new(0),
            last_view: RefCell::new(None),
        }
    }

    /// Never fails: transport errors become the "Error" badge.
    pub async fn refresh_status(&self) {
        let sequence = self.issued.get() + 1;
        self.issued.set(sequence);

        let result = self.api.fetch_connection_status().await;

        if sequence < self.applied.get() {
            crate::log_debug!(
                LogComponent::Application("StatusPoller"),
                "Dropping stale status response #{sequence} (#{} already shown)",
                self.applied.get()
            );
            return;
        }
        self.applied.set(sequence);

        if let Err(e) = &result {
            crate::log_error!(LogComponent::Application("StatusPoller"), "❌ Connection status check failed: {e}");
        }

        let view = StatusView::from_result(&result);
        crate::log_debug!(LogComponent::Application("StatusPoller"), "Status #{sequence}: {}", view.summary());
        view.render(&self.target);
        *self.last_view.borrow_mut() = Some(view);
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn last_view(&self) -> Option<StatusView> {
        self.last_view.borrow().clone()
    }

    pub fn requests_issued(&self) -> u64 {
        self.issued.get()
    }
}
