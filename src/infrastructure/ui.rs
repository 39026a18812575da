use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::config::ElementIds;
use crate::domain::{
    logging::LogComponent,
    status::{AccountView, StatusBadge, StatusTarget},
};

/// Logs a rejected DOM mutation at warn level.
pub fn log_dom_failure(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        crate::log_warn!(LogComponent::Infrastructure("UI"), "Failed to {action}: {e:?}");
    }
}

/// Writes connection status into page elements looked up by id.
///
/// Each lookup is guarded: a missing element is logged and skipped.
#[derive(Debug, Clone)]
pub struct DomStatusTarget {
    ids: ElementIds,
}

impl DomStatusTarget {
    pub fn new(ids: ElementIds) -> Self {
        Self { ids }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id));
        if element.is_none() {
            crate::log_warn!(LogComponent::Infrastructure("UI"), "Element '{id}' not found in DOM");
        }
        element
    }

    fn apply_badge(&self, badge: StatusBadge) {
        let Some(element) = self.element(&self.ids.status) else {
            return;
        };
        element.set_text_content(Some(&badge.to_string()));

        let classes = element.class_list();
        for class in StatusBadge::all_classes() {
            log_dom_failure(
                &format!("remove class '{class}' from '{}'", self.ids.status),
                classes.remove_1(class),
            );
        }
        log_dom_failure(
            &format!("set class '{}' on '{}'", badge.css_class(), self.ids.status),
            classes.add_1(badge.css_class()),
        );
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_panel_visible(&self, visible: bool) {
        let Some(panel) = self.element(&self.ids.account_panel) else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        let result = match panel.dyn_ref::<HtmlElement>() {
            Some(panel) => panel.style().set_property("display", display),
            None => panel.set_attribute("style", &format!("display: {display}")),
        };
        log_dom_failure(&format!("set display '{display}' on '{}'", self.ids.account_panel), result);
    }
}

impl StatusTarget for DomStatusTarget {
    fn set_connected(&self, connected: bool) {
        self.apply_badge(if connected {
            StatusBadge::Connected
        } else {
            StatusBadge::Disconnected
        });
    }

    fn set_account(&self, account: Option<&AccountView>) {
        match account {
            Some(account) => {
                self.set_text(&self.ids.login, &account.login);
                self.set_text(&self.ids.server, &account.server);
                self.set_text(&self.ids.balance, &account.balance);
                self.set_panel_visible(true);
            }
            None => self.set_panel_visible(false),
        }
    }

    fn set_error(&self) {
        self.apply_badge(StatusBadge::Error);
    }

    /// The server message becomes the badge tooltip.
    fn set_message(&self, message: Option<&str>) {
        let Some(element) = self.element(&self.ids.status) else {
            return;
        };
        let result = match message {
            Some(message) => element.set_attribute("title", message),
            None => element.remove_attribute("title"),
        };
        log_dom_failure(&format!("set title on '{}'", self.ids.status), result);
    }
}
