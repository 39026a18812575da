use leptos::*;

use crate::domain::status::{AccountView, StatusBadge, StatusTarget, StatusView};

/// Status target backed by a Leptos signal, for pages that mount
/// [`StatusPanel`] instead of hand-written markup.
#[derive(Debug, Clone, Copy)]
pub struct SignalStatusTarget {
    status: RwSignal<StatusView>,
}

impl Default for SignalStatusTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalStatusTarget {
    pub fn new() -> Self {
        Self {
            status: create_rw_signal(StatusView::default()),
        }
    }

    pub fn signal(&self) -> RwSignal<StatusView> {
        self.status
    }
}

impl StatusTarget for SignalStatusTarget {
    fn set_connected(&self, connected: bool) {
        self.status.update(|view| {
            view.badge = if connected {
                StatusBadge::Connected
            } else {
                StatusBadge::Disconnected
            };
        });
    }

    fn set_account(&self, account: Option<&AccountView>) {
        let account = account.cloned();
        self.status.update(|view| view.account = account);
    }

    fn set_error(&self) {
        self.status.update(|view| view.badge = StatusBadge::Error);
    }

    fn set_message(&self, message: Option<&str>) {
        let message = message.map(str::to_string);
        self.status.update(|view| view.message = message);
    }
}

/// 🔌 Connection badge plus account details
#[component]
pub fn StatusPanel(status: RwSignal<StatusView>) -> impl IntoView {
    let account_field = move |field: fn(&AccountView) -> String| {
        move || status.with(|view| view.account.as_ref().map(field).unwrap_or_default())
    };

    view! {
        <div class="dashboard-status">
            <span
                class=move || format!("badge {}", status.with(|view| view.badge.css_class()))
                title=move || status.with(|view| view.message.clone())
            >
                {move || status.with(|view| view.badge.to_string())}
            </span>
            <Show when=move || status.with(|view| view.account.is_some())>
                <dl class="account-info">
                    <dt>"Login"</dt>
                    <dd>{account_field(|account| account.login.clone())}</dd>
                    <dt>"Server"</dt>
                    <dd>{account_field(|account| account.server.clone())}</dd>
                    <dt>"Balance"</dt>
                    <dd>{account_field(|account| account.balance_with_currency())}</dd>
                    {move || {
                        status.with(|view| {
                            view.account
                                .as_ref()
                                .map(AccountView::details)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|(name, value)| view! { <dt>{name}</dt><dd>{value}</dd> })
                                .collect_view()
                        })
                    }}
                </dl>
            </Show>
        </div>
    }
}
