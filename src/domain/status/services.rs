use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::entities::{AccountInfo, ConnectionStatus};
use crate::domain::errors::DashboardError;

/// Connection indicator state. Display is the badge text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum StatusBadge {
    Connected,
    Disconnected,
    Error,
}

impl StatusBadge {
    /// Every class a badge may carry, so a target can clear the stale one.
    pub fn all_classes() -> impl Iterator<Item = &'static str> {
        Self::iter().map(|badge| badge.css_class())
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBadge::Connected => "bg-success",
            StatusBadge::Disconnected => "bg-danger",
            StatusBadge::Error => "bg-warning",
        }
    }
}

/// Account fields ready to be written as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub login: String,
    pub server: String,
    pub balance: String,
    pub currency: Option<String>,
    pub equity: Option<String>,
    pub margin: Option<String>,
    pub free_margin: Option<String>,
    pub margin_level: Option<String>,
}

impl AccountView {
    pub fn from_account(account: &AccountInfo) -> Self {
        Self {
            login: account.login.clone(),
            server: account.server.clone(),
            balance: format_balance(account.balance),
            currency: account.currency.clone(),
            equity: account.equity.map(format_balance),
            margin: account.margin.map(format_balance),
            free_margin: account.free_margin.map(format_balance),
            margin_level: account.margin_level.map(|level| format!("{}%", format_balance(level))),
        }
    }

    /// `"1234.50 USD"`, or the bare balance when no currency is known.
    pub fn balance_with_currency(&self) -> String {
        match &self.currency {
            Some(currency) => format!("{} {}", self.balance, currency),
            None => self.balance.clone(),
        }
    }

    /// Optional figures the terminal reported, in display order.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        [
            ("Equity", &self.equity),
            ("Margin", &self.margin),
            ("Free margin", &self.free_margin),
            ("Margin level", &self.margin_level),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|value| (name, value)))
        .collect()
    }
}

/// Two decimals, exact ties rounded away from zero (`1234.125` → `"1234.13"`).
///
/// `{:.2}` alone breaks ties to even. A binary double sits exactly halfway
/// between two cents only when its fraction is an odd number of eighths.
pub fn format_balance(balance: f64) -> String {
    let magnitude = balance.abs();
    if magnitude * 8.0 % 2.0 == 1.0 {
        let cents = (magnitude * 100.0).ceil() as u64;
        let sign = if balance < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:02}", cents / 100, cents % 100);
    }
    format!("{balance:.2}")
}

/// What the status widgets should show after one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub badge: StatusBadge,
    pub account: Option<AccountView>,
    /// Server-side explanation, shown as the badge tooltip.
    pub message: Option<String>,
}

impl StatusView {
    pub fn from_status(status: &ConnectionStatus) -> Self {
        let account = if status.connected {
            status.account_info.as_ref().map(AccountView::from_account)
        } else {
            None
        };
        Self {
            badge: if status.connected {
                StatusBadge::Connected
            } else {
                StatusBadge::Disconnected
            },
            account,
            message: status.message.clone(),
        }
    }

    pub fn from_result(result: &Result<ConnectionStatus, DashboardError>) -> Self {
        match result {
            Ok(status) => Self::from_status(status),
            Err(e) => Self {
                message: Some(e.to_string()),
                ..Self::error()
            },
        }
    }

    pub fn disconnected() -> Self {
        Self {
            badge: StatusBadge::Disconnected,
            account: None,
            message: None,
        }
    }

    pub fn error() -> Self {
        Self {
            badge: StatusBadge::Error,
            account: None,
            message: None,
        }
    }

    /// Unconditional write of every status widget; no diffing against the
    /// previous view.
    pub fn render<T: StatusTarget + ?Sized>(&self, target: &T) {
        match self.badge {
            StatusBadge::Connected => target.set_connected(true),
            StatusBadge::Disconnected => target.set_connected(false),
            StatusBadge::Error => target.set_error(),
        }
        target.set_account(self.account.as_ref());
        target.set_message(self.message.as_deref());
    }

    /// Single-line summary, used for logs and snapshots. The message is
    /// appended only when not connected.
    pub fn summary(&self) -> String {
        let mut line = self.badge.to_string();
        if let Some(account) = &self.account {
            line.push_str(&format!(
                " | login {} @ {} | balance {}",
                account.login,
                account.server,
                account.balance_with_currency()
            ));
        }
        if self.badge != StatusBadge::Connected {
            if let Some(message) = &self.message {
                line.push_str(&format!(" ({message})"));
            }
        }
        line
    }
}

impl Default for StatusView {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Rendering target for connection status. `None` hides the account panel.
pub trait StatusTarget {
    fn set_connected(&self, connected: bool);
    fn set_account(&self, account: Option<&AccountView>);
    fn set_error(&self);

    /// Targets without a place for the server message ignore it.
    fn set_message(&self, _message: Option<&str>) {}
}

/// Fan-out to two targets, first one first.
impl<A: StatusTarget, B: StatusTarget> StatusTarget for (A, B) {
    fn set_connected(&self, connected: bool) {
        self.0.set_connected(connected);
        self.1.set_connected(connected);
    }

    fn set_account(&self, account: Option<&AccountView>) {
        self.0.set_account(account);
        self.1.set_account(account);
    }

    fn set_error(&self) {
        self.0.set_error();
        self.1.set_error();
    }

    fn set_message(&self, message: Option<&str>) {
        self.0.set_message(message);
        self.1.set_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_has_exactly_two_decimals() {
        assert_eq!(format_balance(1234.5), "1234.50");
        assert_eq!(format_balance(0.0), "0.00");
        assert_eq!(format_balance(99.999), "100.00");
        assert_eq!(format_balance(-12.5), "-12.50");
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(format_balance(1234.125), "1234.13");
        assert_eq!(format_balance(0.375), "0.38");
        assert_eq!(format_balance(-2.625), "-2.63");
        // 1.005 is stored just below the half, so it stays down.
        assert_eq!(format_balance(1.005), "1.00");
    }

    #[test]
    fn details_list_only_reported_figures() {
        let mut account = AccountInfo::new("7", "Demo", 100.0);
        account.equity = Some(101.5);
        account.margin_level = Some(2500.0);
        let view = AccountView::from_account(&account);
        assert_eq!(
            view.details(),
            vec![("Equity", "101.50".to_string()), ("Margin level", "2500.00%".to_string())]
        );
    }

    #[test]
    fn badge_classes_follow_bootstrap_states() {
        assert_eq!(StatusBadge::Connected.css_class(), "bg-success");
        assert_eq!(StatusBadge::Disconnected.css_class(), "bg-danger");
        assert_eq!(StatusBadge::Error.css_class(), "bg-warning");
        assert_eq!(StatusBadge::Error.to_string(), "Error");
        assert_eq!(StatusBadge::all_classes().count(), 3);
    }

    #[test]
    fn disconnected_ignores_stray_account_info() {
        let status = ConnectionStatus {
            connected: false,
            message: None,
            account_info: Some(AccountInfo::new("u1", "s1", 1.0)),
        };
        let view = StatusView::from_status(&status);
        assert_eq!(view.badge, StatusBadge::Disconnected);
        assert!(view.account.is_none());
    }
}
