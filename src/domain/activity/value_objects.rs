use chrono::{DateTime, FixedOffset, NaiveDateTime};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

use crate::time_utils::{format_hour_key, format_hour_label};

/// Value Object - hour bucket key as the stats endpoint emits it (`2024-03-01T09:00`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct HourKey(String);

impl HourKey {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M";

    pub fn from_hour(hour: &DateTime<FixedOffset>) -> Self {
        Self(format_hour_key(hour))
    }

    /// Accepts both `YYYY-MM-DDTHH:00` and the space-separated form, and
    /// normalises to the former. Minutes must be zero.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().replacen(' ', "T", 1);
        let parsed = NaiveDateTime::parse_from_str(&normalized, Self::FORMAT)
            .map_err(|e| format!("invalid hour key '{raw}': {e}"))?;
        if parsed.format("%M").to_string() != "00" {
            return Err(format!("hour key '{raw}' is not aligned to the hour"));
        }
        Ok(Self(parsed.format("%Y-%m-%dT%H:00").to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Value Object - `HH:00` axis label in the viewer's offset
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct HourLabel(String);

impl HourLabel {
    pub fn from_hour(hour: &DateTime<FixedOffset>) -> Self {
        Self(format_hour_label(hour))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_separators() {
        let t = HourKey::parse("2024-03-01T09:00").unwrap();
        let s = HourKey::parse("2024-03-01 09:00").unwrap();
        assert_eq!(t, s);
        assert_eq!(t.value(), "2024-03-01T09:00");
    }

    #[test]
    fn parse_rejects_garbage_and_unaligned_keys() {
        assert!(HourKey::parse("yesterday").is_err());
        assert!(HourKey::parse("2024-03-01T09:30").is_err());
    }
}
