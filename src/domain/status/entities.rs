use serde::{Deserialize, Deserializer, Serialize};

/// `GET /api/connection-status` body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectionStatus {
    /// Absent means not connected.
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub account_info: Option<AccountInfo>,
}

/// Trading account as reported by the terminal bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(deserialize_with = "login_from_string_or_number")]
    pub login: String,
    pub server: String,
    pub balance: f64,
    #[serde(default)]
    pub equity: Option<f64>,
    #[serde(default)]
    pub margin: Option<f64>,
    #[serde(default)]
    pub free_margin: Option<f64>,
    #[serde(default)]
    pub margin_level: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl AccountInfo {
    pub fn new(login: impl Into<String>, server: impl Into<String>, balance: f64) -> Self {
        Self {
            login: login.into(),
            server: server.into(),
            balance,
            equity: None,
            margin: None,
            free_margin: None,
            margin_level: None,
            currency: None,
        }
    }
}

// The server sends the numeric account number straight through.
fn login_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Login {
        Text(String),
        Number(i64),
    }

    Ok(match Login::deserialize(deserializer)? {
        Login::Text(text) => text,
        Login::Number(number) => number.to_string(),
    })
}
