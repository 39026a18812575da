use std::collections::HashMap;

use gloo::net::http::Request;
use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::domain::{
    activity::StatsSnapshot,
    errors::{DashboardResult, TransportError},
    logging::{LogComponent, LogLevel, get_logger},
    repositories::DashboardApi,
    status::ConnectionStatus,
};

const STATS_ENDPOINT: &str = "/api/stats";
const CONNECTION_STATUS_ENDPOINT: &str = "/api/connection-status";

/// Dashboard backend client on top of gloo's fetch wrapper.
///
/// No timeout or retry is configured; both are left to the browser.
#[derive(Clone)]
pub struct GlooDashboardClient {
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl Default for GlooDashboardClient {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl GlooDashboardClient {
    pub fn new(base_url: String) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url,
            default_headers,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// GET with the body decoded as JSON. Non-2xx statuses are errors even
    /// when the body is valid JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, TransportError> {
        let url = HttpUtils::join_url(&self.base_url, endpoint);

        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET JSON: {url}"));

        let mut request = Request::get(&url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| TransportError::Unreachable {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        if !response.ok() {
            let error = TransportError::Status {
                url: url.clone(),
                status: response.status(),
                status_text: response.status_text(),
            };
            get_logger().warn(LogComponent::Infrastructure("HTTP"), &error.to_string());
            return Err(error);
        }

        let body = response.text().await.map_err(|e| TransportError::Unreachable {
            url: url.clone(),
            reason: format!("failed to read body: {e}"),
        })?;

        let data = HttpUtils::decode_json(&url, &body)?;

        get_logger().log_with_metadata(
            LogLevel::Debug,
            LogComponent::Infrastructure("HTTP"),
            &format!("✅ GET JSON {url}"),
            &format!("{} bytes", body.len()),
        );

        Ok(data)
    }
}

impl DashboardApi for GlooDashboardClient {
    async fn fetch_stats(&self, hours: u32) -> DashboardResult<StatsSnapshot> {
        Ok(self.get_json(&format!("{STATS_ENDPOINT}?hours={hours}")).await?)
    }

    async fn fetch_connection_status(&self) -> DashboardResult<ConnectionStatus> {
        Ok(self.get_json(CONNECTION_STATUS_ENDPOINT).await?)
    }
}

pub struct HttpUtils;

impl HttpUtils {
    pub fn join_url(base_url: &str, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") || base_url.is_empty() {
            return endpoint.to_string();
        }
        format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
    }

    pub fn decode_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::MalformedBody {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_keeps_relative_path() {
        assert_eq!(HttpUtils::join_url("", "/api/connection-status"), "/api/connection-status");
    }

    #[test]
    fn base_url_slashes_are_collapsed() {
        assert_eq!(
            HttpUtils::join_url("https://bot.example.com/", "/api/stats?hours=24"),
            "https://bot.example.com/api/stats?hours=24"
        );
    }

    #[test]
    fn html_error_page_is_malformed_body() {
        let err = HttpUtils::decode_json::<ConnectionStatus>("/api/connection-status", "<html>login</html>")
            .unwrap_err();
        assert!(matches!(err, TransportError::MalformedBody { .. }));
    }

    #[test]
    fn stats_body_decodes() {
        let snapshot: StatsSnapshot = HttpUtils::decode_json(
            "/api/stats?hours=24",
            r#"{"alerts_count": 5, "alerts_by_hour": {"2024-03-01 09:00": 5}, "trades_by_symbol": {"EURUSD": {"count": 2, "profit": 12.5}}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.alerts_by_hour["2024-03-01 09:00"], 5);
        assert_eq!(snapshot.trades_by_symbol["EURUSD"].count, 2);
    }
}
