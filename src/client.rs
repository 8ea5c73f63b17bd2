//! Dashboard backend API client
//!
//! The backend owns market hours, position sizing, the economic calendar,
//! the trade journal and account statistics. Every call carries an
//! `X-Request-Id` so backend logs can be matched to worker logs.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::types::{
    AccountStats, EconomicEvent, MarketHoursFeed, NewTradeEntry, PositionCalcRequest,
    PositionCalcResult, TradeEntry,
};

const MARKET_HOURS_PATH: &str = "/api/live-market-hours";
const CALCULATOR_PATH: &str = "/api/position-calculator/calculate";
const CALENDAR_PATH: &str = "/api/economic-calendar";
const TRACK_RECORD_PATH: &str = "/api/track-record";
const ACCOUNT_STATS_PATH: &str = "/api/account-stats";

/// Backend API client
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    /// Create new client against `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend_url.clone())
    }

    /// Current venue list
    pub async fn live_market_hours(&self) -> Result<MarketHoursFeed> {
        self.get(MARKET_HOURS_PATH).await
    }

    /// Delegate a position size calculation
    pub async fn calculate_position(&self, request: &PositionCalcRequest) -> Result<PositionCalcResult> {
        self.post(CALCULATOR_PATH, request).await
    }

    /// Upcoming economic events
    pub async fn economic_calendar(&self) -> Result<Vec<EconomicEvent>> {
        self.get(CALENDAR_PATH).await
    }

    /// All journal entries
    pub async fn track_record(&self) -> Result<Vec<TradeEntry>> {
        self.get(TRACK_RECORD_PATH).await
    }

    /// Store a text-only journal entry
    pub async fn add_trade(&self, entry: &NewTradeEntry) -> Result<serde_json::Value> {
        let response = reqwest::Client::new()
            .post(self.url(TRACK_RECORD_PATH))
            .header("X-Request-Id", request_id())
            .json(entry)
            .send()
            .await?;

        Self::handle_loose_response(response).await
    }

    /// Forward a multipart journal entry (note + screenshot) untouched
    pub async fn add_trade_multipart(&self, content_type: &str, body: Vec<u8>) -> Result<serde_json::Value> {
        let response = reqwest::Client::new()
            .post(self.url(TRACK_RECORD_PATH))
            .header("X-Request-Id", request_id())
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await?;

        Self::handle_loose_response(response).await
    }

    /// Account statistics for the overview
    pub async fn account_stats(&self) -> Result<AccountStats> {
        self.get(ACCOUNT_STATS_PATH).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Perform GET request
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let response = reqwest::Client::new()
            .get(self.url(path))
            .header("X-Request-Id", request_id())
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Perform POST request with a JSON body
    async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = reqwest::Client::new()
            .post(self.url(path))
            .header("X-Request-Id", request_id())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Check status codes shared by every endpoint
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(1);
            return Err(DeskError::RateLimit(retry_after));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(DeskError::Backend(format!("HTTP {status}: {error_text}")));
        }

        Ok(response)
    }

    /// Handle API response, checking for errors
    async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(DeskError::from)
    }

    /// Like `handle_response` but accepts empty or non-JSON success bodies
    async fn handle_loose_response(response: reqwest::Response) -> Result<serde_json::Value> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        Ok(parse_loose_body(&text))
    }
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn parse_loose_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::json!({ "saved": true });
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "saved": true, "message": text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = BackendClient::from_config(&Config::default());
        assert_eq!(client.url(MARKET_HOURS_PATH), "http://localhost:5000/api/live-market-hours");
        assert_eq!(client.url(CALCULATOR_PATH), "http://localhost:5000/api/position-calculator/calculate");
    }

    #[test]
    fn test_request_ids_unique() {
        assert_ne!(request_id(), request_id());
    }

    #[test]
    fn test_parse_loose_body() {
        assert_eq!(parse_loose_body(""), serde_json::json!({ "saved": true }));
        assert_eq!(parse_loose_body(r#"{"id":42}"#)["id"], 42);
        assert_eq!(parse_loose_body("Created")["message"], "Created");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_gateway_error() {
        let client = BackendClient::new("http://127.0.0.1:9");
        let err = client.live_market_hours().await.unwrap_err();
        assert!(matches!(err, DeskError::Http(_)));
        assert_eq!(err.status_code(), 502);
    }
}
