//! Common types for the dashboard
//!
//! Wire contracts shared with the backend and with the dashboard page.

use serde::{Deserialize, Serialize};

/// One trading venue as delivered by the backend market-hours feed
///
/// String fields default to empty so a single malformed venue does not
/// reject the whole feed; the board reports it as a configuration error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeed {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default, alias = "open")]
    pub open_local: String,
    #[serde(default, alias = "close")]
    pub close_local: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Open state as computed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    /// Today's open instant (RFC 3339) as computed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_utc: Option<String>,
    /// Today's close instant (RFC 3339) as computed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_utc: Option<String>,
}

/// `/api/live-market-hours` response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketHoursFeed {
    pub markets: Vec<SessionFeed>,
}

/// Last good session list, stored in KV
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSessions {
    pub fetched_at: String,
    pub markets: Vec<SessionFeed>,
}

/// Position calculator input, forwarded to the backend as-is once validated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionCalcRequest {
    pub account_balance: f64,
    pub risk_percent: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub symbol: String,
}

/// Position calculator result computed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionCalcResult {
    /// Lots, preformatted by the backend
    #[serde(default)]
    pub position_size: serde_json::Value,
    #[serde(default)]
    pub risk_amount: f64,
    #[serde(default)]
    pub rr_ratio: String,
    /// Pips, preformatted by the backend
    #[serde(default)]
    pub stop_distance: serde_json::Value,
}

/// Economic calendar event (backend field names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicEvent {
    #[serde(default)]
    pub event: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    /// 1 = low, 2 = medium, 3 = high
    #[serde(rename = "Importance", default)]
    pub importance: u8,
}

/// Trade journal entry stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEntry {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
}

/// New journal entry submitted as JSON (no screenshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTradeEntry {
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Account statistics for the overview cards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    #[serde(default)]
    pub total_trades: u64,
    /// Percent
    #[serde(default)]
    pub win_rate: f64,
    /// Account currency
    #[serde(default)]
    pub monthly_pnl: f64,
    /// Percent of balance
    #[serde(default)]
    pub risk_per_trade: f64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}

/// Error body returned by every `/api` route
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: bool,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: true, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_feed_accepts_both_spellings() {
        let legacy: SessionFeed = serde_json::from_str(
            r##"{"name":"Tokyo","timezone":"Asia/Tokyo","open":"09:00","close":"15:00","color":"#f44336","isOpen":true}"##,
        )
        .unwrap();
        assert_eq!(legacy.open_local, "09:00");
        assert_eq!(legacy.close_local, "15:00");
        assert_eq!(legacy.is_open, Some(true));

        let current: SessionFeed = serde_json::from_str(
            r#"{"name":"London","timezone":"Europe/London","openLocal":"08:00","closeLocal":"16:30"}"#,
        )
        .unwrap();
        assert_eq!(current.close_local, "16:30");
        assert!(current.color.is_none());
        assert!(current.open_utc.is_none());
    }

    #[test]
    fn test_session_feed_tolerates_missing_fields() {
        let feed: MarketHoursFeed =
            serde_json::from_str(r#"{"markets":[{"name":"Broken"},{"name":"Sydney","timezone":"Australia/Sydney","open":"08:00","close":"16:00"}]}"#)
                .unwrap();
        assert_eq!(feed.markets.len(), 2);
        assert!(feed.markets[0].timezone.is_empty());
    }

    #[test]
    fn test_calc_request_wire_names() {
        let req = PositionCalcRequest {
            account_balance: 10_000.0,
            risk_percent: 1.0,
            entry_price: 1.085,
            stop_loss: 1.08,
            take_profit: 1.095,
            symbol: "EUR/USD".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("accountBalance"));
        assert!(json.contains("takeProfit"));
    }

    #[test]
    fn test_economic_event_field_names() {
        let event: EconomicEvent = serde_json::from_str(
            r#"{"event":"Non-Farm Payrolls","Country":"United States","Date":"2024-02-02T13:30:00Z","Importance":3}"#,
        )
        .unwrap();
        assert_eq!(event.country, "United States");
        assert_eq!(event.importance, 3);
    }
}
