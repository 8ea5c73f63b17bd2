//! Position size calculator input checks
//!
//! The sizing formula lives in the backend. The worker only refuses input
//! the backend should never see.

use crate::error::{DeskError, Result};
use crate::types::PositionCalcRequest;

/// Reject non-positive or non-finite numbers and unsupported pairs
pub fn validate(request: &PositionCalcRequest, allowed_symbols: &[String]) -> Result<()> {
    let fields = [
        ("accountBalance", request.account_balance),
        ("riskPercent", request.risk_percent),
        ("entryPrice", request.entry_price),
        ("stopLoss", request.stop_loss),
        ("takeProfit", request.take_profit),
    ];

    let invalid: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| !value.is_finite() || *value <= 0.0)
        .map(|(name, _)| *name)
        .collect();

    if !invalid.is_empty() {
        return Err(DeskError::Validation(format!(
            "Please enter valid positive numbers for: {}",
            invalid.join(", ")
        )));
    }

    if request.risk_percent > 100.0 {
        return Err(DeskError::Validation("riskPercent cannot exceed 100".into()));
    }

    if !allowed_symbols.iter().any(|s| s.eq_ignore_ascii_case(&request.symbol)) {
        return Err(DeskError::Validation(format!(
            "Unsupported symbol {}",
            request.symbol
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn request() -> PositionCalcRequest {
        PositionCalcRequest {
            account_balance: 10_000.0,
            risk_percent: 2.0,
            entry_price: 1.0850,
            stop_loss: 1.0820,
            take_profit: 1.0910,
            symbol: "EUR/USD".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let config = Config::default();
        assert!(validate(&request(), &config.calculator_symbols).is_ok());

        let mut lower = request();
        lower.symbol = "usd/jpy".to_string();
        assert!(validate(&lower, &config.calculator_symbols).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let config = Config::default();
        let mut req = request();
        req.stop_loss = 0.0;
        req.account_balance = -5.0;

        let err = validate(&req, &config.calculator_symbols).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("stopLoss"));
        assert!(message.contains("accountBalance"));
        assert!(!message.contains("entryPrice"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_rejects_nan_and_excess_risk() {
        let config = Config::default();
        let mut req = request();
        req.entry_price = f64::NAN;
        assert!(validate(&req, &config.calculator_symbols).is_err());

        let mut req = request();
        req.risk_percent = 150.0;
        assert!(validate(&req, &config.calculator_symbols).is_err());
    }

    #[test]
    fn test_rejects_unknown_symbol() {
        let config = Config::default();
        let mut req = request();
        req.symbol = "BTC/USD".to_string();
        assert!(matches!(
            validate(&req, &config.calculator_symbols),
            Err(DeskError::Validation(_))
        ));
    }
}
