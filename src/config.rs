//! Configuration management for the dashboard worker

use crate::error::{DeskError, Result};
use worker::Env;

/// Dashboard worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Base URL of the dashboard backend (market hours, calculator, calendar, journal)
    pub backend_url: String,

    /// Market hours refresh cadence handed to the page
    pub tick_interval_seconds: u64,

    /// Max tolerated gap between the page clock and the worker clock
    pub max_clock_skew_minutes: i64,

    /// Pairs accepted by the position calculator
    pub calculator_symbols: Vec<String>,

    /// Journal note preview length (characters)
    pub journal_preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: "info".to_string(),
            backend_url: "http://localhost:5000".to_string(),
            tick_interval_seconds: 60,
            max_clock_skew_minutes: 10,
            calculator_symbols: default_symbols(),
            journal_preview_chars: 100,
        }
    }
}

fn default_symbols() -> Vec<String> {
    ["EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Split a comma separated env value, dropping blanks
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env.var("ENVIRONMENT").map_or(defaults.environment, |v| v.to_string()),

            log_level: env.var("LOG_LEVEL").map_or(defaults.log_level, |v| v.to_string()),

            backend_url: env.var("BACKEND_URL")
                .map(|v| v.to_string().trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),

            tick_interval_seconds: env.var("TICK_INTERVAL_SECONDS")
                .map(|v| v.to_string().parse().unwrap_or(60))
                .unwrap_or(defaults.tick_interval_seconds),

            max_clock_skew_minutes: env.var("MAX_CLOCK_SKEW_MINUTES")
                .map(|v| v.to_string().parse().unwrap_or(10))
                .unwrap_or(defaults.max_clock_skew_minutes),

            calculator_symbols: env.var("CALCULATOR_SYMBOLS")
                .map(|v| parse_list(&v.to_string()))
                .unwrap_or(defaults.calculator_symbols),

            journal_preview_chars: env.var("JOURNAL_PREVIEW_CHARS")
                .map(|v| v.to_string().parse().unwrap_or(100))
                .unwrap_or(defaults.journal_preview_chars),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.backend_url.starts_with("http") {
            return Err(DeskError::Config("BACKEND_URL must be an http(s) URL".into()));
        }
        if self.tick_interval_seconds == 0 {
            return Err(DeskError::Config("tick_interval_seconds must be positive".into()));
        }
        if self.max_clock_skew_minutes < 0 {
            return Err(DeskError::Config("max_clock_skew_minutes must not be negative".into()));
        }
        if self.calculator_symbols.is_empty() {
            return Err(DeskError::Config("At least one calculator symbol required".into()));
        }
        if self.journal_preview_chars == 0 {
            return Err(DeskError::Config("journal_preview_chars must be positive".into()));
        }
        Ok(())
    }
}
