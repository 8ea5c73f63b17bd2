//! Dashboard module - Trader web interface
//!
//! Provides a single-page dashboard served by the worker.
//! Separated into HTML, CSS, and JS submodules for maintainability.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: Routing, API calls, market hours tick
//!
//! # Features
//! - Account statistics overview
//! - Market session cards and 24h UTC timeline with now marker
//! - Position calculator, economic calendar, trade journal
//! - Market hours refresh every tick (60 seconds by default)

mod css;
mod html;
mod js;

use crate::config::Config;

/// Settings the page script reads from `DESK`
fn page_settings(config: &Config) -> String {
    serde_json::json!({
        "refreshMs": config.tick_interval_seconds * 1000,
        "symbols": config.calculator_symbols,
    })
    .to_string()
}

/// Generate the complete dashboard HTML page
pub fn dashboard_html(config: &Config) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FX Desk</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
const DESK = {settings};
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        settings = page_settings(config),
        js = js::SCRIPT
    )
}
