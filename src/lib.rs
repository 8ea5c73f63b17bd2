//! FX Desk Worker - Forex trader dashboard for Cloudflare Workers
//!
//! Serves a single-page dashboard and a small JSON API in front of the
//! dashboard backend.
//!
//! # Architecture
//! - Main entry point handles HTTP requests and scheduled triggers
//! - Market session timetable is evaluated here, per request, for an
//!   explicit reference instant
//! - Position sizing, economic calendar, trade journal and account stats are
//!   delegated to the backend
//! - KV storage keeps the last good venue list
//!
//! # Features
//! - Open/closed state for every venue, DST-aware
//! - 24h UTC timeline with overnight sessions split at midnight
//! - Clock skew detection for the viewer's clock

// Clippy configuration for dashboard code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::float_cmp)] // Exact comparisons on identically computed axis values

mod board;
mod calculator;
mod calendar;
mod client;
mod config;
mod dashboard;
mod error;
mod journal;
mod session;
mod time_axis;
mod timeline;
mod types;

use chrono::{DateTime, Utc};
use serde::Serialize;
use worker::{
    Context, Env, FormEntry, Request, Response, Router, ScheduleContext, ScheduledEvent,
    console_error, console_log, console_warn, event,
};

pub use board::{BoardSnapshot, ClockSkewWarning, Diagnostic, SessionBoard, SessionView, Tick};
pub use calendar::{CalendarEntry, Impact};
pub use client::BackendClient;
pub use config::Config;
pub use error::DeskError;
pub use journal::JournalRow;
pub use session::{MarketSession, SessionState, TimeOfDay, WindowKind};
pub use timeline::{RenderSegment, UtcWindow, derive_window, now_marker, project};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

const SESSIONS_KEY: &str = "market_sessions";

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.environment,
                timestamp: Utc::now().to_rfc3339(),
            })
        })
        // Dashboard UI
        .get("/", |_req, ctx| dashboard_page(&ctx.env))
        .get("/dashboard", |_req, ctx| dashboard_page(&ctx.env))
        // Venue states, UTC windows and timeline segments
        .get_async("/api/market-hours", |req, ctx| async move {
            json_response(market_hours(&req, &ctx.env).await)
        })
        // Account statistics
        .get_async("/api/stats", |_req, ctx| async move {
            json_response(account_stats(&ctx.env).await)
        })
        // Position size calculation (delegated)
        .post_async("/api/position-calculator", |mut req, ctx| async move {
            json_response(calculate_position(&mut req, &ctx.env).await)
        })
        // Economic calendar (delegated, filtered here)
        .get_async("/api/economic-calendar", |req, ctx| async move {
            json_response(economic_calendar(&req, &ctx.env).await)
        })
        // Trade journal
        .get_async("/api/track-record", |_req, ctx| async move {
            json_response(track_record(&ctx.env).await)
        })
        .post_async("/api/track-record", |mut req, ctx| async move {
            json_response(add_trade(&mut req, &ctx.env).await)
        })
        // Fallback
        .run(req, env)
        .await
}

/// Scheduled trigger (cron job)
#[event(scheduled)]
async fn scheduled(_event: ScheduledEvent, env: Env, _ctx: ScheduleContext) {
    console_error_panic_hook::set_once();

    match refresh_session_cache(&env).await {
        Ok(count) => console_log!("Session cache refreshed: {} venues", count),
        Err(e) => console_error!("Session cache refresh failed: {}", e),
    }
}

fn dashboard_page(env: &Env) -> WResult<Response> {
    match Config::from_env(env) {
        Ok(config) => Response::from_html(dashboard::dashboard_html(&config)),
        Err(e) => Response::error(format!("Config error: {e}"), 500),
    }
}

/// Serialize a handler result, turning errors into `{error, message}` with a status
fn json_response<T: Serialize>(result: error::Result<T>) -> WResult<Response> {
    match result {
        Ok(body) => Response::from_json(&body),
        Err(e) => {
            console_warn!("Request failed: {}", e);
            Ok(Response::from_json(&ApiError::new(e.to_string()))?.with_status(e.status_code()))
        }
    }
}

fn query_param(req: &Request, key: &str) -> Option<String> {
    req.url()
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

fn parse_instant(value: &str) -> error::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DeskError::Validation(format!("Invalid reference instant {value}")))
}

/// Evaluate the session board for the request's reference instant
///
/// `source=cache` re-evaluates the list fetched when the view mounted;
/// anything else fetches a fresh list from the backend.
async fn market_hours(req: &Request, env: &Env) -> error::Result<BoardSnapshot> {
    let config = Config::from_env(env)?;
    let worker_now = Utc::now();

    let tick = match query_param(req, "at") {
        Some(at) => Tick::from_viewer(parse_instant(&at)?, worker_now),
        None => Tick::at(worker_now),
    };
    let prefer_cache = query_param(req, "source").as_deref() == Some("cache");

    let (markets, stale) = load_sessions(env, &config, prefer_cache).await?;

    let mut snapshot = SessionBoard::from_config(&config).evaluate(&markets, &tick);
    snapshot.stale = stale;

    for diagnostic in snapshot.diagnostics() {
        console_warn!("{}", diagnostic);
    }
    if config.log_level == "debug" {
        console_log!(
            "Market hours: {} venues, {} open at {} (stale: {})",
            snapshot.sessions.len(),
            snapshot.open_count,
            snapshot.reference_time,
            stale
        );
    }

    Ok(snapshot)
}

/// Venue list plus whether it is a fallback copy
async fn load_sessions(env: &Env, config: &Config, prefer_cache: bool) -> error::Result<(Vec<SessionFeed>, bool)> {
    if prefer_cache {
        if let Some(cached) = get_cached_sessions(env).await {
            return Ok((cached.markets, false));
        }
    }

    match BackendClient::from_config(config).live_market_hours().await {
        Ok(feed) => {
            if let Err(e) = save_cached_sessions(env, &feed.markets).await {
                console_warn!("Could not cache venue list: {}", e);
            }
            Ok((feed.markets, false))
        }
        Err(e) => {
            console_warn!("Market hours fetch failed, trying cache: {}", e);
            match get_cached_sessions(env).await {
                Some(cached) => Ok((cached.markets, true)),
                None => Err(e),
            }
        }
    }
}

/// Fetch the venue list and replace the KV copy wholesale
async fn refresh_session_cache(env: &Env) -> error::Result<usize> {
    let config = Config::from_env(env)?;
    let feed = BackendClient::from_config(&config).live_market_hours().await?;
    save_cached_sessions(env, &feed.markets).await?;
    Ok(feed.markets.len())
}

/// Get the last good venue list from KV storage
async fn get_cached_sessions(env: &Env) -> Option<CachedSessions> {
    match read_cached_sessions(env).await {
        Ok(cached) => cached,
        Err(e) => {
            console_warn!("Session cache read failed: {}", e);
            None
        }
    }
}

async fn read_cached_sessions(env: &Env) -> error::Result<Option<CachedSessions>> {
    let kv = env.kv("STATE").map_err(DeskError::storage)?;
    kv.get(SESSIONS_KEY)
        .json::<CachedSessions>()
        .await
        .map_err(DeskError::storage)
}

/// Save the venue list to KV storage
async fn save_cached_sessions(env: &Env, markets: &[SessionFeed]) -> error::Result<()> {
    let cached = CachedSessions {
        fetched_at: Utc::now().to_rfc3339(),
        markets: markets.to_vec(),
    };
    let kv = env.kv("STATE").map_err(DeskError::storage)?;
    kv.put(SESSIONS_KEY, &cached)
        .map_err(DeskError::storage)?
        .execute()
        .await
        .map_err(DeskError::storage)?;
    Ok(())
}

async fn account_stats(env: &Env) -> error::Result<AccountStats> {
    let config = Config::from_env(env)?;
    BackendClient::from_config(&config).account_stats().await
}

async fn calculate_position(req: &mut Request, env: &Env) -> error::Result<PositionCalcResult> {
    let config = Config::from_env(env)?;
    let request: PositionCalcRequest = req
        .json()
        .await
        .map_err(|e| DeskError::Validation(format!("Please enter valid positive numbers for all fields ({e})")))?;

    calculator::validate(&request, &config.calculator_symbols)?;
    BackendClient::from_config(&config).calculate_position(&request).await
}

async fn economic_calendar(req: &Request, env: &Env) -> error::Result<Vec<CalendarEntry>> {
    let config = Config::from_env(env)?;
    let events = BackendClient::from_config(&config).economic_calendar().await?;
    Ok(calendar::filter_by_country(events, query_param(req, "country").as_deref()))
}

async fn track_record(env: &Env) -> error::Result<Vec<JournalRow>> {
    let config = Config::from_env(env)?;
    let entries = BackendClient::from_config(&config).track_record().await?;
    Ok(journal::rows(entries, config.journal_preview_chars))
}

/// New journal entry: multipart (with screenshot) is forwarded verbatim, JSON is checked and dated
async fn add_trade(req: &mut Request, env: &Env) -> error::Result<serde_json::Value> {
    let config = Config::from_env(env)?;
    let client = BackendClient::from_config(&config);
    let content_type = req.headers().get("Content-Type")?.unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let form = req.clone()?.form_data().await?;
        match form.get("note") {
            Some(FormEntry::Field(note)) if !note.trim().is_empty() => {}
            _ => return Err(DeskError::Validation("Trade note is required".into())),
        }

        let body = req.bytes().await?;
        return client.add_trade_multipart(&content_type, body).await;
    }

    let entry: NewTradeEntry = req
        .json()
        .await
        .map_err(|e| DeskError::Validation(format!("Invalid journal entry ({e})")))?;
    let entry = journal::prepare_entry(entry, Utc::now())?;
    client.add_trade(&entry).await
}
