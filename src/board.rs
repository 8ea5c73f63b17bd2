//! Session board - one immutable snapshot per tick
//!
//! Turns the backend session feed plus an explicit reference instant into
//! everything the Market Hours view renders: open state, UTC windows,
//! timeline segments and the shared now marker.
//!
//! # Rules
//! - Local derivation is authoritative for open state; the backend's `isOpen`
//!   is carried as `reportedOpen` and only compared.
//! - A venue that fails validation is `UNKNOWN` with no segments; the rest of
//!   the board is unaffected.
//! - Nothing here reads the clock or logs. Diagnostics are returned for the
//!   caller to log.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::error::DeskError;
use crate::session::{MarketSession, SessionState};
use crate::time_axis;
use crate::timeline::{self, RenderSegment, UtcWindow};
use crate::types::SessionFeed;

/// One minute on the hour axis; tolerance when comparing against backend instants
const REMOTE_TOLERANCE_HOURS: f64 = 1.0 / 60.0 + 1e-9;

/// Explicit time input for one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Instant the board is evaluated for (usually the viewer's clock)
    pub reference: DateTime<Utc>,
    /// Worker clock, used only for the skew check
    pub trusted_now: DateTime<Utc>,
}

impl Tick {
    /// Evaluate at the worker's own instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { reference: instant, trusted_now: instant }
    }

    /// Evaluate at a viewer-supplied instant, checked against the worker clock
    pub fn from_viewer(reference: DateTime<Utc>, trusted_now: DateTime<Utc>) -> Self {
        Self { reference, trusted_now }
    }
}

/// Reference instant looks wrong; evaluation still uses it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockSkewWarning {
    pub reference: String,
    pub trusted_now: String,
    pub skew_minutes: i64,
    pub reason: String,
}

impl fmt::Display for ClockSkewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clock skew: {} (reference {}, worker {}, {} min)",
            self.reason, self.reference, self.trusted_now, self.skew_minutes
        )
    }
}

/// Render-ready view of one venue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub timezone: String,
    pub open_local: String,
    pub close_local: String,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_utc_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_utc_hours: Option<f64>,
    /// Window wraps past UTC midnight on the axis
    pub overnight: bool,
    pub segments: Vec<RenderSegment>,
    /// Backend's own open flag, display fallback only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_open: Option<bool>,
    /// Now marker lands inside a segment exactly when the venue is open
    pub marker_agrees: bool,
    /// Backend open flag / UTC instants match local derivation; `None` when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_agrees: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionView {
    fn unknown(feed: &SessionFeed, err: &DeskError) -> Self {
        Self {
            name: feed.name.clone(),
            color: feed.color.clone(),
            timezone: feed.timezone.clone(),
            open_local: feed.open_local.clone(),
            close_local: feed.close_local.clone(),
            state: SessionState::Unknown,
            open_utc_hours: None,
            close_utc_hours: None,
            overnight: false,
            segments: vec![],
            reported_open: feed.is_open,
            marker_agrees: true,
            remote_agrees: None,
            error: Some(err.to_string()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }
}

/// Something the caller should log after an evaluation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Configuration { session: String, message: String },
    ClockSkew(ClockSkewWarning),
    MarkerMismatch { session: String },
    RemoteMismatch { session: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Configuration { session, message } => {
                write!(f, "Session '{session}' excluded: {message}")
            }
            Diagnostic::ClockSkew(warning) => write!(f, "{warning}"),
            Diagnostic::MarkerMismatch { session } => {
                write!(f, "Session '{session}': now marker disagrees with open state")
            }
            Diagnostic::RemoteMismatch { session } => {
                write!(f, "Session '{session}': backend hours disagree with local derivation")
            }
        }
    }
}

/// Everything the Market Hours view needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub reference_time: String,
    pub now_marker: f64,
    pub sessions: Vec<SessionView>,
    pub open_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_warning: Option<ClockSkewWarning>,
    /// Session list came from the cache, not a fresh backend fetch
    pub stale: bool,
    /// Page refresh cadence
    pub refresh_seconds: u64,
}

impl BoardSnapshot {
    /// Sessions that made it onto the timeline
    pub fn timeline(&self) -> impl Iterator<Item = &SessionView> {
        self.sessions.iter().filter(|s| s.state != SessionState::Unknown)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        if let Some(warning) = &self.clock_warning {
            out.push(Diagnostic::ClockSkew(warning.clone()));
        }
        for view in &self.sessions {
            if let Some(message) = &view.error {
                out.push(Diagnostic::Configuration {
                    session: view.name.clone(),
                    message: message.clone(),
                });
                continue;
            }
            if !view.marker_agrees {
                out.push(Diagnostic::MarkerMismatch { session: view.name.clone() });
            }
            if view.remote_agrees == Some(false) {
                out.push(Diagnostic::RemoteMismatch { session: view.name.clone() });
            }
        }
        out
    }
}

/// Evaluates session feeds into snapshots
#[derive(Debug, Clone)]
pub struct SessionBoard {
    max_clock_skew: Duration,
    refresh_seconds: u64,
}

impl Default for SessionBoard {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionBoard {
    pub fn new(max_clock_skew_minutes: i64, refresh_seconds: u64) -> Self {
        Self {
            max_clock_skew: Duration::minutes(max_clock_skew_minutes),
            refresh_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_clock_skew_minutes, config.tick_interval_seconds)
    }

    /// Flag a reference instant outside a sane range
    pub fn check_clock(&self, tick: &Tick) -> Option<ClockSkewWarning> {
        let skew = tick.reference - tick.trusted_now;
        let warning = |reason: &str| ClockSkewWarning {
            reference: tick.reference.to_rfc3339(),
            trusted_now: tick.trusted_now.to_rfc3339(),
            skew_minutes: skew.num_minutes(),
            reason: reason.to_string(),
        };

        let earliest = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single();
        let latest = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).single();
        let out_of_era = earliest.is_some_and(|e| tick.reference < e)
            || latest.is_some_and(|l| tick.reference >= l);

        if out_of_era {
            Some(warning("reference instant outside 2000-2100"))
        } else if skew.abs() > self.max_clock_skew {
            Some(warning("viewer clock differs from worker clock"))
        } else {
            None
        }
    }

    /// Evaluate one view of the venue list at `tick`
    pub fn evaluate(&self, feed: &[SessionFeed], tick: &Tick) -> BoardSnapshot {
        let reference = tick.reference;
        let now_hour = time_axis::hour_of_utc_day(&reference);
        let mut seen = HashSet::new();

        let sessions: Vec<SessionView> = feed
            .iter()
            .map(|entry| {
                let built = MarketSession::try_from(entry).and_then(|session| {
                    if seen.insert(session.name.clone()) {
                        Ok(session)
                    } else {
                        Err(DeskError::InvalidSession(format!(
                            "duplicate session name '{}'",
                            session.name
                        )))
                    }
                });

                match built {
                    Ok(session) => Self::view(&session, entry, &reference, now_hour),
                    Err(err) => SessionView::unknown(entry, &err),
                }
            })
            .collect();

        let open_count = sessions.iter().filter(|s| s.is_open()).count();

        BoardSnapshot {
            reference_time: reference.to_rfc3339(),
            now_marker: timeline::now_marker(&reference),
            sessions,
            open_count,
            clock_warning: self.check_clock(tick),
            stale: false,
            refresh_seconds: self.refresh_seconds,
        }
    }

    fn view(session: &MarketSession, feed: &SessionFeed, reference: &DateTime<Utc>, now_hour: f64) -> SessionView {
        let state = session.state(reference);
        let (window, segments) = timeline::project_session(session, reference);
        let is_open = state == SessionState::Open;

        SessionView {
            name: session.name.clone(),
            color: session.color.clone(),
            timezone: session.timezone.name().to_string(),
            open_local: session.open_local.to_string(),
            close_local: session.close_local.to_string(),
            state,
            open_utc_hours: Some(window.open_hours),
            close_utc_hours: Some(window.close_hours),
            overnight: window.crosses_midnight(),
            segments,
            reported_open: feed.is_open,
            marker_agrees: window.contains(now_hour) == is_open,
            remote_agrees: remote_agreement(feed, &window, is_open),
            error: None,
        }
    }
}

/// Hour-of-day of a backend RFC 3339 instant
fn remote_hours(value: Option<&String>) -> Option<f64> {
    let instant = DateTime::parse_from_rfc3339(value?).ok()?.with_timezone(&Utc);
    Some(time_axis::hour_of_utc_day(&instant))
}

fn same_axis_position(a: f64, b: f64) -> bool {
    let d = (a - b).abs();
    d.min(time_axis::AXIS_HOURS - d) <= REMOTE_TOLERANCE_HOURS
}

fn remote_agreement(feed: &SessionFeed, window: &UtcWindow, is_open: bool) -> Option<bool> {
    let mut checks = Vec::new();

    if let Some(reported) = feed.is_open {
        checks.push(reported == is_open);
    }
    if !window.full_day {
        if let (Some(open), Some(close)) =
            (remote_hours(feed.open_utc.as_ref()), remote_hours(feed.close_utc.as_ref()))
        {
            checks.push(
                same_axis_position(open, window.open_hours)
                    && same_axis_position(close, window.close_hours),
            );
        }
    }

    if checks.is_empty() {
        None
    } else {
        Some(checks.into_iter().all(|ok| ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn feed(name: &str, tz: &str, open: &str, close: &str) -> SessionFeed {
        SessionFeed {
            name: name.to_string(),
            timezone: tz.to_string(),
            open_local: open.to_string(),
            close_local: close.to_string(),
            color: None,
            is_open: None,
            open_utc: None,
            close_utc: None,
        }
    }

    fn majors() -> Vec<SessionFeed> {
        vec![
            feed("Sydney", "Australia/Sydney", "08:00", "16:00"),
            feed("Tokyo", "Asia/Tokyo", "09:00", "15:00"),
            feed("London", "Europe/London", "08:00", "16:30"),
            feed("New York", "America/New_York", "09:30", "16:00"),
        ]
    }

    #[test]
    fn test_evaluate_majors() {
        let board = SessionBoard::default();
        // 15:00 UTC, January: London and New York open
        let snapshot = board.evaluate(&majors(), &Tick::at(utc(2024, 1, 15, 15, 0)));

        assert_eq!(snapshot.sessions.len(), 4);
        assert_eq!(snapshot.open_count, 2);
        assert!((snapshot.now_marker - 62.5).abs() < 1e-9);
        assert!(snapshot.clock_warning.is_none());
        assert!(!snapshot.stale);

        let names: Vec<_> = snapshot.sessions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sydney", "Tokyo", "London", "New York"]);

        let sydney = &snapshot.sessions[0];
        assert_eq!(sydney.state, SessionState::Closed);
        assert!(sydney.overnight);
        assert_eq!(sydney.segments.len(), 2);

        let ny = &snapshot.sessions[3];
        assert_eq!(ny.state, SessionState::Open);
        assert_eq!(ny.segments.len(), 1);
        assert!(snapshot.sessions.iter().all(|s| s.marker_agrees));
    }

    #[test]
    fn test_bad_session_is_isolated() {
        let mut sessions = majors();
        sessions.insert(1, feed("Mumbai", "Asia/Bombay-ish", "09:15", "15:30"));
        sessions.push(feed("Zurich", "Europe/Zurich", "08:00", "17:75"));

        let snapshot = SessionBoard::default().evaluate(&sessions, &Tick::at(utc(2024, 1, 15, 15, 0)));

        assert_eq!(snapshot.sessions.len(), 6);
        let mumbai = &snapshot.sessions[1];
        assert_eq!(mumbai.state, SessionState::Unknown);
        assert!(mumbai.segments.is_empty());
        assert!(mumbai.error.as_deref().is_some_and(|e| e.contains("timezone")));
        assert_eq!(snapshot.sessions[5].state, SessionState::Unknown);

        assert_eq!(snapshot.timeline().count(), 4);
        assert_eq!(snapshot.open_count, 2);

        let diagnostics = snapshot.diagnostics();
        assert_eq!(
            diagnostics
                .iter()
                .filter(|d| matches!(d, Diagnostic::Configuration { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let sessions = vec![
            feed("London", "Europe/London", "08:00", "16:30"),
            feed("London", "Europe/London", "07:00", "16:00"),
        ];
        let snapshot = SessionBoard::default().evaluate(&sessions, &Tick::at(utc(2024, 1, 15, 9, 0)));

        assert_eq!(snapshot.sessions[0].state, SessionState::Open);
        assert_eq!(snapshot.sessions[1].state, SessionState::Unknown);
        assert!(snapshot.sessions[1].error.as_deref().is_some_and(|e| e.contains("duplicate")));
    }

    #[test]
    fn test_full_day_session_on_board() {
        let sessions = vec![feed("Crypto", "UTC", "00:00", "00:00")];
        let snapshot = SessionBoard::default().evaluate(&sessions, &Tick::at(utc(2024, 6, 1, 3, 17)));

        let crypto = &snapshot.sessions[0];
        assert_eq!(crypto.state, SessionState::Open);
        assert_eq!(crypto.segments, vec![RenderSegment { start: 0.0, width: 100.0 }]);
        assert!(!crypto.overnight);
    }

    #[test]
    fn test_remote_fields_are_cross_checked() {
        let mut tokyo = feed("Tokyo", "Asia/Tokyo", "09:00", "15:00");
        tokyo.is_open = Some(true);
        tokyo.open_utc = Some("2024-01-15T00:00:00Z".to_string());
        tokyo.close_utc = Some("2024-01-15T06:00:00.000Z".to_string());

        let mut london = feed("London", "Europe/London", "08:00", "16:30");
        // Backend still thinks London is open
        london.is_open = Some(true);

        let snapshot = SessionBoard::default().evaluate(&[tokyo, london], &Tick::at(utc(2024, 1, 15, 3, 0)));

        assert_eq!(snapshot.sessions[0].remote_agrees, Some(true));
        assert_eq!(snapshot.sessions[1].state, SessionState::Closed);
        assert_eq!(snapshot.sessions[1].reported_open, Some(true));
        assert_eq!(snapshot.sessions[1].remote_agrees, Some(false));
        assert!(snapshot
            .diagnostics()
            .contains(&Diagnostic::RemoteMismatch { session: "London".to_string() }));
    }

    #[test]
    fn test_remote_absent_means_no_verdict() {
        let snapshot = SessionBoard::default().evaluate(&majors(), &Tick::at(utc(2024, 1, 15, 3, 0)));
        assert!(snapshot.sessions.iter().all(|s| s.remote_agrees.is_none()));
        assert!(snapshot.diagnostics().is_empty());
    }

    #[test]
    fn test_clock_skew_warning() {
        let board = SessionBoard::new(10, 60);
        let worker_now = utc(2024, 1, 15, 12, 0);

        assert!(board.check_clock(&Tick::from_viewer(utc(2024, 1, 15, 12, 5), worker_now)).is_none());

        let skewed = board
            .check_clock(&Tick::from_viewer(utc(2024, 1, 15, 13, 0), worker_now))
            .unwrap();
        assert_eq!(skewed.skew_minutes, 60);

        let ancient = Tick::from_viewer(utc(1970, 1, 1, 0, 0), utc(1970, 1, 1, 0, 0));
        assert!(board.check_clock(&ancient).is_some_and(|w| w.reason.contains("2000-2100")));
    }

    #[test]
    fn test_skewed_clock_still_evaluates() {
        let board = SessionBoard::new(10, 60);
        let tick = Tick::from_viewer(utc(2024, 1, 15, 3, 0), utc(2024, 1, 15, 15, 0));
        let snapshot = board.evaluate(&majors(), &tick);

        assert!(snapshot.clock_warning.is_some());
        // Tokyo is evaluated at the supplied 03:00 UTC, not the worker clock
        assert_eq!(snapshot.sessions[1].state, SessionState::Open);
        assert!((snapshot.now_marker - 12.5).abs() < 1e-9);
        assert!(matches!(snapshot.diagnostics()[0], Diagnostic::ClockSkew(_)));
    }

    #[test]
    fn test_marker_mismatch_reported_across_date_line_clock_change() {
        // 21:30 UTC on 2024-10-05 is 08:30 AEDT on 6 October in Sydney. The bar
        // is drawn for 5 October (AEST), so it opens an hour later.
        let sessions = vec![feed("Sydney", "Australia/Sydney", "08:00", "16:00")];
        let snapshot = SessionBoard::default().evaluate(&sessions, &Tick::at(utc(2024, 10, 5, 21, 30)));

        let sydney = &snapshot.sessions[0];
        assert_eq!(sydney.state, SessionState::Open);
        assert_eq!(sydney.open_utc_hours, Some(22.0));
        assert!(!sydney.marker_agrees);
        assert!(snapshot
            .diagnostics()
            .contains(&Diagnostic::MarkerMismatch { session: "Sydney".to_string() }));
    }

    #[test]
    fn test_clock_change_days_keep_marker_in_step() {
        let sessions = vec![
            feed("Frankfurt", "Europe/Berlin", "02:30", "10:00"),
            feed("London", "Europe/London", "08:00", "16:30"),
        ];
        let board = SessionBoard::default();
        for start in [utc(2024, 3, 31, 0, 0), utc(2024, 10, 27, 0, 0)] {
            for step in 0..(24 * 4) {
                let tick = Tick::at(start + Duration::minutes(15 * step));
                let snapshot = board.evaluate(&sessions, &tick);
                assert!(snapshot.diagnostics().is_empty(), "at {}", tick.reference);
            }
        }
    }

    #[test]
    fn test_evaluate_idempotent() {
        let board = SessionBoard::default();
        let tick = Tick::at(utc(2024, 3, 31, 1, 30));
        assert_eq!(board.evaluate(&majors(), &tick), board.evaluate(&majors(), &tick));
    }

    #[test]
    fn test_snapshot_wire_format() {
        let snapshot = SessionBoard::default().evaluate(&majors()[1..2], &Tick::at(utc(2024, 1, 15, 3, 0)));
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["sessions"][0]["state"], "OPEN");
        assert_eq!(json["sessions"][0]["openLocal"], "09:00");
        assert_eq!(json["sessions"][0]["timezone"], "Asia/Tokyo");
        assert_eq!(json["refreshSeconds"], 60);
        assert!(json.get("clockWarning").is_none());
        assert!(json["sessions"][0].get("error").is_none());
    }
}
