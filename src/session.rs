//! Market sessions and open/closed evaluation
//!
//! A session is a venue with a recurring daily trading window expressed in
//! its own local wall-clock time. Construction validates the timezone and
//! times; evaluation afterwards is a pure function of the reference instant.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};
use crate::time_axis;
use crate::types::SessionFeed;

/// Longest stretch of skipped wall-clock time searched when resolving a gap
const MAX_GAP_MINUTES: i64 = 2 * 24 * 60;

/// Local wall-clock time of day in `[00:00, 24:00)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse `HH:MM` or `HH:MM:SS`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
            // leap-second representation is not a valid opening time
            .filter(|t| t.nanosecond() < 1_000_000_000)
            .map(Self)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn naive(self) -> NaiveTime {
        self.0
    }

    /// Fractional hours since local midnight
    pub fn hours(self) -> f64 {
        time_axis::hours_from_hms(self.0.hour(), self.0.minute(), self.0.second())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

/// Shape of the local trading window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Open equals close: trades around the clock
    FullDay,
    /// Opens and closes on the same local day
    Intraday,
    /// Closes on the next local day
    Overnight,
}

/// Session state at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionState {
    Open,
    Closed,
    /// Session definition could not be evaluated
    Unknown,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "OPEN"),
            SessionState::Closed => write!(f, "CLOSED"),
            SessionState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A validated trading venue
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSession {
    pub name: String,
    pub timezone: Tz,
    pub open_local: TimeOfDay,
    pub close_local: TimeOfDay,
    /// Display hint, not interpreted
    pub color: Option<String>,
}

impl MarketSession {
    /// Build a session, failing fast on a bad name, timezone or time of day
    pub fn new(name: &str, timezone: &str, open_local: &str, close_local: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeskError::InvalidSession("session name is empty".into()));
        }

        let tz: Tz = timezone.trim().parse().map_err(|_| DeskError::InvalidTimezone {
            session: name.to_string(),
            timezone: timezone.to_string(),
        })?;

        let parse_time = |value: &str| {
            TimeOfDay::parse(value).ok_or_else(|| DeskError::InvalidTimeOfDay {
                session: name.to_string(),
                value: value.to_string(),
            })
        };

        Ok(Self {
            name: name.to_string(),
            timezone: tz,
            open_local: parse_time(open_local)?,
            close_local: parse_time(close_local)?,
            color: None,
        })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Classify the local window. Equal times are checked first so a
    /// round-the-clock venue is never read as a zero-width window.
    pub fn window_kind(&self) -> WindowKind {
        if self.open_local == self.close_local {
            WindowKind::FullDay
        } else if self.open_local < self.close_local {
            WindowKind::Intraday
        } else {
            WindowKind::Overnight
        }
    }

    /// Local fractional hour of `instant` in the venue's timezone
    pub fn local_hour(&self, instant: &DateTime<Utc>) -> f64 {
        time_axis::fractional_hour(&instant.with_timezone(&self.timezone))
    }

    /// UTC instant at which the venue's wall clock reaches `time` on local `date`
    ///
    /// A reading that occurs twice (clocks going back) resolves to its first
    /// occurrence. A reading that is skipped (clocks going forward) resolves to
    /// the end of the gap, the first instant the wall clock is past `time`.
    pub fn occurrence(&self, date: NaiveDate, time: TimeOfDay) -> DateTime<Utc> {
        let local = date.and_time(time.naive());
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map_or_else(|| self.gap_end(local), |dt| dt.with_timezone(&Utc))
    }

    fn gap_end(&self, local: NaiveDateTime) -> DateTime<Utc> {
        // Transitions fall on whole minutes
        let start = local.with_second(0).unwrap_or(local);
        (1..=MAX_GAP_MINUTES)
            .find_map(|m| self.timezone.from_local_datetime(&(start + Duration::minutes(m))).earliest())
            .map_or_else(
                || {
                    let before = self.timezone.offset_from_utc_datetime(&(local - Duration::days(1))).fix();
                    Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(before.local_minus_utc()))))
                },
                |dt| dt.with_timezone(&Utc),
            )
    }

    /// Whether the venue trades at `instant`; half-open `[open, close)`
    ///
    /// The local date of `instant` selects the trading day. Outside clock
    /// changes this is the same as comparing the local hour with the window.
    pub fn is_open(&self, instant: &DateTime<Utc>) -> bool {
        let date = instant.with_timezone(&self.timezone).date_naive();
        let opens = self.occurrence(date, self.open_local);
        let closes = self.occurrence(date, self.close_local);

        match self.window_kind() {
            WindowKind::FullDay => true,
            WindowKind::Intraday => opens <= *instant && *instant < closes,
            // Before today's close belongs to yesterday's session
            WindowKind::Overnight => *instant >= opens || *instant < closes,
        }
    }

    pub fn state(&self, instant: &DateTime<Utc>) -> SessionState {
        if self.is_open(instant) {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }
}

impl TryFrom<&SessionFeed> for MarketSession {
    type Error = DeskError;

    fn try_from(feed: &SessionFeed) -> Result<Self> {
        let session = Self::new(&feed.name, &feed.timezone, &feed.open_local, &feed.close_local)?;
        Ok(match &feed.color {
            Some(color) => session.with_color(color.clone()),
            None => session,
        })
    }
}
