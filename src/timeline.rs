//! Timeline projection onto the shared 24-hour UTC axis
//!
//! Each session's local window is converted to UTC hours for the current UTC
//! calendar day, then laid out as percentage segments. Windows that
//! cross UTC midnight are split into a pre-close piece starting at 0% and a
//! post-open piece ending at 100%.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{MarketSession, WindowKind};
use crate::time_axis::{self, AXIS_HOURS};

/// A bar on the timeline, in percent of the axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSegment {
    pub start: f64,
    pub width: f64,
}

impl RenderSegment {
    pub fn end(&self) -> f64 {
        self.start + self.width
    }
}

/// A session's trading window on the UTC axis for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtcWindow {
    pub open_hours: f64,
    pub close_hours: f64,
    /// Trades around the clock regardless of the hour values
    pub full_day: bool,
}

impl UtcWindow {
    pub fn new(open_hours: f64, close_hours: f64) -> Self {
        Self { open_hours, close_hours, full_day: false }
    }

    pub fn full_day() -> Self {
        Self { open_hours: 0.0, close_hours: 0.0, full_day: true }
    }

    /// Open and close land on the same axis position without a full-day window
    ///
    /// Happens when both local times fall inside a skipped hour.
    pub fn is_empty(&self) -> bool {
        !self.full_day && self.open_hours == self.close_hours
    }

    /// Close is before open on the axis, so the window wraps past midnight
    pub fn crosses_midnight(&self) -> bool {
        !self.full_day && self.close_hours < self.open_hours
    }

    /// Trading hours covered per day
    pub fn duration_hours(&self) -> f64 {
        if self.full_day {
            AXIS_HOURS
        } else if self.crosses_midnight() {
            AXIS_HOURS - self.open_hours + self.close_hours
        } else {
            self.close_hours - self.open_hours
        }
    }

    /// Whether the UTC hour falls inside the window, half-open `[open, close)`
    pub fn contains(&self, utc_hour: f64) -> bool {
        if self.full_day {
            true
        } else if self.crosses_midnight() {
            utc_hour >= self.open_hours || utc_hour < self.close_hours
        } else {
            self.open_hours <= utc_hour && utc_hour < self.close_hours
        }
    }
}

/// Derive today's open/close position on the UTC axis
///
/// "Today" is the UTC calendar date of `reference`.
pub fn derive_window(session: &MarketSession, reference: &DateTime<Utc>) -> UtcWindow {
    if session.window_kind() == WindowKind::FullDay {
        return UtcWindow::full_day();
    }

    let date = reference.date_naive();
    UtcWindow::new(
        time_axis::hour_of_utc_day(&session.occurrence(date, session.open_local)),
        time_axis::hour_of_utc_day(&session.occurrence(date, session.close_local)),
    )
}

/// Lay a window out as one or two segments
pub fn project(window: &UtcWindow) -> Vec<RenderSegment> {
    if window.full_day {
        return vec![RenderSegment { start: 0.0, width: 100.0 }];
    }

    let open = window.open_hours;
    let close = window.close_hours;

    if !window.crosses_midnight() {
        return vec![RenderSegment {
            start: time_axis::hours_to_percent(open),
            width: time_axis::span_to_percent(close - open),
        }];
    }

    let mut segments = Vec::with_capacity(2);
    // A window closing exactly at midnight has nothing before 0%
    if close > 0.0 {
        segments.push(RenderSegment {
            start: 0.0,
            width: time_axis::span_to_percent(close),
        });
    }
    segments.push(RenderSegment {
        start: time_axis::hours_to_percent(open),
        width: time_axis::span_to_percent(AXIS_HOURS - open),
    });
    segments
}

/// Convenience: derive and project in one step
pub fn project_session(session: &MarketSession, reference: &DateTime<Utc>) -> (UtcWindow, Vec<RenderSegment>) {
    let window = derive_window(session, reference);
    let segments = project(&window);
    (window, segments)
}

/// Position of the reference instant on the axis
pub fn now_marker(reference: &DateTime<Utc>) -> f64 {
    time_axis::hours_to_percent(time_axis::hour_of_utc_day(reference))
}

/// Total width covered by a set of segments
pub fn total_width(segments: &[RenderSegment]) -> f64 {
    segments.iter().map(|s| s.width).sum()
}
