//! Holiday and bridge-day models.
//!
//! This module contains the [`HolidayEntry`] type produced by the calendar
//! generator (or entered manually) and consumed by the business-day counter.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Whether a calendar entry is an official holiday or an inferred bridge day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// A national holiday, fixed or movable.
    Holiday,
    /// A non-holiday day adjacent to a holiday, treated as a day off by policy.
    Bridge,
}

/// A single holiday or bridge-day entry on the company calendar.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{HolidayEntry, HolidayKind};
/// use chrono::NaiveDate;
///
/// let entry = HolidayEntry {
///     id: "2025-04-21-holiday".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
///     kind: HolidayKind::Holiday,
///     description: "Tiradentes".to_string(),
/// };
/// assert!(entry.falls_on_weekday());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// Unique identifier of the entry.
    pub id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// Holiday or bridge.
    pub kind: HolidayKind,
    /// Human-readable description (e.g., "Christmas").
    pub description: String,
}

impl HolidayEntry {
    /// Builds an entry whose id is derived from its date and kind.
    ///
    /// Derived ids keep calendar generation free of randomness.
    pub fn new(date: NaiveDate, kind: HolidayKind, description: impl Into<String>) -> Self {
        let suffix = match kind {
            HolidayKind::Holiday => "holiday",
            HolidayKind::Bridge => "bridge",
        };
        Self {
            id: format!("{}-{}", date.format("%Y-%m-%d"), suffix),
            date,
            kind,
            description: description.into(),
        }
    }

    /// Returns true if the entry falls Monday through Friday.
    pub fn falls_on_weekday(&self) -> bool {
        !matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns true if this is a bridge day.
    pub fn is_bridge(&self) -> bool {
        self.kind == HolidayKind::Bridge
    }
}
