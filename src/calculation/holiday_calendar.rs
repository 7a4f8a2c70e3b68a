//! Holiday and bridge-day calendar generation.
//!
//! This module produces a year's national holidays (fixed and Easter-based)
//! and infers bridge days next to holidays falling on a Tuesday or Thursday.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::debug;

use super::easter_sunday;
use crate::models::{HolidayEntry, HolidayKind};

/// National holidays observed on the same month and day every year.
pub const FIXED_HOLIDAYS: [(u32, u32, &str); 9] = [
    (1, 1, "New Year's Day"),
    (4, 21, "Tiradentes"),
    (5, 1, "Labour Day"),
    (9, 7, "Independence Day"),
    (10, 12, "Our Lady of Aparecida"),
    (11, 2, "All Souls' Day"),
    (11, 15, "Proclamation of the Republic"),
    (11, 20, "Black Consciousness Day"),
    (12, 25, "Christmas"),
];

/// Easter-relative holidays, as (description, offset in days from Easter Sunday).
pub const MOVABLE_HOLIDAYS: [(&str, i64); 3] = [
    ("Carnival", -47),
    ("Good Friday", -2),
    ("Corpus Christi", 60),
];

/// Generates the holiday and bridge-day calendar for a year.
///
/// The fixed and movable holidays come first, sorted by date. Bridge days
/// follow, one per holiday on a Tuesday (the Monday before) or Thursday (the
/// Friday after), in the order of the holidays that produced them.
///
/// Bridges are not de-duplicated against each other or against holidays;
/// callers counting days off must de-duplicate by date.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::generate_calendar;
/// use benefits_engine::models::HolidayKind;
///
/// let calendar = generate_calendar(2025);
/// let holidays = calendar.iter().filter(|e| e.kind == HolidayKind::Holiday).count();
/// assert_eq!(holidays, 12);
/// ```
pub fn generate_calendar(year: i32) -> Vec<HolidayEntry> {
    let mut holidays: Vec<HolidayEntry> = FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(month, day, description)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| HolidayEntry::new(date, HolidayKind::Holiday, description))
        })
        .collect();

    if let Some(easter) = easter_sunday(year) {
        holidays.extend(MOVABLE_HOLIDAYS.iter().filter_map(|&(description, offset)| {
            shift_days(easter, offset)
                .map(|date| HolidayEntry::new(date, HolidayKind::Holiday, description))
        }));
    }

    holidays.sort_by_key(|entry| entry.date);

    let bridges: Vec<HolidayEntry> = holidays.iter().filter_map(infer_bridge).collect();

    debug!(
        year,
        holidays = holidays.len(),
        bridges = bridges.len(),
        "Generated holiday calendar"
    );

    holidays.extend(bridges);
    holidays
}

/// Infers the bridge day for a holiday, if any.
///
/// Tuesday holidays bridge back to Monday; Thursday holidays bridge forward
/// to Friday. Any other weekday yields no bridge.
pub fn infer_bridge(holiday: &HolidayEntry) -> Option<HolidayEntry> {
    let bridge_date = match holiday.date.weekday() {
        Weekday::Tue => holiday.date.checked_sub_days(Days::new(1)),
        Weekday::Thu => holiday.date.checked_add_days(Days::new(1)),
        _ => None,
    }?;

    Some(HolidayEntry::new(
        bridge_date,
        HolidayKind::Bridge,
        format!("bridge for {}", holiday.description),
    ))
}

/// Merges generated entries into an existing calendar.
///
/// Each generated entry is appended only if its date is not already on the
/// calendar, counting both the existing entries and generated entries added
/// earlier in the same merge. Returns the merged calendar and the number of
/// entries added.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::{generate_calendar, merge_generated_calendar};
///
/// let generated = generate_calendar(2025);
/// let (merged, added) = merge_generated_calendar(&[], &generated);
/// assert_eq!(added, merged.len());
///
/// // A second merge adds nothing.
/// let (_, added_again) = merge_generated_calendar(&merged, &generated);
/// assert_eq!(added_again, 0);
/// ```
pub fn merge_generated_calendar(
    existing: &[HolidayEntry],
    generated: &[HolidayEntry],
) -> (Vec<HolidayEntry>, usize) {
    let mut seen: HashSet<NaiveDate> = existing.iter().map(|e| e.date).collect();
    let mut merged = existing.to_vec();
    let mut added = 0;

    for entry in generated {
        if seen.insert(entry.date) {
            merged.push(entry.clone());
            added += 1;
        }
    }

    (merged, added)
}

fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}
