//! Day classification and business-day counting.
//!
//! This module provides utilities for classifying a date as weekday or
//! weekend and for counting the business days of a competence month once
//! holidays and bridge days are taken out.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, CompetenceMonth, HolidayEntry};

/// Represents the type of day for business-day counting.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayType {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// Uses the proleptic Gregorian day of week; there is no locale dependency.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2025-04-19 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2025, 4, 19).unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2025-04-21 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
/// assert_eq!(get_day_type(monday), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// The business-day count of a month and how it was derived.
#[derive(Debug, Clone)]
pub struct BusinessDayCount {
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// Saturdays and Sundays in the month.
    pub weekend_days: u32,
    /// Distinct weekday dates covered by a holiday or bridge entry.
    pub holiday_weekdays: u32,
    /// `days_in_month - weekend_days - holiday_weekdays`.
    pub business_days: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts the business days of a competence month.
///
/// Business days are the calendar days of the month minus weekends minus
/// the distinct weekday dates that carry a holiday or bridge entry. A date
/// carrying several entries is only subtracted once. Entries outside the
/// month and entries on weekends are ignored.
///
/// # Arguments
///
/// * `month` - The competence month
/// * `holidays` - Holiday and bridge entries; may span other months
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::count_business_days;
/// use benefits_engine::models::{CompetenceMonth, HolidayEntry, HolidayKind};
/// use chrono::NaiveDate;
///
/// let month: CompetenceMonth = "2025-04".parse().unwrap();
/// let holidays = vec![HolidayEntry::new(
///     NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
///     HolidayKind::Holiday,
///     "Tiradentes",
/// )];
///
/// let count = count_business_days(month, &holidays, 1);
/// assert_eq!(count.days_in_month, 30);
/// assert_eq!(count.weekend_days, 8);
/// assert_eq!(count.business_days, 21);
/// ```
pub fn count_business_days(
    month: CompetenceMonth,
    holidays: &[HolidayEntry],
    step_number: u32,
) -> BusinessDayCount {
    let days_in_month = month.days_in_month();
    let weekend_days = month
        .dates()
        .filter(|&date| get_day_type(date).is_weekend())
        .count() as u32;

    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .map(|h| h.date)
        .filter(|&date| month.contains(date) && !get_day_type(date).is_weekend())
        .collect();
    let holiday_weekdays = holiday_dates.len() as u32;

    let business_days = days_in_month - weekend_days - holiday_weekdays;

    let audit_step = AuditStep {
        step_number,
        rule_id: "business_days".to_string(),
        rule_name: "Business Days in Month".to_string(),
        employee_id: None,
        input: serde_json::json!({
            "month": month.to_string(),
            "holiday_entries": holidays.iter().filter(|h| month.contains(h.date)).count(),
        }),
        output: serde_json::json!({
            "days_in_month": days_in_month,
            "weekend_days": weekend_days,
            "holiday_weekdays": holiday_weekdays,
            "holiday_dates": holiday_dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect::<Vec<_>>(),
            "business_days": business_days,
        }),
        reasoning: format!(
            "{} days - {} weekend days - {} weekday holidays = {} business days",
            days_in_month, weekend_days, holiday_weekdays, business_days
        ),
    };

    BusinessDayCount {
        days_in_month,
        weekend_days,
        holiday_weekdays,
        business_days,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::generate_calendar;
    use crate::models::HolidayKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(s: &str) -> CompetenceMonth {
        s.parse().unwrap()
    }

    fn holiday(d: NaiveDate, kind: HolidayKind) -> HolidayEntry {
        HolidayEntry::new(d, kind, "test")
    }

    #[test]
    fn test_get_day_type_full_week() {
        // 2025-04-14 is a Monday
        let expected = [
            DayType::Weekday,
            DayType::Weekday,
            DayType::Weekday,
            DayType::Weekday,
            DayType::Weekday,
            DayType::Saturday,
            DayType::Sunday,
        ];
        for (offset, expected) in expected.iter().enumerate() {
            let d = date(2025, 4, 14 + offset as u32);
            assert_eq!(get_day_type(d), *expected, "{}", d);
        }
    }

    #[test]
    fn test_day_type_display() {
        assert_eq!(DayType::Weekday.to_string(), "Weekday");
        assert_eq!(DayType::Sunday.to_string(), "Sunday");
    }

    #[test]
    fn test_month_without_holidays() {
        // February 2025: 28 days, 8 weekend days
        let count = count_business_days(month("2025-02"), &[], 1);
        assert_eq!(count.days_in_month, 28);
        assert_eq!(count.weekend_days, 8);
        assert_eq!(count.holiday_weekdays, 0);
        assert_eq!(count.business_days, 20);
    }

    #[test]
    fn test_thirty_day_month_with_one_weekday_holiday() {
        // September 2025: 30 days, 8 weekend days, one Monday holiday
        let holidays = vec![holiday(date(2025, 9, 8), HolidayKind::Holiday)];
        let count = count_business_days(month("2025-09"), &holidays, 1);
        assert_eq!(count.days_in_month, 30);
        assert_eq!(count.weekend_days, 8);
        assert_eq!(count.business_days, 21);
    }

    #[test]
    fn test_weekend_holidays_are_not_subtracted() {
        // 2025-09-07 is a Sunday
        let holidays = vec![holiday(date(2025, 9, 7), HolidayKind::Holiday)];
        let count = count_business_days(month("2025-09"), &holidays, 1);
        assert_eq!(count.holiday_weekdays, 0);
        assert_eq!(count.business_days, 22);
    }

    #[test]
    fn test_entries_outside_month_are_ignored() {
        let holidays = vec![
            holiday(date(2025, 5, 1), HolidayKind::Holiday),
            holiday(date(2024, 4, 22), HolidayKind::Holiday),
        ];
        let count = count_business_days(month("2025-04"), &holidays, 1);
        assert_eq!(count.holiday_weekdays, 0);
        assert_eq!(count.business_days, 22);
    }

    #[test]
    fn test_duplicate_dates_are_subtracted_once() {
        // April 2011: Tiradentes (Thu 21), its bridge and Good Friday both on Fri 22
        let calendar = generate_calendar(2011);
        let count = count_business_days(month("2011-04"), &calendar, 1);

        assert_eq!(count.days_in_month, 30);
        assert_eq!(count.weekend_days, 9);
        assert_eq!(count.holiday_weekdays, 2);
        assert_eq!(count.business_days, 19);
    }

    #[test]
    fn test_generated_calendar_for_april_2025() {
        // Good Friday (18) and Tiradentes (21)
        let calendar = generate_calendar(2025);
        let count = count_business_days(month("2025-04"), &calendar, 1);
        assert_eq!(count.business_days, 20);
    }

    #[test]
    fn test_generated_calendar_for_december_2025() {
        // December 2025: 31 days, 8 weekend days, Christmas (Thu) and its bridge (Fri)
        let calendar = generate_calendar(2025);
        let count = count_business_days(month("2025-12"), &calendar, 1);
        assert_eq!(count.weekend_days, 8);
        assert_eq!(count.holiday_weekdays, 2);
        assert_eq!(count.business_days, 21);
    }

    #[test]
    fn test_audit_step_records_breakdown() {
        let holidays = vec![holiday(date(2025, 9, 8), HolidayKind::Holiday)];
        let count = count_business_days(month("2025-09"), &holidays, 4);

        assert_eq!(count.audit_step.step_number, 4);
        assert_eq!(count.audit_step.rule_id, "business_days");
        assert_eq!(count.audit_step.output["business_days"], 21);
        assert_eq!(count.audit_step.output["holiday_dates"][0], "2025-09-08");
        assert!(count.audit_step.reasoning.contains("= 21 business days"));
    }
}
