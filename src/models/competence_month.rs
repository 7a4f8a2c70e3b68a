//! Competence month model.
//!
//! A competence month is the year and month a calculation run pertains to,
//! independent of the date the run actually happens.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The year and month a monthly benefits run refers to.
///
/// The textual form is `YYYY-MM`, which is also how the value is serialized.
///
/// # Example
///
/// ```
/// use benefits_engine::models::CompetenceMonth;
///
/// let month: CompetenceMonth = "2025-04".parse().unwrap();
/// assert_eq!(month.year(), 2025);
/// assert_eq!(month.month(), 4);
/// assert_eq!(month.days_in_month(), 30);
/// assert_eq!(month.to_string(), "2025-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompetenceMonth {
    year: i32,
    month: u32,
}

impl CompetenceMonth {
    /// Creates a competence month, validating that the month is in `1..=12`
    /// and that the first day of the month is representable.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidCompetenceMonth {
                value: format!("{year:04}-{month:02}"),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidCompetenceMonth {
                value: format!("{year:04}-{month:02}"),
                message: "year is out of the supported date range".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the competence month a date falls in.
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of calendar days in the month (28 to 31).
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
            Some(next) => next.signed_duration_since(self.first_day()).num_days() as u32,
            None => 31,
        }
    }

    /// Iterates over every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month())
            .filter_map(move |day| NaiveDate::from_ymd_opt(self.year, self.month, day))
    }

    /// Returns true if the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for CompetenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for CompetenceMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidCompetenceMonth {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| invalid("expected the form YYYY-MM"))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid("expected the form YYYY-MM"));
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("year and month must be numeric"));
        }

        let year: i32 = year.parse().map_err(|_| invalid("year must be numeric"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month must be numeric"))?;

        Self::new(year, month).map_err(|_| invalid("month must be between 1 and 12"))
    }
}

impl TryFrom<String> for CompetenceMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompetenceMonth> for String {
    fn from(month: CompetenceMonth) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month: CompetenceMonth = "2025-04".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 4);
    }

    #[test]
    fn test_parse_rejects_month_thirteen() {
        let result = "2025-13".parse::<CompetenceMonth>();
        match result {
            Err(EngineError::InvalidCompetenceMonth { value, .. }) => {
                assert_eq!(value, "2025-13");
            }
            other => panic!("Expected InvalidCompetenceMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_month_zero() {
        assert!("2025-00".parse::<CompetenceMonth>().is_err());
    }

    #[test]
    fn test_parse_rejects_unpadded_and_garbage() {
        assert!("2025-4".parse::<CompetenceMonth>().is_err());
        assert!("April 2025".parse::<CompetenceMonth>().is_err());
        assert!("2025/04".parse::<CompetenceMonth>().is_err());
        assert!("20a5-04".parse::<CompetenceMonth>().is_err());
        assert!("+025-04".parse::<CompetenceMonth>().is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(CompetenceMonth::new(2025, 1).unwrap().days_in_month(), 31);
        assert_eq!(CompetenceMonth::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(CompetenceMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(CompetenceMonth::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(CompetenceMonth::new(2025, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_dates_covers_whole_month() {
        let month = CompetenceMonth::new(2024, 2).unwrap();
        let dates: Vec<NaiveDate> = month.dates().collect();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[0], date(2024, 2, 1));
        assert_eq!(dates[28], date(2024, 2, 29));
    }

    #[test]
    fn test_contains() {
        let month = CompetenceMonth::new(2025, 4).unwrap();
        assert!(month.contains(date(2025, 4, 30)));
        assert!(!month.contains(date(2025, 5, 1)));
        assert!(!month.contains(date(2024, 4, 15)));
    }

    #[test]
    fn test_of_date() {
        assert_eq!(
            CompetenceMonth::of_date(date(2025, 6, 19)),
            CompetenceMonth::new(2025, 6).unwrap()
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let month = CompetenceMonth::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2025-03\"");

        let parsed: CompetenceMonth = serde_json::from_str("\"2025-03\"").unwrap();
        assert_eq!(parsed, month);
    }

    #[test]
    fn test_deserialize_rejects_invalid_string() {
        assert!(serde_json::from_str::<CompetenceMonth>("\"2025-3\"").is_err());
    }
}
