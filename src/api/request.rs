//! Request types for the benefits engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{generate_calendar, merge_generated_calendar};
use crate::error::EngineResult;
use crate::models::{
    AbsenceOverride, BenefitsDataset, CoPaymentOverride, CompetenceMonth, Employee,
    HolidayEntry, HolidayKind, OverrideBook, Sector,
};

/// Request body for the `/calculate` endpoint.
///
/// Carries a complete dataset for a single competence month. Overrides in
/// the request apply to that month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCalculationRequest {
    /// The competence month, `YYYY-MM`.
    pub month: String,
    /// The roster, in roster order.
    pub employees: Vec<Employee>,
    /// All sectors referenced by the roster.
    pub sectors: Vec<Sector>,
    /// Manually supplied holiday and bridge entries.
    #[serde(default)]
    pub holidays: Vec<HolidayRequest>,
    /// When set, the generated calendar for the month's year is merged in.
    #[serde(default)]
    pub generate_calendar: bool,
    /// Unexcused absences for the month.
    #[serde(default)]
    pub absences: Vec<AbsenceRequest>,
    /// Health-plan co-payments for the month.
    #[serde(default)]
    pub co_payments: Vec<CoPaymentRequest>,
}

/// A holiday or bridge entry in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// Optional explicit id; derived from date and kind when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// The calendar date.
    pub date: NaiveDate,
    /// Holiday or bridge.
    #[serde(default = "default_kind")]
    pub kind: HolidayKind,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

fn default_kind() -> HolidayKind {
    HolidayKind::Holiday
}

/// Absence days for one employee in the request month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// The employee id.
    pub employee_id: String,
    /// Number of unexcused absence days.
    pub absences: u32,
}

/// Co-payment for one employee in the request month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoPaymentRequest {
    /// The employee id.
    pub employee_id: String,
    /// Amount deducted from the base salary.
    pub amount: Decimal,
}

impl From<HolidayRequest> for HolidayEntry {
    fn from(req: HolidayRequest) -> Self {
        let mut entry = HolidayEntry::new(req.date, req.kind, req.description);
        if let Some(id) = req.id {
            entry.id = id;
        }
        entry
    }
}

impl MonthlyCalculationRequest {
    /// Validates the request and converts it into a month and dataset.
    ///
    /// Fails on a malformed month or on an employee or sector record that
    /// does not pass boundary validation. Dangling sector references are
    /// left for the run itself to report.
    pub fn into_dataset(self) -> EngineResult<(CompetenceMonth, BenefitsDataset)> {
        let month: CompetenceMonth = self.month.parse()?;

        for sector in &self.sectors {
            sector.validate()?;
        }
        for employee in &self.employees {
            employee.validate()?;
        }

        let mut holidays: Vec<HolidayEntry> =
            self.holidays.into_iter().map(Into::into).collect();
        if self.generate_calendar {
            let (merged, _) = merge_generated_calendar(&holidays, &generate_calendar(month.year()));
            holidays = merged;
        }

        let overrides = OverrideBook::new(
            self.absences
                .into_iter()
                .map(|a| AbsenceOverride {
                    employee_id: a.employee_id,
                    month,
                    absences: a.absences,
                })
                .collect(),
            self.co_payments
                .into_iter()
                .map(|c| CoPaymentOverride {
                    employee_id: c.employee_id,
                    month,
                    amount: c.amount,
                })
                .collect(),
        );

        Ok((
            month,
            BenefitsDataset {
                employees: self.employees,
                sectors: self.sectors,
                holidays,
                overrides,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::TransportMode;
    use std::str::FromStr;

    fn sample_json(month: &str) -> String {
        format!(
            r#"{{
                "month": "{}",
                "employees": [
                    {{
                        "id": "emp_001",
                        "name": "Ana Souza",
                        "tax_id": "123.456.789-00",
                        "sector_id": "tech",
                        "base_salary": "3000.00",
                        "flash_card_id": "FL-001",
                        "transport_mode": "flash",
                        "home_office_days": 2,
                        "trip_fare": "4.50"
                    }}
                ],
                "sectors": [
                    {{ "id": "tech", "name": "Technical", "daily_rate": "38.26" }}
                ],
                "holidays": [
                    {{ "date": "2025-04-21", "description": "Tiradentes" }}
                ],
                "absences": [ {{ "employee_id": "emp_001", "absences": 2 }} ],
                "co_payments": [ {{ "employee_id": "emp_001", "amount": "150.00" }} ]
            }}"#,
            month
        )
    }

    #[test]
    fn test_deserialize_calculation_request() {
        let request: MonthlyCalculationRequest =
            serde_json::from_str(&sample_json("2025-04")).unwrap();

        assert_eq!(request.month, "2025-04");
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0].transport_mode, TransportMode::Flash);
        assert!(request.employees[0].active);
        assert_eq!(request.holidays[0].kind, HolidayKind::Holiday);
        assert!(!request.generate_calendar);
    }

    #[test]
    fn test_into_dataset_scopes_overrides_to_request_month() {
        let request: MonthlyCalculationRequest =
            serde_json::from_str(&sample_json("2025-04")).unwrap();
        let (month, dataset) = request.into_dataset().unwrap();

        assert_eq!(month.to_string(), "2025-04");
        assert_eq!(dataset.overrides.absences_for("emp_001", month), 2);
        assert_eq!(
            dataset.overrides.co_payment_for("emp_001", month),
            Decimal::from_str("150.00").unwrap()
        );
        assert_eq!(dataset.holidays[0].id, "2025-04-21-holiday");
    }

    #[test]
    fn test_into_dataset_rejects_bad_month() {
        let request: MonthlyCalculationRequest =
            serde_json::from_str(&sample_json("2025-4")).unwrap();

        assert!(matches!(
            request.into_dataset(),
            Err(EngineError::InvalidCompetenceMonth { .. })
        ));
    }

    #[test]
    fn test_generate_calendar_merges_without_duplicating_dates() {
        let mut request: MonthlyCalculationRequest =
            serde_json::from_str(&sample_json("2025-04")).unwrap();
        request.generate_calendar = true;

        let (_, dataset) = request.into_dataset().unwrap();
        let tiradentes = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
        assert_eq!(
            dataset.holidays.iter().filter(|h| h.date == tiradentes).count(),
            1
        );
        assert!(dataset.holidays.len() > 12);
    }
}
