//! Monthly benefits run.
//!
//! This module orchestrates one full competence-month computation over a
//! [`BenefitsDataset`] snapshot.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{calculate_employee_benefits, count_business_days};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BenefitsDataset, CompetenceMonth, Employee,
    HolidayEntry, MonthlyReport, Sector,
};

/// Warning code for employees whose absences exceed the month's business days.
pub const WARNING_NEGATIVE_DAYS_WORKED: &str = "NEGATIVE_DAYS_WORKED";

/// Warning code for employees whose co-payment exceeds their base salary.
pub const WARNING_NEGATIVE_FINAL_SALARY: &str = "NEGATIVE_FINAL_SALARY";

/// Warning code for a month whose holiday list repeats a date.
pub const WARNING_DUPLICATE_HOLIDAY_DATE: &str = "DUPLICATE_HOLIDAY_DATE";

/// Runs the monthly benefits computation.
///
/// Business days are counted once for the month; the calculator is then run
/// once per active employee, in roster order. Absence and co-payment
/// overrides default to zero when absent.
///
/// Every active employee's sector is resolved before anything is calculated.
/// If one cannot be resolved the whole run fails with
/// [`EngineError::SectorNotFound`] and no result is produced for anyone.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::run_monthly_benefits;
/// use benefits_engine::models::BenefitsDataset;
///
/// let report = run_monthly_benefits(&BenefitsDataset::default(), "2025-02".parse().unwrap()).unwrap();
/// assert_eq!(report.business_days, 20);
/// assert!(report.calculations.is_empty());
/// ```
pub fn run_monthly_benefits(
    dataset: &BenefitsDataset,
    month: CompetenceMonth,
) -> EngineResult<MonthlyReport> {
    let sectors: HashMap<&str, &Sector> = dataset
        .sectors
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();

    let roster = resolve_sectors(dataset.active_employees(), &sectors)?;

    let holidays: Vec<HolidayEntry> = dataset
        .holidays
        .iter()
        .filter(|h| month.contains(h.date))
        .cloned()
        .collect();

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    if let Some(warning) = duplicate_date_warning(&holidays) {
        warnings.push(warning);
    }

    let day_count = count_business_days(month, &holidays, step_number);
    let business_days = day_count.business_days;
    steps.push(day_count.audit_step);
    step_number += 1;

    debug!(
        month = %month,
        business_days,
        holidays = holidays.len(),
        employees = roster.len(),
        "Counted business days"
    );

    let mut calculations = Vec::with_capacity(roster.len());
    for (employee, sector) in roster {
        let absences = dataset.overrides.absences_for(&employee.id, month);
        let co_payment = dataset.overrides.co_payment_for(&employee.id, month);

        let calculation = calculate_employee_benefits(
            employee,
            sector,
            business_days,
            absences,
            co_payment,
            step_number,
        );
        step_number += calculation.audit_steps.len() as u32;
        steps.extend(calculation.audit_steps);

        let result = calculation.result;
        if result.days_worked < 0 {
            warn!(month = %month, employee_id = %employee.id, absences, business_days, "Absences exceed business days");
            warnings.push(AuditWarning {
                code: WARNING_NEGATIVE_DAYS_WORKED.to_string(),
                message: format!(
                    "Employee '{}' has {} absences but the month has {} business days",
                    employee.id, absences, business_days
                ),
                severity: "high".to_string(),
            });
        }
        if result.final_salary < Decimal::ZERO {
            warn!(month = %month, employee_id = %employee.id, "Co-payment exceeds base salary");
            warnings.push(AuditWarning {
                code: WARNING_NEGATIVE_FINAL_SALARY.to_string(),
                message: format!(
                    "Employee '{}' has a final salary of {} after co-payment",
                    employee.id, result.final_salary
                ),
                severity: "high".to_string(),
            });
        }

        calculations.push(result);
    }

    info!(
        month = %month,
        business_days,
        employees = calculations.len(),
        warnings = warnings.len(),
        "Monthly benefits run completed"
    );

    Ok(MonthlyReport {
        month,
        holidays,
        business_days,
        calculations,
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Pairs every employee with its sector, failing on the first dangling reference.
fn resolve_sectors<'a>(
    employees: impl Iterator<Item = &'a Employee>,
    sectors: &HashMap<&str, &'a Sector>,
) -> EngineResult<Vec<(&'a Employee, &'a Sector)>> {
    employees
        .map(|employee| match sectors.get(employee.sector_id.as_str()) {
            Some(&sector) => Ok((employee, sector)),
            None => {
                warn!(
                    employee_id = %employee.id,
                    sector_id = %employee.sector_id,
                    "Sector not found, aborting run"
                );
                Err(EngineError::SectorNotFound {
                    employee_id: employee.id.clone(),
                    sector_id: employee.sector_id.clone(),
                })
            }
        })
        .collect()
}

fn duplicate_date_warning(holidays: &[HolidayEntry]) -> Option<AuditWarning> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = holidays
        .iter()
        .filter(|h| !seen.insert(h.date))
        .map(|h| h.date.format("%Y-%m-%d").to_string())
        .collect();
    if duplicates.is_empty() {
        return None;
    }
    duplicates.dedup();

    Some(AuditWarning {
        code: WARNING_DUPLICATE_HOLIDAY_DATE.to_string(),
        message: format!(
            "Holiday dates listed more than once (counted once): {}",
            duplicates.join(", ")
        ),
        severity: "low".to_string(),
    })
}
