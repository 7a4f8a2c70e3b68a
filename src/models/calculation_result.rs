//! Calculation result models for the benefits engine.
//!
//! This module contains the per-employee [`CalculationResult`], the aggregate
//! [`MonthlyReport`] and the audit structures that record how every amount
//! was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompetenceMonth, HolidayEntry, TransportMode};

/// The benefits computed for one employee in one competence month.
///
/// This is a value object: it is never mutated after creation and is
/// regenerated on every run.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{CalculationResult, TransportMode};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = CalculationResult {
///     employee_id: "emp_001".to_string(),
///     name: "Ana Souza".to_string(),
///     tax_id: "123.456.789-00".to_string(),
///     sector_id: "tech".to_string(),
///     sector_name: "Technical".to_string(),
///     base_salary: Decimal::from_str("3000.00").unwrap(),
///     transport_mode: TransportMode::BhBus,
///     flash_card_id: None,
///     days_worked: 20,
///     presential_days: 18,
///     home_office_days: 2,
///     absences: 2,
///     meal_voucher_amount: Decimal::from_str("765.20").unwrap(),
///     transport_amount: Decimal::from_str("162.00").unwrap(),
///     flash_credit: Decimal::from_str("765.20").unwrap(),
///     co_payment: Decimal::ZERO,
///     final_salary: Decimal::from_str("3000.00").unwrap(),
/// };
/// assert!(result.has_transport_request());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The employee id.
    pub employee_id: String,
    /// The employee's full name.
    pub name: String,
    /// The employee's tax identifier.
    pub tax_id: String,
    /// The resolved sector id.
    pub sector_id: String,
    /// The resolved sector's display name.
    pub sector_name: String,
    /// Base salary before deductions.
    pub base_salary: Decimal,
    /// How transport is delivered to the employee.
    pub transport_mode: TransportMode,
    /// Flash card identifier, if any.
    pub flash_card_id: Option<String>,
    /// Business days minus absences. Not floored; negative when absences
    /// exceed business days.
    pub days_worked: i64,
    /// Days worked minus home-office days, floored at zero.
    pub presential_days: i64,
    /// Contracted home-office days.
    pub home_office_days: i64,
    /// Absences applied for the month.
    pub absences: i64,
    /// Meal/food voucher credit (days worked × sector daily rate).
    pub meal_voucher_amount: Decimal,
    /// Transport voucher reported separately. Non-zero only for BHBus.
    pub transport_amount: Decimal,
    /// Total Flash card top-up.
    pub flash_credit: Decimal,
    /// Health-plan co-payment deducted this month.
    pub co_payment: Decimal,
    /// Base salary minus co-payment. Not clamped at zero.
    pub final_salary: Decimal,
}

impl CalculationResult {
    /// Returns true if this row belongs in the Flash remittance file.
    pub fn has_flash_remittance(&self) -> bool {
        self.transport_mode == TransportMode::Flash && self.flash_credit > Decimal::ZERO
    }

    /// Returns true if this row belongs in the transport voucher request.
    pub fn has_transport_request(&self) -> bool {
        self.transport_amount > Decimal::ZERO
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The employee the step applies to, or `None` for month-level steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious but accepted input; they never change amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a monthly run.
///
/// # Example
///
/// ```
/// use benefits_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The aggregate output of one monthly benefits run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The competence month.
    pub month: CompetenceMonth,
    /// Holiday and bridge entries of the month, as supplied (not de-duplicated).
    pub holidays: Vec<HolidayEntry>,
    /// Business days in the month.
    pub business_days: u32,
    /// One result per active employee, in roster order.
    pub calculations: Vec<CalculationResult>,
    /// How the figures were derived.
    pub audit_trace: AuditTrace,
}

impl MonthlyReport {
    /// Sum of all Flash credits in the report.
    pub fn total_flash_credit(&self) -> Decimal {
        self.calculations.iter().map(|c| c.flash_credit).sum()
    }

    /// Sum of all separately reported transport amounts.
    pub fn total_transport_amount(&self) -> Decimal {
        self.calculations.iter().map(|c| c.transport_amount).sum()
    }

    /// Looks up the result for an employee.
    pub fn calculation_for(&self, employee_id: &str) -> Option<&CalculationResult> {
        self.calculations.iter().find(|c| c.employee_id == employee_id)
    }
}
