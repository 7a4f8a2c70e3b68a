//! Per-employee, per-month overrides entered by payroll staff.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompetenceMonth;

/// Unexcused absence days for an employee in a competence month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceOverride {
    /// The employee the absences belong to.
    pub employee_id: String,
    /// The competence month.
    pub month: CompetenceMonth,
    /// Number of unexcused absence days.
    pub absences: u32,
}

/// Health-plan co-payment charged to an employee in a competence month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoPaymentOverride {
    /// The employee the co-payment belongs to.
    pub employee_id: String,
    /// The competence month.
    pub month: CompetenceMonth,
    /// Amount deducted from the base salary.
    pub amount: Decimal,
}

/// Keyed lookup over absence and co-payment overrides.
///
/// Missing entries read as zero. When several entries share the same
/// employee and month, the last one wins.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{AbsenceOverride, CompetenceMonth, OverrideBook};
/// use rust_decimal::Decimal;
///
/// let month: CompetenceMonth = "2025-04".parse().unwrap();
/// let book = OverrideBook::new(
///     vec![AbsenceOverride { employee_id: "emp_001".to_string(), month, absences: 2 }],
///     vec![],
/// );
/// assert_eq!(book.absences_for("emp_001", month), 2);
/// assert_eq!(book.absences_for("emp_002", month), 0);
/// assert_eq!(book.co_payment_for("emp_001", month), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideBook {
    absences: HashMap<(String, CompetenceMonth), u32>,
    co_payments: HashMap<(String, CompetenceMonth), Decimal>,
}

impl OverrideBook {
    /// Builds the lookup from entry lists.
    pub fn new(absences: Vec<AbsenceOverride>, co_payments: Vec<CoPaymentOverride>) -> Self {
        let mut book = Self::default();
        book.extend(absences, co_payments);
        book
    }

    /// Adds entries, replacing any existing value for the same key.
    pub fn extend(&mut self, absences: Vec<AbsenceOverride>, co_payments: Vec<CoPaymentOverride>) {
        for entry in absences {
            self.absences
                .insert((entry.employee_id, entry.month), entry.absences);
        }
        for entry in co_payments {
            self.co_payments
                .insert((entry.employee_id, entry.month), entry.amount);
        }
    }

    /// Absence days for the employee in the month, 0 when none were entered.
    pub fn absences_for(&self, employee_id: &str, month: CompetenceMonth) -> u32 {
        self.absences
            .get(&(employee_id.to_string(), month))
            .copied()
            .unwrap_or(0)
    }

    /// Co-payment for the employee in the month, 0 when none was entered.
    pub fn co_payment_for(&self, employee_id: &str, month: CompetenceMonth) -> Decimal {
        self.co_payments
            .get(&(employee_id.to_string(), month))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Total number of stored entries, absences and co-payments combined.
    pub fn len(&self) -> usize {
        self.absences.len() + self.co_payments.len()
    }

    /// Returns true if no overrides are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
