//! Core data models for the benefits engine.
//!
//! This module contains the plain records the engine consumes and produces.

mod calculation_result;
mod competence_month;
mod dataset;
mod employee;
mod holiday;
mod overrides;
mod sector;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, MonthlyReport,
};
pub use competence_month::CompetenceMonth;
pub use dataset::BenefitsDataset;
pub use employee::{Employee, TransportMode};
pub use holiday::{HolidayEntry, HolidayKind};
pub use overrides::{AbsenceOverride, CoPaymentOverride, OverrideBook};
pub use sector::Sector;
