//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct and [`TransportMode`] enum
//! for representing roster entries read by the benefits engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How an employee receives their transport voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Transport credit is loaded onto the Flash prepaid card together with
    /// the meal voucher.
    Flash,
    /// Transport is requested separately from the BHBus transit operator.
    BhBus,
    /// The employee receives no transport voucher.
    None,
}

/// Represents an employee on the roster.
///
/// The engine never mutates employees; it only reads them during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Tax identifier (CPF).
    pub tax_id: String,
    /// Id of the sector the employee belongs to.
    pub sector_id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Identifier of the employee's Flash card, when they have one.
    #[serde(default)]
    pub flash_card_id: Option<String>,
    /// How transport vouchers are delivered.
    pub transport_mode: TransportMode,
    /// Contracted home-office days for the month.
    #[serde(default)]
    pub home_office_days: u32,
    /// Per-trip fare used for the transport voucher.
    #[serde(default)]
    pub trip_fare: Option<Decimal>,
    /// Inactive employees are skipped by monthly runs.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Optional birthdate.
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if this employee's transport credit goes onto the Flash card.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefits_engine::models::{Employee, TransportMode};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana Souza".to_string(),
    ///     tax_id: "123.456.789-00".to_string(),
    ///     sector_id: "tech".to_string(),
    ///     base_salary: Decimal::new(300000, 2),
    ///     flash_card_id: Some("FL-001".to_string()),
    ///     transport_mode: TransportMode::Flash,
    ///     home_office_days: 0,
    ///     trip_fare: Some(Decimal::new(450, 2)),
    ///     active: true,
    ///     birthdate: None,
    /// };
    /// assert!(employee.receives_transport_on_flash());
    /// ```
    pub fn receives_transport_on_flash(&self) -> bool {
        self.transport_mode == TransportMode::Flash
    }

    /// Validates the record at the input boundary.
    ///
    /// The calculator itself assumes well-formed input; loaders and the HTTP
    /// layer call this before handing records to the engine.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |field: &str, message: &str| EngineError::InvalidEmployee {
            employee_id: self.id.clone(),
            field: field.to_string(),
            message: message.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.sector_id.trim().is_empty() {
            return Err(invalid("sector_id", "must not be empty"));
        }
        if self.base_salary.is_sign_negative() && !self.base_salary.is_zero() {
            return Err(invalid("base_salary", "must not be negative"));
        }
        if let Some(fare) = self.trip_fare {
            if fare.is_sign_negative() && !fare.is_zero() {
                return Err(invalid("trip_fare", "must not be negative"));
            }
        }
        Ok(())
    }
}
