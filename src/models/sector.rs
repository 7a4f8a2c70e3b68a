//! Sector model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A sector groups employees sharing the same daily meal/food voucher rate.
///
/// # Example
///
/// ```
/// use benefits_engine::models::Sector;
/// use rust_decimal::Decimal;
///
/// let sector = Sector {
///     id: "tech".to_string(),
///     name: "Technical".to_string(),
///     daily_rate: Decimal::new(3826, 2),
/// };
/// assert!(sector.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    /// Unique identifier referenced by [`crate::models::Employee::sector_id`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Meal/food voucher credit per worked day.
    pub daily_rate: Decimal,
}

impl Sector {
    /// Validates the record at the input boundary.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidSector {
                sector_id: self.id.clone(),
                message: "id must not be empty".to_string(),
            });
        }
        if self.daily_rate.is_sign_negative() && !self.daily_rate.is_zero() {
            return Err(EngineError::InvalidSector {
                sector_id: self.id.clone(),
                message: "daily rate must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
