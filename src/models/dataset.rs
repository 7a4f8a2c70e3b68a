//! The immutable input snapshot of a monthly run.

use super::{Employee, HolidayEntry, OverrideBook, Sector};

/// Everything a monthly run reads: roster, sectors, calendar and overrides.
///
/// The snapshot is taken once by the caller; the engine never re-reads it
/// during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenefitsDataset {
    /// The employee roster, in roster order.
    pub employees: Vec<Employee>,
    /// All sectors.
    pub sectors: Vec<Sector>,
    /// Holiday and bridge entries, for any number of years.
    pub holidays: Vec<HolidayEntry>,
    /// Absence and co-payment overrides.
    pub overrides: OverrideBook,
}

impl BenefitsDataset {
    /// Returns the active employees in roster order.
    pub fn active_employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.active)
    }

    /// Looks up a sector by id.
    pub fn sector(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }
}
