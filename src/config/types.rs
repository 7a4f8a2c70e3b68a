//! Configuration types for benefits datasets.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{
    AbsenceOverride, BenefitsDataset, CoPaymentOverride, Employee, HolidayEntry, HolidayKind,
    Sector,
};

/// Metadata about the dataset, read from `benefits.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetMetadata {
    /// The human-readable name of the dataset (e.g., the company name).
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Years whose generated holiday calendar is merged into the dataset.
    #[serde(default)]
    pub auto_calendar_years: Vec<i32>,
}

/// Sectors configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SectorsConfig {
    /// All sectors.
    pub sectors: Vec<Sector>,
}

/// Employees configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// The roster, in roster order.
    pub employees: Vec<Employee>,
}

/// A manually entered calendar entry.
///
/// The id may be omitted, in which case it is derived from date and kind.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayConfig {
    /// Optional explicit id.
    #[serde(default)]
    pub id: Option<String>,
    /// The calendar date.
    pub date: NaiveDate,
    /// Holiday or bridge; defaults to holiday.
    #[serde(default = "default_kind")]
    pub kind: HolidayKind,
    /// Human-readable description.
    pub description: String,
}

fn default_kind() -> HolidayKind {
    HolidayKind::Holiday
}

impl From<HolidayConfig> for HolidayEntry {
    fn from(config: HolidayConfig) -> Self {
        let mut entry = HolidayEntry::new(config.date, config.kind, config.description);
        if let Some(id) = config.id {
            entry.id = id;
        }
        entry
    }
}

/// Calendar file structure (`calendar/*.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Entries in this file.
    pub holidays: Vec<HolidayConfig>,
}

/// Overrides file structure (`overrides/*.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverridesConfig {
    /// Absence entries.
    #[serde(default)]
    pub absences: Vec<AbsenceOverride>,
    /// Co-payment entries.
    #[serde(default)]
    pub co_payments: Vec<CoPaymentOverride>,
}

/// The complete benefits configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct BenefitsConfig {
    metadata: DatasetMetadata,
    dataset: BenefitsDataset,
}

impl BenefitsConfig {
    /// Creates a new BenefitsConfig from its component parts.
    pub fn new(metadata: DatasetMetadata, dataset: BenefitsDataset) -> Self {
        Self { metadata, dataset }
    }

    /// Returns the dataset metadata.
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    /// Returns the loaded dataset.
    pub fn dataset(&self) -> &BenefitsDataset {
        &self.dataset
    }

    /// Consumes the configuration, returning the dataset.
    pub fn into_dataset(self) -> BenefitsDataset {
        self.dataset
    }
}
