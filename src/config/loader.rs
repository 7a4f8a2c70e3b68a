//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefits
//! datasets from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::calculation::{generate_calendar, merge_generated_calendar};
use crate::error::{EngineError, EngineResult};
use crate::models::{BenefitsDataset, HolidayEntry, OverrideBook};

use super::types::{
    BenefitsConfig, CalendarConfig, DatasetMetadata, EmployeesConfig, OverridesConfig,
    SectorsConfig,
};

/// Loads and provides access to a benefits dataset.
///
/// # Directory Structure
///
/// ```text
/// config/sample/
/// ├── benefits.yaml       # Dataset metadata and auto-generated calendar years
/// ├── sectors.yaml        # Sectors and their daily rates
/// ├── employees.yaml      # The roster
/// ├── calendar/           # Optional: manually entered holidays and bridges
/// │   └── 2025.yaml
/// └── overrides/          # Optional: absences and co-payments
///     └── 2025-04.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use benefits_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sample")?;
/// println!("Loaded {} employees", loader.dataset().employees.len());
/// # Ok::<(), benefits_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BenefitsConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - An employee or sector fails validation, or a sector id is repeated
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<DatasetMetadata>(&path.join("benefits.yaml"))?;
        let sectors = Self::load_yaml::<SectorsConfig>(&path.join("sectors.yaml"))?.sectors;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?.employees;

        let mut seen_sectors = HashSet::new();
        for sector in &sectors {
            sector.validate()?;
            if !seen_sectors.insert(sector.id.as_str()) {
                return Err(EngineError::InvalidSector {
                    sector_id: sector.id.clone(),
                    message: "sector id is defined more than once".to_string(),
                });
            }
        }
        for employee in &employees {
            employee.validate()?;
        }

        let mut holidays: Vec<HolidayEntry> = Vec::new();
        for file in Self::yaml_files(&path.join("calendar"))? {
            let calendar = Self::load_yaml::<CalendarConfig>(&file)?;
            holidays.extend(calendar.holidays.into_iter().map(HolidayEntry::from));
        }
        for &year in &metadata.auto_calendar_years {
            let (merged, added) = merge_generated_calendar(&holidays, &generate_calendar(year));
            debug!(year, added, "Merged generated calendar");
            holidays = merged;
        }

        let mut overrides = OverrideBook::default();
        for file in Self::yaml_files(&path.join("overrides"))? {
            let entries = Self::load_yaml::<OverridesConfig>(&file)?;
            overrides.extend(entries.absences, entries.co_payments);
        }

        info!(
            path = %path.display(),
            employees = employees.len(),
            sectors = sectors.len(),
            holidays = holidays.len(),
            overrides = overrides.len(),
            "Loaded benefits dataset"
        );

        let dataset = BenefitsDataset {
            employees,
            sectors,
            holidays,
            overrides,
        };

        Ok(Self {
            config: BenefitsConfig::new(metadata, dataset),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Lists the `.yaml` files of an optional directory, sorted by name.
    fn yaml_files(dir: &Path) -> EngineResult<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = dir.display().to_string();
        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &BenefitsConfig {
        &self.config
    }

    /// Returns the dataset metadata.
    pub fn metadata(&self) -> &DatasetMetadata {
        self.config.metadata()
    }

    /// Returns the loaded dataset.
    pub fn dataset(&self) -> &BenefitsDataset {
        self.config.dataset()
    }

    /// Consumes the loader, returning the dataset.
    pub fn into_dataset(self) -> BenefitsDataset {
        self.config.into_dataset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompetenceMonth, HolidayKind, TransportMode};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/sample"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(s: &str) -> CompetenceMonth {
        s.parse().unwrap()
    }

    /// Creates an empty scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "benefits-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(dir: &Path, file: &str, content: &str) {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn write_minimal(dir: &Path) {
        write(dir, "benefits.yaml", "name: Scratch\n");
        write(
            dir,
            "sectors.yaml",
            "sectors:\n  - id: tech\n    name: Technical\n    daily_rate: \"38.26\"\n",
        );
        write(
            dir,
            "employees.yaml",
            "employees:\n  - id: emp_001\n    name: Ana\n    tax_id: \"111\"\n    sector_id: tech\n    base_salary: \"3000.00\"\n    transport_mode: none\n",
        );
    }

    #[test]
    fn test_load_sample_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().name, "Sample Company");
        assert_eq!(loader.metadata().auto_calendar_years, vec![2025]);
        assert_eq!(loader.dataset().sectors.len(), 3);
        assert_eq!(loader.dataset().employees.len(), 5);
    }

    #[test]
    fn test_sample_employees_are_in_file_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let ids: Vec<&str> = loader
            .dataset()
            .employees
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002", "emp_003", "emp_004", "emp_005"]);

        let emp_002 = &loader.dataset().employees[1];
        assert_eq!(emp_002.transport_mode, TransportMode::BhBus);
        assert_eq!(emp_002.trip_fare, Some(dec("4.50")));
    }

    #[test]
    fn test_manual_calendar_entries_come_before_generated_ones() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = &loader.dataset().holidays;

        assert_eq!(holidays[0].id, "company-anniversary");
        assert_eq!(holidays[0].date, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
        assert_eq!(holidays[0].kind, HolidayKind::Holiday);
    }

    #[test]
    fn test_generated_calendar_skips_dates_already_entered() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();

        let on_christmas: Vec<_> = loader
            .dataset()
            .holidays
            .iter()
            .filter(|h| h.date == christmas)
            .collect();
        // The manual entry wins; the generated Christmas is skipped
        assert_eq!(on_christmas.len(), 1);
        assert_eq!(on_christmas[0].description, "Company Christmas");
    }

    #[test]
    fn test_overrides_loaded_from_directory() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let overrides = &loader.dataset().overrides;

        assert_eq!(overrides.absences_for("emp_001", month("2025-04")), 2);
        assert_eq!(overrides.co_payment_for("emp_002", month("2025-04")), dec("150.00"));
        assert_eq!(overrides.absences_for("emp_001", month("2025-05")), 0);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("benefits.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_directory_without_optional_folders() {
        let dir = scratch_dir("minimal");
        write_minimal(&dir);

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.dataset().holidays.is_empty());
        assert!(loader.dataset().overrides.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        write_minimal(&dir);
        write(&dir, "sectors.yaml", "sectors: [unterminated\n");

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("sectors.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let dir = scratch_dir("negative");
        write_minimal(&dir);
        write(
            &dir,
            "employees.yaml",
            "employees:\n  - id: emp_009\n    name: Bia\n    tax_id: \"999\"\n    sector_id: tech\n    base_salary: \"-1.00\"\n    transport_mode: flash\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::InvalidEmployee {
                employee_id, field, ..
            }) => {
                assert_eq!(employee_id, "emp_009");
                assert_eq!(field, "base_salary");
            }
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_duplicate_sector_id_is_rejected() {
        let dir = scratch_dir("dup-sector");
        write_minimal(&dir);
        write(
            &dir,
            "sectors.yaml",
            "sectors:\n  - id: tech\n    name: A\n    daily_rate: \"1\"\n  - id: tech\n    name: B\n    daily_rate: \"2\"\n",
        );

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidSector { .. })
        ));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_auto_calendar_years_are_generated() {
        let dir = scratch_dir("auto");
        write_minimal(&dir);
        write(&dir, "benefits.yaml", "name: Scratch\nauto_calendar_years: [2024, 2025]\n");

        let loader = ConfigLoader::load(&dir).unwrap();
        let holidays = &loader.dataset().holidays;
        assert!(holidays.iter().any(|h| h.date.to_string() == "2024-03-29"));
        assert!(holidays.iter().any(|h| h.date.to_string() == "2025-04-18"));

        fs::remove_dir_all(dir).unwrap();
    }
}
