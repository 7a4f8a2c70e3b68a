//! Error types for the benefits engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading data, running a
//! monthly calculation or exporting its results.

use thiserror::Error;

/// The main error type for the benefits engine.
///
/// # Example
///
/// ```
/// use benefits_engine::error::EngineError;
///
/// let error = EngineError::SectorNotFound {
///     employee_id: "emp_001".to_string(),
///     sector_id: "tech".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Sector 'tech' referenced by employee 'emp_001' was not found"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An active employee references a sector that does not exist.
    ///
    /// This is fatal for the whole monthly run.
    #[error("Sector '{sector_id}' referenced by employee '{employee_id}' was not found")]
    SectorNotFound {
        /// The employee holding the dangling reference.
        employee_id: String,
        /// The sector id that could not be resolved.
        sector_id: String,
    },

    /// A competence month string was not of the form `YYYY-MM`.
    #[error("Invalid competence month '{value}': {message}")]
    InvalidCompetenceMonth {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// An employee record failed boundary validation.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The employee id.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A sector record failed boundary validation.
    #[error("Invalid sector '{sector_id}': {message}")]
    InvalidSector {
        /// The sector id.
        sector_id: String,
        /// A description of what made the sector invalid.
        message: String,
    },

    /// Writing a delimited export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/sectors.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/sectors.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/data/employees.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/data/employees.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_sector_not_found_displays_employee_and_sector() {
        let error = EngineError::SectorNotFound {
            employee_id: "emp_007".to_string(),
            sector_id: "ghost".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Sector 'ghost' referenced by employee 'emp_007' was not found"
        );
    }

    #[test]
    fn test_invalid_competence_month_displays_value() {
        let error = EngineError::InvalidCompetenceMonth {
            value: "2025-13".to_string(),
            message: "month must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid competence month '2025-13': month must be between 1 and 12"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            employee_id: "emp_001".to_string(),
            field: "base_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee 'emp_001' field 'base_salary': must not be negative"
        );
    }

    #[test]
    fn test_csv_error_converts_to_export_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error: EngineError = csv::Error::from(io).into();
        assert!(matches!(error, EngineError::ExportError { .. }));
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_sector_not_found() -> EngineResult<()> {
            Err(EngineError::SectorNotFound {
                employee_id: "emp_001".to_string(),
                sector_id: "none".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_sector_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
