//! Delimited exports of a monthly report. Uses the `csv` crate for quoting.
//!
//! Three files are produced from the [`CalculationResult`] rows of a run:
//! the Flash card remittance, the BHBus transport request and the payroll
//! adjustment list. Money is always written with two decimals.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CalculationResult;

/// The downstream file an export is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Flash card credit remittance.
    Flash,
    /// BHBus transport voucher request.
    Transport,
    /// Payroll salary adjustments.
    Payroll,
}

impl ExportKind {
    /// Renders the matching export for the given rows.
    pub fn render(&self, rows: &[CalculationResult]) -> EngineResult<String> {
        match self {
            ExportKind::Flash => flash_remittance_csv(rows),
            ExportKind::Transport => transport_request_csv(rows),
            ExportKind::Payroll => payroll_csv(rows),
        }
    }

    /// Suggested file name for a competence month.
    pub fn file_name(&self, month: &str) -> String {
        format!("{}-{}.csv", self, month)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Flash => write!(f, "flash"),
            ExportKind::Transport => write!(f, "transport"),
            ExportKind::Payroll => write!(f, "payroll"),
        }
    }
}

impl FromStr for ExportKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flash" => Ok(ExportKind::Flash),
            "transport" => Ok(ExportKind::Transport),
            "payroll" => Ok(ExportKind::Payroll),
            other => Err(EngineError::ExportError {
                message: format!(
                    "Unknown export '{}', expected flash, transport or payroll",
                    other
                ),
            }),
        }
    }
}

/// Flash card remittance: Flash employees with a positive credit.
///
/// Columns: `flash_id,name,tax_id,sector,total_credit`.
pub fn flash_remittance_csv(rows: &[CalculationResult]) -> EngineResult<String> {
    write_csv(
        ["flash_id", "name", "tax_id", "sector", "total_credit"],
        rows.iter().filter(|r| r.has_flash_remittance()).map(|r| {
            vec![
                r.flash_card_id.clone().unwrap_or_default(),
                r.name.clone(),
                r.tax_id.clone(),
                r.sector_name.clone(),
                money(r.flash_credit),
            ]
        }),
    )
}

/// BHBus transport request: rows with a positive reported transport amount.
///
/// Columns: `name,tax_id,sector,presential_days,transport_amount`.
pub fn transport_request_csv(rows: &[CalculationResult]) -> EngineResult<String> {
    write_csv(
        ["name", "tax_id", "sector", "presential_days", "transport_amount"],
        rows.iter().filter(|r| r.has_transport_request()).map(|r| {
            vec![
                r.name.clone(),
                r.tax_id.clone(),
                r.sector_name.clone(),
                r.presential_days.to_string(),
                money(r.transport_amount),
            ]
        }),
    )
}

/// Payroll adjustments: every row.
///
/// Columns: `tax_id,base_salary,final_salary`.
pub fn payroll_csv(rows: &[CalculationResult]) -> EngineResult<String> {
    write_csv(
        ["tax_id", "base_salary", "final_salary"],
        rows.iter().map(|r| {
            vec![
                r.tax_id.clone(),
                money(r.base_salary),
                money(r.final_salary),
            ]
        }),
    )
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn write_csv<const N: usize>(
    header: [&str; N],
    records: impl Iterator<Item = Vec<String>>,
) -> EngineResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(header)?;
    for record in records {
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    let bytes = wtr.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}
