//! HTTP request handlers for the benefits engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{generate_calendar, run_monthly_benefits};
use crate::error::EngineError;
use crate::export::ExportKind;
use crate::models::CompetenceMonth;

use super::request::MonthlyCalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/benefits/:month", get(benefits_handler))
        .route("/benefits/:month/exports/:kind", get(export_handler))
        .route("/calendar/:year", get(calendar_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Runs a month against the dataset carried in the request body.
async fn calculate_handler(
    payload: Result<Json<MonthlyCalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let (month, dataset) = match request.into_dataset() {
        Ok(converted) => converted,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match run_monthly_benefits(&dataset, month) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                business_days = report.business_days,
                employees = report.calculations.len(),
                total_flash_credit = %report.total_flash_credit(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_ok(report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /benefits/:month.
///
/// Runs a month against the dataset loaded at startup.
async fn benefits_handler(State(state): State<AppState>, Path(month): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, month = %month, "Processing benefits request");

    let month: CompetenceMonth = match month.parse() {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };

    match run_monthly_benefits(state.dataset(), month) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                business_days = report.business_days,
                employees = report.calculations.len(),
                "Benefits run completed"
            );
            json_ok(report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /benefits/:month/exports/:kind.
///
/// Returns the requested CSV export for a month of the loaded dataset.
async fn export_handler(
    State(state): State<AppState>,
    Path((month, kind)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, month = %month, kind = %kind, "Processing export request");

    let export: ExportKind = match kind.parse() {
        Ok(export) => export,
        Err(_) => {
            warn!(correlation_id = %correlation_id, kind = %kind, "Unknown export");
            return (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::unknown_export(&kind)),
            )
                .into_response();
        }
    };

    let month: CompetenceMonth = match month.parse() {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };

    let csv = run_monthly_benefits(state.dataset(), month)
        .and_then(|report| export.render(&report.calculations));

    match csv {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                export = %export,
                bytes = body.len(),
                "Export rendered"
            );
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export.file_name(&month.to_string())
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /calendar/:year.
///
/// Returns the generated holiday and bridge calendar for a year.
async fn calendar_handler(Path(year): Path<i32>) -> Response {
    let correlation_id = Uuid::new_v4();
    let calendar = generate_calendar(year);
    info!(
        correlation_id = %correlation_id,
        year,
        entries = calendar.len(),
        "Calendar generated"
    );
    json_ok(calendar)
}
