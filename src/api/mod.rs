//! HTTP API module for the benefits engine.
//!
//! This module provides the REST API endpoints for running monthly
//! benefit calculations, downloading exports and browsing the generated
//! holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AbsenceRequest, CoPaymentRequest, HolidayRequest, MonthlyCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
