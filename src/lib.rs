//! Monthly benefits engine.
//!
//! This crate computes, for each active employee and competence month, the
//! meal/food voucher, the transport voucher, the Flash card credit and the
//! salary after health-plan co-payment. It also generates the national
//! holiday calendar with bridge days that drives the business-day count.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
