//! Calculation logic for the benefits engine.
//!
//! This module contains the calculation functions for a competence month:
//! Easter computation, holiday and bridge-day calendar generation,
//! business-day counting, the per-employee benefit formula, and the monthly
//! run that ties them together.

mod benefit;
mod business_days;
mod easter;
mod holiday_calendar;
mod monthly_run;

pub use benefit::{BenefitCalculation, TRIPS_PER_PRESENTIAL_DAY, calculate_employee_benefits};
pub use business_days::{BusinessDayCount, DayType, count_business_days, get_day_type};
pub use easter::easter_sunday;
pub use holiday_calendar::{
    FIXED_HOLIDAYS, MOVABLE_HOLIDAYS, generate_calendar, infer_bridge, merge_generated_calendar,
};
pub use monthly_run::{
    WARNING_DUPLICATE_HOLIDAY_DATE, WARNING_NEGATIVE_DAYS_WORKED, WARNING_NEGATIVE_FINAL_SALARY,
    run_monthly_benefits,
};
