//! Per-employee monthly benefit calculation.
//!
//! This module derives an employee's meal/food voucher, transport voucher,
//! Flash card credit and final salary for one competence month.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CalculationResult, Employee, Sector, TransportMode};

/// Transit trips paid per presential day (a round trip).
pub const TRIPS_PER_PRESENTIAL_DAY: u32 = 2;

/// The result of calculating an employee's benefits, including audit steps.
#[derive(Debug, Clone)]
pub struct BenefitCalculation {
    /// The calculation result reported for the employee.
    pub result: CalculationResult,
    /// Transport amount before routing. For Flash employees it is folded into
    /// the Flash credit, for `None` it is discarded.
    pub computed_transport_amount: Decimal,
    /// The audit steps recording this calculation, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates an employee's benefits for a month.
///
/// The formula, in order:
/// 1. `days_worked = business_days - absences` (not floored)
/// 2. `presential_days = max(0, days_worked - home_office_days)`
/// 3. `meal_voucher = days_worked × sector.daily_rate`
/// 4. transport is `presential_days × 2 × fare` when the mode is not `None`
///    and a fare is set, otherwise 0
/// 5. Flash employees get meal voucher plus transport on the card; everybody
///    else gets the meal voucher only. Only BHBus reports transport separately.
/// 6. `final_salary = base_salary - co_payment` (not clamped)
///
/// The function is pure: identical inputs always yield identical output.
///
/// # Arguments
///
/// * `employee` - The employee to calculate for
/// * `sector` - The employee's resolved sector
/// * `business_days` - Business days in the competence month
/// * `absences` - Unexcused absences in the month
/// * `co_payment` - Health-plan co-payment for the month
/// * `step_number` - The step number of the first audit step
///
/// # Examples
///
/// ```
/// use benefits_engine::calculation::calculate_employee_benefits;
/// use benefits_engine::models::{Employee, Sector, TransportMode};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ana Souza".to_string(),
///     tax_id: "123.456.789-00".to_string(),
///     sector_id: "tech".to_string(),
///     base_salary: Decimal::from_str("3000.00").unwrap(),
///     flash_card_id: Some("FL-001".to_string()),
///     transport_mode: TransportMode::Flash,
///     home_office_days: 2,
///     trip_fare: Some(Decimal::from_str("4.50").unwrap()),
///     active: true,
///     birthdate: None,
/// };
/// let sector = Sector {
///     id: "tech".to_string(),
///     name: "Technical".to_string(),
///     daily_rate: Decimal::from_str("38.26").unwrap(),
/// };
///
/// let calculation = calculate_employee_benefits(&employee, &sector, 22, 2, Decimal::ZERO, 1);
/// assert_eq!(calculation.result.meal_voucher_amount, Decimal::from_str("765.20").unwrap());
/// assert_eq!(calculation.result.flash_credit, Decimal::from_str("927.20").unwrap());
/// assert_eq!(calculation.result.transport_amount, Decimal::ZERO);
/// ```
pub fn calculate_employee_benefits(
    employee: &Employee,
    sector: &Sector,
    business_days: u32,
    absences: u32,
    co_payment: Decimal,
    step_number: u32,
) -> BenefitCalculation {
    let mut audit_steps = Vec::with_capacity(4);
    let mut step_number = step_number;

    // Days
    let days_worked = i64::from(business_days) - i64::from(absences);
    let home_office_days = i64::from(employee.home_office_days);
    let presential_days = (days_worked - home_office_days).max(0);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "days_worked".to_string(),
        rule_name: "Days Worked".to_string(),
        employee_id: Some(employee.id.clone()),
        input: serde_json::json!({
            "business_days": business_days,
            "absences": absences,
            "home_office_days": home_office_days,
        }),
        output: serde_json::json!({
            "days_worked": days_worked,
            "presential_days": presential_days,
        }),
        reasoning: format!(
            "{} business days - {} absences = {} days worked; {} - {} home office = {} presential days",
            business_days,
            absences,
            days_worked,
            days_worked,
            home_office_days,
            presential_days
        ),
    });
    step_number += 1;

    // Meal/food voucher
    let meal_voucher_amount = Decimal::from(days_worked) * sector.daily_rate;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "meal_voucher".to_string(),
        rule_name: "Meal/Food Voucher".to_string(),
        employee_id: Some(employee.id.clone()),
        input: serde_json::json!({
            "days_worked": days_worked,
            "sector_id": sector.id,
            "daily_rate": sector.daily_rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "amount": meal_voucher_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} days × ${} = ${}",
            days_worked,
            sector.daily_rate.normalize(),
            meal_voucher_amount.normalize()
        ),
    });
    step_number += 1;

    // Transport, then routing
    let computed_transport_amount = match (employee.transport_mode, employee.trip_fare) {
        (TransportMode::None, _) | (_, None) => Decimal::ZERO,
        (_, Some(fare)) => {
            Decimal::from(presential_days) * Decimal::from(TRIPS_PER_PRESENTIAL_DAY) * fare
        }
    };

    let (flash_credit, transport_amount, routing) = match employee.transport_mode {
        TransportMode::Flash => (
            meal_voucher_amount + computed_transport_amount,
            Decimal::ZERO,
            "transport loaded onto Flash card with meal voucher",
        ),
        TransportMode::BhBus => (
            meal_voucher_amount,
            computed_transport_amount,
            "transport requested separately from BHBus",
        ),
        TransportMode::None => (
            meal_voucher_amount,
            Decimal::ZERO,
            "no transport voucher",
        ),
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "transport_voucher".to_string(),
        rule_name: "Transport Voucher Routing".to_string(),
        employee_id: Some(employee.id.clone()),
        input: serde_json::json!({
            "transport_mode": employee.transport_mode,
            "trip_fare": employee.trip_fare.map(|f| f.normalize().to_string()),
            "presential_days": presential_days,
        }),
        output: serde_json::json!({
            "computed_transport_amount": computed_transport_amount.normalize().to_string(),
            "reported_transport_amount": transport_amount.normalize().to_string(),
            "flash_credit": flash_credit.normalize().to_string(),
        }),
        reasoning: match employee.trip_fare {
            Some(fare) if employee.transport_mode != TransportMode::None => format!(
                "{} presential days × {} trips × ${} = ${}; {}",
                presential_days,
                TRIPS_PER_PRESENTIAL_DAY,
                fare.normalize(),
                computed_transport_amount.normalize(),
                routing
            ),
            _ => format!("No transport computed; {}", routing),
        },
    });
    step_number += 1;

    // Final salary
    let final_salary = employee.base_salary - co_payment;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "final_salary".to_string(),
        rule_name: "Final Salary".to_string(),
        employee_id: Some(employee.id.clone()),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "co_payment": co_payment.normalize().to_string(),
        }),
        output: serde_json::json!({
            "final_salary": final_salary.normalize().to_string(),
        }),
        reasoning: format!(
            "${} - ${} co-payment = ${}",
            employee.base_salary.normalize(),
            co_payment.normalize(),
            final_salary.normalize()
        ),
    });

    let result = CalculationResult {
        employee_id: employee.id.clone(),
        name: employee.name.clone(),
        tax_id: employee.tax_id.clone(),
        sector_id: sector.id.clone(),
        sector_name: sector.name.clone(),
        base_salary: employee.base_salary,
        transport_mode: employee.transport_mode,
        flash_card_id: employee.flash_card_id.clone(),
        days_worked,
        presential_days,
        home_office_days,
        absences: i64::from(absences),
        meal_voucher_amount,
        transport_amount,
        flash_credit,
        co_payment,
        final_salary,
    };

    BenefitCalculation {
        result,
        computed_transport_amount,
        audit_steps,
    }
}
