//! GOSI social-insurance deduction.
//!
//! The employee's share of GOSI is a percentage of the salary registered
//! with the insurer, optionally capped at a contribution ceiling. It is
//! added to an employee's deductions as a fixed entry.

use rust_decimal::{Decimal, RoundingStrategy};

use super::checked;
use crate::error::EngineResult;
use crate::models::{AuditStep, PayComponent};

/// Name given to the generated deduction entry.
pub const GOSI_DEDUCTION_NAME: &str = "GOSI";

/// The result of calculating a GOSI deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct GosiDeductionResult {
    /// The deduction entry to append to an employee's deductions.
    pub deduction: PayComponent,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the GOSI deduction for a registered base salary.
///
/// The contributory base is the registered base capped at `ceiling` when
/// one is given. The amount is rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_gosi_deduction;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_gosi_deduction(
///     Decimal::from(10000),
///     Decimal::from_str("9.75").unwrap(),
///     Some(Decimal::from(45000)),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.deduction.amount, Decimal::from(975));
/// assert!(!result.deduction.is_percentage_of_base);
/// ```
pub fn calculate_gosi_deduction(
    registered_base: Decimal,
    rate_percent: Decimal,
    ceiling: Option<Decimal>,
    step_number: u32,
) -> EngineResult<GosiDeductionResult> {
    let (contributory_base, capped) = match ceiling {
        Some(ceiling) if registered_base > ceiling => (ceiling, true),
        _ => (registered_base, false),
    };

    let amount = checked::percent_of(contributory_base, rate_percent)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let reasoning = if capped {
        format!(
            "${} (capped from ${}) × {}% = ${}",
            contributory_base.normalize(),
            registered_base.normalize(),
            rate_percent.normalize(),
            amount.normalize()
        )
    } else {
        format!(
            "${} × {}% = ${}",
            contributory_base.normalize(),
            rate_percent.normalize(),
            amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "gosi_deduction".to_string(),
        rule_name: "GOSI Deduction".to_string(),
        policy_ref: "payroll.gosi".to_string(),
        input: serde_json::json!({
            "registered_base": registered_base.normalize().to_string(),
            "rate_percent": rate_percent.normalize().to_string(),
            "ceiling": ceiling.map(|c| c.normalize().to_string())
        }),
        output: serde_json::json!({
            "contributory_base": contributory_base.normalize().to_string(),
            "amount": amount.normalize().to_string(),
            "ceiling_applied": capped
        }),
        reasoning,
    };

    Ok(GosiDeductionResult {
        deduction: PayComponent::fixed(GOSI_DEDUCTION_NAME, amount),
        audit_step,
    })
}
