//! Compensation adjustment calculation.
//!
//! This module applies a salary update rule to a base salary and derives
//! allowances, deductions, gross and net pay from the new base.

use rust_decimal::{Decimal, RoundingStrategy};

use super::checked;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, CompensationAdjustmentInput, CompensationAdjustmentResult,
    PayComponent, UpdateRule,
};

/// Policy reference recorded on compensation audit steps.
pub const COMPENSATION_POLICY_REF: &str = "payroll.salary_update";

/// Gross and net pay derived from a base salary and its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayBreakdown {
    /// Sum of resolved allowances.
    pub total_allowances: Decimal,
    /// Sum of resolved deductions.
    pub total_deductions: Decimal,
    /// Base plus allowances.
    pub gross_pay: Decimal,
    /// Gross pay less deductions.
    pub net_pay: Decimal,
}

/// The result of a compensation adjustment, including audit steps.
#[derive(Debug, Clone)]
pub struct CompensationCalculation {
    /// The adjusted figures.
    pub result: CompensationAdjustmentResult,
    /// Net pay computed from the unadjusted base.
    pub original_net_pay: Decimal,
    /// The audit steps recording the calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Rounds to the nearest whole currency unit, halves rounding up.
///
/// Halves round toward positive infinity, so `-2.5` becomes `-2`.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::round_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_unit(Decimal::from_str("1049.5").unwrap()), Decimal::from(1050));
/// assert_eq!(round_to_unit(Decimal::from_str("-2.5").unwrap()), Decimal::from(-2));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

/// Applies an update rule to a base salary.
///
/// Percentage rules round to whole currency units. Fixed decreases are not
/// clamped at zero and may produce a negative base.
///
/// # Errors
///
/// Returns `CalculationError` when the new base falls outside the decimal range.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::apply_update_rule;
/// use hr_engine::models::UpdateRule;
/// use rust_decimal::Decimal;
///
/// let base = Decimal::from(1000);
/// assert_eq!(
///     apply_update_rule(base, UpdateRule::PercentageIncrease, Decimal::from(10)).unwrap(),
///     Decimal::from(1100)
/// );
/// assert_eq!(
///     apply_update_rule(base, UpdateRule::SetNew, Decimal::from(900)).unwrap(),
///     Decimal::from(900)
/// );
/// ```
pub fn apply_update_rule(base: Decimal, rule: UpdateRule, value: Decimal) -> EngineResult<Decimal> {
    let fraction = value / Decimal::ONE_HUNDRED;
    match rule {
        UpdateRule::PercentageIncrease => {
            let factor = checked::add(Decimal::ONE, fraction)?;
            Ok(round_to_unit(checked::mul(base, factor)?))
        }
        UpdateRule::PercentageDecrease => {
            let factor = checked::sub(Decimal::ONE, fraction)?;
            Ok(round_to_unit(checked::mul(base, factor)?))
        }
        UpdateRule::FixedIncrease => checked::add(base, value),
        UpdateRule::FixedDecrease => checked::sub(base, value),
        UpdateRule::SetNew => Ok(value),
    }
}

/// Sums a list of allowance or deduction entries against a base salary.
pub fn resolve_components(base: Decimal, entries: &[PayComponent]) -> EngineResult<Decimal> {
    checked::sum(entries.iter().map(|entry| entry.resolve(base)))
}

/// Derives gross and net pay for a base salary and its entries.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::compute_pay;
/// use hr_engine::models::PayComponent;
/// use rust_decimal::Decimal;
///
/// let pay = compute_pay(
///     Decimal::from(1100),
///     &[PayComponent::fixed("Transport", Decimal::from(100))],
///     &[PayComponent::percentage("Pension", Decimal::from(5))],
/// )
/// .unwrap();
///
/// assert_eq!(pay.total_deductions, Decimal::from(55));
/// assert_eq!(pay.gross_pay, Decimal::from(1200));
/// assert_eq!(pay.net_pay, Decimal::from(1145));
/// ```
pub fn compute_pay(
    base: Decimal,
    allowances: &[PayComponent],
    deductions: &[PayComponent],
) -> EngineResult<PayBreakdown> {
    let total_allowances = resolve_components(base, allowances)?;
    let total_deductions = resolve_components(base, deductions)?;
    let gross_pay = checked::add(base, total_allowances)?;
    let net_pay = checked::sub(gross_pay, total_deductions)?;

    Ok(PayBreakdown {
        total_allowances,
        total_deductions,
        gross_pay,
        net_pay,
    })
}

/// Calculates a compensation adjustment for one employee.
///
/// The delta compares the new net pay with the net pay the same entries
/// produce on the unadjusted base. A base or net pay below zero is
/// reported as a warning and left as is.
///
/// # Arguments
///
/// * `input` - The current base, update rule and entries
/// * `step_number` - The step number for the first audit step
///
/// # Errors
///
/// Fails with `CalculationError` if any intermediate amount is out of range.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_compensation_adjustment;
/// use hr_engine::models::{CompensationAdjustmentInput, PayComponent, UpdateRule};
/// use rust_decimal::Decimal;
///
/// let input = CompensationAdjustmentInput {
///     base_salary: Decimal::from(1000),
///     update_rule: UpdateRule::PercentageIncrease,
///     update_value: Decimal::from(10),
///     allowances: vec![PayComponent::fixed("Transport", Decimal::from(100))],
///     deductions: vec![PayComponent::percentage("Pension", Decimal::from(5))],
/// };
///
/// let calculation = calculate_compensation_adjustment(&input, 1).unwrap();
/// assert_eq!(calculation.result.new_base_salary, Decimal::from(1100));
/// assert_eq!(calculation.result.net_pay, Decimal::from(1145));
/// assert_eq!(calculation.result.delta, Decimal::from(95));
/// ```
pub fn calculate_compensation_adjustment(
    input: &CompensationAdjustmentInput,
    step_number: u32,
) -> EngineResult<CompensationCalculation> {
    let mut warnings = Vec::new();

    let new_base = apply_update_rule(input.base_salary, input.update_rule, input.update_value)?;

    let rule_reasoning = match input.update_rule {
        UpdateRule::PercentageIncrease => format!(
            "${} × (1 + {}%) rounded = ${}",
            input.base_salary.normalize(),
            input.update_value.normalize(),
            new_base.normalize()
        ),
        UpdateRule::PercentageDecrease => format!(
            "${} × (1 - {}%) rounded = ${}",
            input.base_salary.normalize(),
            input.update_value.normalize(),
            new_base.normalize()
        ),
        UpdateRule::FixedIncrease => format!(
            "${} + ${} = ${}",
            input.base_salary.normalize(),
            input.update_value.normalize(),
            new_base.normalize()
        ),
        UpdateRule::FixedDecrease => format!(
            "${} - ${} = ${}",
            input.base_salary.normalize(),
            input.update_value.normalize(),
            new_base.normalize()
        ),
        UpdateRule::SetNew => format!("Base set to ${}", new_base.normalize()),
    };

    let rule_step = AuditStep {
        step_number,
        rule_id: "salary_update_rule".to_string(),
        rule_name: "Salary Update Rule".to_string(),
        policy_ref: COMPENSATION_POLICY_REF.to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.normalize().to_string(),
            "update_rule": input.update_rule.as_str(),
            "update_value": input.update_value.normalize().to_string()
        }),
        output: serde_json::json!({
            "new_base_salary": new_base.normalize().to_string()
        }),
        reasoning: rule_reasoning,
    };

    if new_base < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NEGATIVE_BASE_SALARY",
            format!(
                "Update rule {} produced a negative base salary of ${}",
                input.update_rule.as_str(),
                new_base.normalize()
            ),
            "high",
        ));
    }

    let original = compute_pay(input.base_salary, &input.allowances, &input.deductions)?;
    let updated = compute_pay(new_base, &input.allowances, &input.deductions)?;
    let delta = checked::sub(updated.net_pay, original.net_pay)?;

    if updated.net_pay < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NEGATIVE_NET_PAY",
            format!(
                "Deductions of ${} exceed gross pay of ${}",
                updated.total_deductions.normalize(),
                updated.gross_pay.normalize()
            ),
            "high",
        ));
    }

    let pay_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "net_pay".to_string(),
        rule_name: "Gross and Net Pay".to_string(),
        policy_ref: "payroll.net_pay".to_string(),
        input: serde_json::json!({
            "new_base_salary": new_base.normalize().to_string(),
            "allowance_count": input.allowances.len(),
            "deduction_count": input.deductions.len()
        }),
        output: serde_json::json!({
            "total_allowances": updated.total_allowances.normalize().to_string(),
            "total_deductions": updated.total_deductions.normalize().to_string(),
            "gross_pay": updated.gross_pay.normalize().to_string(),
            "net_pay": updated.net_pay.normalize().to_string(),
            "original_net_pay": original.net_pay.normalize().to_string(),
            "delta": delta.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} allowances = ${} gross; - ${} deductions = ${} net ({} vs ${} before)",
            new_base.normalize(),
            updated.total_allowances.normalize(),
            updated.gross_pay.normalize(),
            updated.total_deductions.normalize(),
            updated.net_pay.normalize(),
            signed(delta),
            original.net_pay.normalize()
        ),
    };

    Ok(CompensationCalculation {
        result: CompensationAdjustmentResult {
            new_base_salary: new_base,
            total_allowances: updated.total_allowances,
            total_deductions: updated.total_deductions,
            gross_pay: updated.gross_pay,
            net_pay: updated.net_pay,
            delta,
        },
        original_net_pay: original.net_pay,
        audit_steps: vec![rule_step, pay_step],
        warnings,
    })
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", value.abs().normalize())
    } else {
        format!("+${}", value.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input(rule: UpdateRule, value: &str) -> CompensationAdjustmentInput {
        CompensationAdjustmentInput {
            base_salary: dec("1000"),
            update_rule: rule,
            update_value: dec(value),
            allowances: vec![PayComponent::fixed("Transport", dec("100"))],
            deductions: vec![PayComponent::percentage("Pension", dec("5"))],
        }
    }

    #[test]
    fn test_percentage_increase() {
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::PercentageIncrease, dec("10")).unwrap(),
            dec("1100")
        );
    }

    #[test]
    fn test_percentage_increase_rounds_to_whole_unit() {
        // 1333 * 1.075 = 1432.975
        assert_eq!(
            apply_update_rule(dec("1333"), UpdateRule::PercentageIncrease, dec("7.5")).unwrap(),
            dec("1433")
        );
    }

    #[test]
    fn test_percentage_decrease() {
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::PercentageDecrease, dec("15")).unwrap(),
            dec("850")
        );
        // 999 * 0.95 = 949.05
        assert_eq!(
            apply_update_rule(dec("999"), UpdateRule::PercentageDecrease, dec("5")).unwrap(),
            dec("949")
        );
    }

    #[test]
    fn test_fixed_rules_do_not_round() {
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::FixedIncrease, dec("12.75")).unwrap(),
            dec("1012.75")
        );
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::FixedDecrease, dec("0.25")).unwrap(),
            dec("999.75")
        );
    }

    #[test]
    fn test_fixed_decrease_is_not_clamped() {
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::FixedDecrease, dec("1500")).unwrap(),
            dec("-500")
        );
    }

    #[test]
    fn test_set_new_ignores_base() {
        assert_eq!(
            apply_update_rule(dec("1000"), UpdateRule::SetNew, dec("900")).unwrap(),
            dec("900")
        );
        assert_eq!(
            apply_update_rule(dec("55555"), UpdateRule::SetNew, dec("900")).unwrap(),
            dec("900")
        );
    }

    #[test]
    fn test_round_to_unit_halves_round_up() {
        assert_eq!(round_to_unit(dec("0.5")), dec("1"));
        assert_eq!(round_to_unit(dec("1.49")), dec("1"));
        assert_eq!(round_to_unit(dec("-0.5")), dec("0"));
        assert_eq!(round_to_unit(dec("-1.51")), dec("-2"));
        assert_eq!(round_to_unit(dec("-2.5")), dec("-2"));
        assert_eq!(round_to_unit(Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_update_rule_out_of_range_is_a_calculation_error() {
        let rules = [
            (UpdateRule::PercentageIncrease, dec("10")),
            (UpdateRule::PercentageDecrease, dec("-10")),
            (UpdateRule::FixedIncrease, dec("1")),
        ];
        for (rule, value) in rules {
            assert!(matches!(
                apply_update_rule(Decimal::MAX, rule, value),
                Err(EngineError::CalculationError { .. })
            ));
        }
        assert!(apply_update_rule(Decimal::MIN, UpdateRule::FixedDecrease, dec("1")).is_err());
    }

    #[test]
    fn test_adjustment_with_oversized_allowance_fails() {
        let mut input = create_test_input(UpdateRule::FixedIncrease, "0");
        input.allowances = vec![
            PayComponent::fixed("Bonus", Decimal::MAX),
            PayComponent::fixed("Transport", dec("100")),
        ];

        assert!(matches!(
            calculate_compensation_adjustment(&input, 1),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_resolve_components_mixes_fixed_and_percentage() {
        let entries = vec![
            PayComponent::fixed("Transport", dec("100")),
            PayComponent::percentage("Housing", dec("25")),
        ];
        assert_eq!(resolve_components(dec("1000"), &entries).unwrap(), dec("350"));
        assert_eq!(resolve_components(dec("1000"), &[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_documented_example() {
        let input = create_test_input(UpdateRule::PercentageIncrease, "10");
        let calculation = calculate_compensation_adjustment(&input, 1).unwrap();
        let result = &calculation.result;

        assert_eq!(result.new_base_salary, dec("1100"));
        assert_eq!(result.total_allowances, dec("100"));
        assert_eq!(result.total_deductions, dec("55"));
        assert_eq!(result.gross_pay, dec("1200"));
        assert_eq!(result.net_pay, dec("1145"));
        // Original: 1000 + 100 - 50 = 1050
        assert_eq!(calculation.original_net_pay, dec("1050"));
        assert_eq!(result.delta, dec("95"));
        assert!(calculation.warnings.is_empty());
    }

    #[test]
    fn test_percentage_deductions_follow_new_base() {
        let input = create_test_input(UpdateRule::SetNew, "2000");
        let calculation = calculate_compensation_adjustment(&input, 1).unwrap();

        assert_eq!(calculation.result.total_deductions, dec("100"));
        assert_eq!(calculation.result.net_pay, dec("2000"));
    }

    #[test]
    fn test_negative_base_is_surfaced_as_warning() {
        let input = create_test_input(UpdateRule::FixedDecrease, "1500");
        let calculation = calculate_compensation_adjustment(&input, 1).unwrap();

        assert_eq!(calculation.result.new_base_salary, dec("-500"));
        assert!(
            calculation
                .warnings
                .iter()
                .any(|w| w.code == "NEGATIVE_BASE_SALARY")
        );
    }

    #[test]
    fn test_negative_net_pay_is_surfaced_as_warning() {
        let input = CompensationAdjustmentInput {
            base_salary: dec("500"),
            update_rule: UpdateRule::FixedIncrease,
            update_value: Decimal::ZERO,
            allowances: vec![],
            deductions: vec![PayComponent::fixed("Loan", dec("600"))],
        };

        let calculation = calculate_compensation_adjustment(&input, 1).unwrap();

        assert_eq!(calculation.result.net_pay, dec("-100"));
        assert_eq!(calculation.warnings.len(), 1);
        assert_eq!(calculation.warnings[0].code, "NEGATIVE_NET_PAY");
    }

    #[test]
    fn test_audit_steps() {
        let input = create_test_input(UpdateRule::PercentageIncrease, "10");
        let calculation = calculate_compensation_adjustment(&input, 7).unwrap();

        assert_eq!(calculation.audit_steps.len(), 2);
        assert_eq!(calculation.audit_steps[0].step_number, 7);
        assert_eq!(calculation.audit_steps[0].rule_id, "salary_update_rule");
        assert_eq!(
            calculation.audit_steps[0].input["update_rule"]
                .as_str()
                .unwrap(),
            "percentage_increase"
        );
        assert_eq!(
            calculation.audit_steps[0].output["new_base_salary"]
                .as_str()
                .unwrap(),
            "1100"
        );
        assert!(calculation.audit_steps[0].reasoning.contains("$1000 × (1 + 10%)"));

        assert_eq!(calculation.audit_steps[1].step_number, 8);
        assert_eq!(
            calculation.audit_steps[1].output["net_pay"].as_str().unwrap(),
            "1145"
        );
        assert!(calculation.audit_steps[1].reasoning.contains("+$95"));
    }

    #[test]
    fn test_signed_formatting() {
        assert_eq!(signed(dec("95")), "+$95");
        assert_eq!(signed(dec("-12.50")), "-$12.5");
        assert_eq!(signed(Decimal::ZERO), "+$0");
    }
}
