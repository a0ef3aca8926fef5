//! Bulk salary update calculation.
//!
//! Each employee in a batch is adjusted independently with the same rule;
//! the per-employee results are then summed into batch totals.

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, BatchAdjustmentInput, BatchTotals, EmployeeAdjustment,
};

use super::checked;
use super::compensation::calculate_compensation_adjustment;

/// The result of a bulk salary update, including audit steps.
#[derive(Debug, Clone)]
pub struct BatchAdjustmentCalculation {
    /// Per-employee adjustments, in input order.
    pub employees: Vec<EmployeeAdjustment>,
    /// Aggregated figures across the batch.
    pub totals: BatchTotals,
    /// The audit steps recording the calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating, prefixed with the employee ID.
    pub warnings: Vec<AuditWarning>,
}

/// Sums per-employee adjustments into batch totals.
///
/// Fails with `CalculationError` if a running total leaves the decimal range.
pub fn aggregate_batch_totals(employees: &[EmployeeAdjustment]) -> EngineResult<BatchTotals> {
    employees
        .iter()
        .try_fold(BatchTotals::zero(), |totals, employee| {
            Ok(BatchTotals {
                employee_count: totals.employee_count + 1,
                total_original_net: checked::add(
                    totals.total_original_net,
                    employee.original_net_pay,
                )?,
                total_new_net: checked::add(totals.total_new_net, employee.adjustment.net_pay)?,
                total_new_gross: checked::add(
                    totals.total_new_gross,
                    employee.adjustment.gross_pay,
                )?,
                total_delta: checked::add(totals.total_delta, employee.adjustment.delta)?,
            })
        })
}

/// Applies one update rule to every employee in a batch.
///
/// No employee's result depends on another's, so the totals are the same
/// regardless of the order employees are listed in.
///
/// # Errors
///
/// Stops at the first employee whose figures are out of range and returns
/// a `CalculationError` naming that employee.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_batch_adjustment;
/// use hr_engine::models::{BatchAdjustmentInput, EmployeeCompensation, UpdateRule};
/// use rust_decimal::Decimal;
///
/// let batch = BatchAdjustmentInput {
///     update_rule: UpdateRule::FixedIncrease,
///     update_value: Decimal::from(100),
///     employees: vec![
///         EmployeeCompensation {
///             employee_id: "emp_001".to_string(),
///             base_salary: Decimal::from(1000),
///             allowances: vec![],
///             deductions: vec![],
///         },
///         EmployeeCompensation {
///             employee_id: "emp_002".to_string(),
///             base_salary: Decimal::from(2000),
///             allowances: vec![],
///             deductions: vec![],
///         },
///     ],
/// };
///
/// let calculation = calculate_batch_adjustment(&batch, 1).unwrap();
/// assert_eq!(calculation.totals.employee_count, 2);
/// assert_eq!(calculation.totals.total_delta, Decimal::from(200));
/// ```
pub fn calculate_batch_adjustment(
    input: &BatchAdjustmentInput,
    step_number: u32,
) -> EngineResult<BatchAdjustmentCalculation> {
    let mut employees = Vec::with_capacity(input.employees.len());
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut next_step = step_number;

    for employee in &input.employees {
        let calculation = calculate_compensation_adjustment(
            &employee.to_adjustment_input(input.update_rule, input.update_value),
            next_step,
        )
        .map_err(|err| match err {
            EngineError::CalculationError { message } => EngineError::CalculationError {
                message: format!("{}: {}", employee.employee_id, message),
            },
            other => other,
        })?;

        next_step += calculation.audit_steps.len() as u32;
        audit_steps.extend(calculation.audit_steps);
        warnings.extend(calculation.warnings.into_iter().map(|w| AuditWarning {
            message: format!("{}: {}", employee.employee_id, w.message),
            ..w
        }));

        employees.push(EmployeeAdjustment {
            employee_id: employee.employee_id.clone(),
            original_base_salary: employee.base_salary,
            original_net_pay: calculation.original_net_pay,
            adjustment: calculation.result,
        });
    }

    let totals = aggregate_batch_totals(&employees)?;

    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "batch_totals".to_string(),
        rule_name: "Batch Totals".to_string(),
        policy_ref: "payroll.bulk_update".to_string(),
        input: serde_json::json!({
            "employee_count": totals.employee_count,
            "update_rule": input.update_rule.as_str(),
            "update_value": input.update_value.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_original_net": totals.total_original_net.normalize().to_string(),
            "total_new_net": totals.total_new_net.normalize().to_string(),
            "total_new_gross": totals.total_new_gross.normalize().to_string(),
            "total_delta": totals.total_delta.normalize().to_string()
        }),
        reasoning: format!(
            "{} employee(s): net ${} -> ${} (delta ${})",
            totals.employee_count,
            totals.total_original_net.normalize(),
            totals.total_new_net.normalize(),
            totals.total_delta.normalize()
        ),
    });

    if totals.employee_count == 0 {
        warnings.push(AuditWarning::new(
            "EMPTY_BATCH",
            "No employees selected for the salary update",
            "low",
        ));
    }

    Ok(BatchAdjustmentCalculation {
        employees,
        totals,
        audit_steps,
        warnings,
    })
}
