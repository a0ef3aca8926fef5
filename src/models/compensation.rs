//! Compensation models.
//!
//! This module defines salary update rules, allowance and deduction entries,
//! and the inputs and outputs of a compensation adjustment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::checked;
use crate::error::EngineResult;

/// How a salary update is applied to the current base salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// Raise the base by a percentage.
    PercentageIncrease,
    /// Lower the base by a percentage.
    PercentageDecrease,
    /// Raise the base by a fixed amount.
    FixedIncrease,
    /// Lower the base by a fixed amount.
    FixedDecrease,
    /// Replace the base with the given value.
    SetNew,
}

impl UpdateRule {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateRule::PercentageIncrease => "percentage_increase",
            UpdateRule::PercentageDecrease => "percentage_decrease",
            UpdateRule::FixedIncrease => "fixed_increase",
            UpdateRule::FixedDecrease => "fixed_decrease",
            UpdateRule::SetNew => "set_new",
        }
    }
}

/// A single allowance or deduction entry.
///
/// When `is_percentage_of_base` is set, `amount` holds the percentage value
/// and the entry resolves against the base salary it is applied to.
///
/// # Example
///
/// ```
/// use hr_engine::models::PayComponent;
/// use rust_decimal::Decimal;
///
/// let housing = PayComponent::fixed("Housing", Decimal::from(100));
/// let pension = PayComponent::percentage("Pension", Decimal::from(5));
///
/// assert_eq!(housing.resolve(Decimal::from(1000)).unwrap(), Decimal::from(100));
/// assert_eq!(pension.resolve(Decimal::from(1000)).unwrap(), Decimal::from(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponent {
    /// Display name of the entry.
    #[serde(default)]
    pub name: String,
    /// Fixed amount, or percentage of base when `is_percentage_of_base`.
    pub amount: Decimal,
    /// Whether `amount` is a percentage of the base salary.
    #[serde(default)]
    pub is_percentage_of_base: bool,
}

impl PayComponent {
    /// Creates a fixed-amount entry.
    pub fn fixed(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            is_percentage_of_base: false,
        }
    }

    /// Creates a percentage-of-base entry.
    pub fn percentage(name: impl Into<String>, percent: Decimal) -> Self {
        Self {
            name: name.into(),
            amount: percent,
            is_percentage_of_base: true,
        }
    }

    /// Resolves this entry to a currency amount against `base`.
    ///
    /// Fails with `CalculationError` when the percentage of `base` is out of
    /// the decimal range.
    pub fn resolve(&self, base: Decimal) -> EngineResult<Decimal> {
        if self.is_percentage_of_base {
            checked::percent_of(base, self.amount)
        } else {
            Ok(self.amount)
        }
    }
}

/// The inputs to a compensation adjustment for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationAdjustmentInput {
    /// The current base salary.
    pub base_salary: Decimal,
    /// How the update is applied.
    pub update_rule: UpdateRule,
    /// The percentage, fixed amount or new base, depending on the rule.
    pub update_value: Decimal,
    /// Allowances added to the base.
    #[serde(default)]
    pub allowances: Vec<PayComponent>,
    /// Deductions subtracted from gross pay.
    #[serde(default)]
    pub deductions: Vec<PayComponent>,
}

/// The outcome of a compensation adjustment.
///
/// # Example
///
/// ```
/// use hr_engine::models::CompensationAdjustmentResult;
/// use rust_decimal::Decimal;
///
/// let result = CompensationAdjustmentResult {
///     new_base_salary: Decimal::from(1100),
///     total_allowances: Decimal::from(100),
///     total_deductions: Decimal::from(55),
///     gross_pay: Decimal::from(1200),
///     net_pay: Decimal::from(1145),
///     delta: Decimal::from(100),
/// };
/// assert_eq!(result.gross_pay - result.total_deductions, result.net_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationAdjustmentResult {
    /// The base salary after the update rule.
    pub new_base_salary: Decimal,
    /// Sum of resolved allowances.
    pub total_allowances: Decimal,
    /// Sum of resolved deductions.
    pub total_deductions: Decimal,
    /// New base plus allowances.
    pub gross_pay: Decimal,
    /// Gross pay less deductions.
    pub net_pay: Decimal,
    /// New net pay less the net pay before the update.
    pub delta: Decimal,
}

/// One employee's current compensation within a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensation {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The current base salary.
    pub base_salary: Decimal,
    /// Allowances currently assigned to the employee.
    #[serde(default)]
    pub allowances: Vec<PayComponent>,
    /// Deductions currently assigned to the employee.
    #[serde(default)]
    pub deductions: Vec<PayComponent>,
}

impl EmployeeCompensation {
    /// Builds the single-employee input for the given update.
    pub fn to_adjustment_input(
        &self,
        update_rule: UpdateRule,
        update_value: Decimal,
    ) -> CompensationAdjustmentInput {
        CompensationAdjustmentInput {
            base_salary: self.base_salary,
            update_rule,
            update_value,
            allowances: self.allowances.clone(),
            deductions: self.deductions.clone(),
        }
    }
}

/// A bulk salary update applied to a selected set of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAdjustmentInput {
    /// How the update is applied.
    pub update_rule: UpdateRule,
    /// The percentage, fixed amount or new base, depending on the rule.
    pub update_value: Decimal,
    /// The employees selected for the update.
    pub employees: Vec<EmployeeCompensation>,
}

/// The adjustment computed for one employee in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAdjustment {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The base salary before the update.
    pub original_base_salary: Decimal,
    /// Net pay before the update.
    pub original_net_pay: Decimal,
    /// The adjusted figures.
    pub adjustment: CompensationAdjustmentResult,
}

/// Aggregated figures across a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTotals {
    /// Number of employees in the batch.
    pub employee_count: usize,
    /// Sum of net pay before the update.
    pub total_original_net: Decimal,
    /// Sum of net pay after the update.
    pub total_new_net: Decimal,
    /// Sum of gross pay after the update.
    pub total_new_gross: Decimal,
    /// Sum of per-employee deltas.
    pub total_delta: Decimal,
}

impl BatchTotals {
    /// Totals for an empty batch.
    pub fn zero() -> Self {
        Self {
            employee_count: 0,
            total_original_net: Decimal::ZERO,
            total_new_net: Decimal::ZERO,
            total_new_gross: Decimal::ZERO,
            total_delta: Decimal::ZERO,
        }
    }
}
