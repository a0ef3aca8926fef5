//! Request types for the HR engine API.
//!
//! This module defines the JSON request structures for the trip and
//! compensation endpoints, and their conversion into calculator inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigLoader, TemplateKind};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BatchAdjustmentInput, CompensationAdjustmentInput, EmployeeCompensation, PayComponent,
    TravelMode, TripPerDiemInput, UpdateRule,
};

/// Request body for the `/trips/per-diem` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// The ID of the employee travelling.
    pub employee_id: String,
    /// Destination code used to look up the per-night rate.
    #[serde(default)]
    pub destination_code: Option<String>,
    /// The first day of the trip.
    pub start_date: NaiveDate,
    /// The last day of the trip.
    pub end_date: NaiveDate,
    /// Explicit per-night rate, overriding the destination's rate.
    #[serde(default)]
    pub per_night_rate: Option<Decimal>,
    /// How the employee travels.
    pub travel_mode: TravelMode,
    /// Whether the employee pays expenses with a corporate card.
    #[serde(default)]
    pub corporate_card_used: bool,
    /// Explicit car uplift, overriding the policy default.
    #[serde(default)]
    pub car_uplift_per_night: Option<Decimal>,
}

impl TripRequest {
    /// Validates the request and resolves its rates against the policy.
    ///
    /// An explicit rate wins over the destination's rate. Car trips without
    /// an explicit uplift use the policy default.
    pub fn to_input(&self, config: &ConfigLoader) -> EngineResult<TripPerDiemInput> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidTrip {
                field: "end_date".to_string(),
                message: format!(
                    "end_date {} is before start_date {}",
                    self.end_date, self.start_date
                ),
            });
        }

        let per_night_rate = match (self.per_night_rate, &self.destination_code) {
            (Some(rate), _) => Some(rate),
            (None, Some(code)) => Some(config.get_destination(code)?.per_night_rate),
            (None, None) => None,
        };

        let car_uplift_per_night = match self.travel_mode {
            TravelMode::Car => self
                .car_uplift_per_night
                .or_else(|| Some(config.default_car_uplift())),
            TravelMode::Plane => self.car_uplift_per_night,
        };

        Ok(TripPerDiemInput {
            start_date: self.start_date,
            end_date: self.end_date,
            per_night_rate,
            travel_mode: self.travel_mode,
            corporate_card_used: self.corporate_card_used,
            car_uplift_per_night,
        })
    }
}

/// An allowance or deduction entry in a request.
///
/// Either names a configured template or gives the amount inline, never
/// both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayComponentRequest {
    /// Template code to copy the entry from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Display name of an inline entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fixed amount, or percentage of base when `is_percentage_of_base`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Whether `amount` is a percentage of the base salary.
    #[serde(default)]
    pub is_percentage_of_base: bool,
}

impl PayComponentRequest {
    fn resolve(
        &self,
        config: &ConfigLoader,
        kind: TemplateKind,
        field: &str,
    ) -> EngineResult<PayComponent> {
        match (&self.template, self.amount) {
            (Some(code), None) => Ok(config.get_template_of_kind(code, kind)?.to_component()),
            (None, Some(amount)) => Ok(PayComponent {
                name: self.name.clone().unwrap_or_default(),
                amount,
                is_percentage_of_base: self.is_percentage_of_base,
            }),
            (Some(code), Some(_)) => Err(EngineError::InvalidCompensation {
                field: field.to_string(),
                message: format!(
                    "entry names template '{}' and also gives an amount; use one or the other",
                    code
                ),
            }),
            (None, None) => Err(EngineError::InvalidCompensation {
                field: field.to_string(),
                message: "entry needs either a template or an amount".to_string(),
            }),
        }
    }
}

fn resolve_components(
    entries: &[PayComponentRequest],
    config: &ConfigLoader,
    kind: TemplateKind,
    field: &str,
) -> EngineResult<Vec<PayComponent>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.resolve(config, kind, &format!("{}[{}]", field, i)))
        .collect()
}

fn validate_base_salary(employee_id: &str, base_salary: Decimal) -> EngineResult<()> {
    if base_salary < Decimal::ZERO {
        return Err(EngineError::InvalidCompensation {
            field: "base_salary".to_string(),
            message: format!(
                "base salary for '{}' must not be negative, got {}",
                employee_id, base_salary
            ),
        });
    }
    Ok(())
}

/// Request body for the `/compensation/adjust` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationRequest {
    /// The ID of the employee being adjusted.
    pub employee_id: String,
    /// The current base salary.
    pub base_salary: Decimal,
    /// How the update is applied.
    pub update_rule: UpdateRule,
    /// The percentage, fixed amount or new base, depending on the rule.
    pub update_value: Decimal,
    /// Allowances assigned to the employee.
    #[serde(default)]
    pub allowances: Vec<PayComponentRequest>,
    /// Deductions assigned to the employee.
    #[serde(default)]
    pub deductions: Vec<PayComponentRequest>,
    /// Salary registered with GOSI. When present a GOSI deduction is added.
    #[serde(default)]
    pub gosi_registered_base: Option<Decimal>,
}

impl CompensationRequest {
    /// Validates the request and resolves template references.
    ///
    /// The GOSI deduction is not included; the handler appends it so that
    /// its calculation appears in the audit trace.
    pub fn to_input(&self, config: &ConfigLoader) -> EngineResult<CompensationAdjustmentInput> {
        validate_base_salary(&self.employee_id, self.base_salary)?;

        Ok(CompensationAdjustmentInput {
            base_salary: self.base_salary,
            update_rule: self.update_rule,
            update_value: self.update_value,
            allowances: resolve_components(
                &self.allowances,
                config,
                TemplateKind::Allowance,
                "allowances",
            )?,
            deductions: resolve_components(
                &self.deductions,
                config,
                TemplateKind::Deduction,
                "deductions",
            )?,
        })
    }
}

/// One employee in a `/compensation/batch` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEmployeeRequest {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The current base salary.
    pub base_salary: Decimal,
    /// Allowances assigned to the employee.
    #[serde(default)]
    pub allowances: Vec<PayComponentRequest>,
    /// Deductions assigned to the employee.
    #[serde(default)]
    pub deductions: Vec<PayComponentRequest>,
}

/// Request body for the `/compensation/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// How the update is applied.
    pub update_rule: UpdateRule,
    /// The percentage, fixed amount or new base, depending on the rule.
    pub update_value: Decimal,
    /// The employees selected for the update.
    pub employees: Vec<BatchEmployeeRequest>,
}

impl BatchRequest {
    /// Validates the request and resolves template references.
    pub fn to_input(&self, config: &ConfigLoader) -> EngineResult<BatchAdjustmentInput> {
        let employees = self
            .employees
            .iter()
            .map(|employee| {
                validate_base_salary(&employee.employee_id, employee.base_salary)?;
                Ok(EmployeeCompensation {
                    employee_id: employee.employee_id.clone(),
                    base_salary: employee.base_salary,
                    allowances: resolve_components(
                        &employee.allowances,
                        config,
                        TemplateKind::Allowance,
                        "allowances",
                    )?,
                    deductions: resolve_components(
                        &employee.deductions,
                        config,
                        TemplateKind::Deduction,
                        "deductions",
                    )?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(BatchAdjustmentInput {
            update_rule: self.update_rule,
            update_value: self.update_value,
            employees,
        })
    }
}
