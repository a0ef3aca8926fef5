//! Calculation result models for the HR engine.
//!
//! This module contains the result envelopes returned for trip, single
//! compensation and batch compensation calculations, along with the audit
//! trace types shared by all of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BatchTotals, CompensationAdjustmentResult, EmployeeAdjustment, TripPerDiemResult};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the policy section for this rule.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate inputs that were accepted but deserve a second look,
/// such as a defaulted rate or a salary driven below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use hr_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(!trace.has_warning("RATE_DEFAULTED"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The result of a per-diem calculation for one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee travelling.
    pub employee_id: String,
    /// The destination code, if the trip named one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_code: Option<String>,
    /// The derived per-diem figures.
    pub per_diem: TripPerDiemResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// The result of a compensation adjustment for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee being adjusted.
    pub employee_id: String,
    /// The adjusted figures.
    pub adjustment: CompensationAdjustmentResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// The result of a bulk salary update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Per-employee adjustments, in request order.
    pub employees: Vec<EmployeeAdjustment>,
    /// Aggregated figures across the batch.
    pub totals: BatchTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_audit_trace() -> AuditTrace {
        AuditTrace {
            steps: vec![],
            warnings: vec![],
            duration_us: 1000,
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "trip_nights".to_string(),
            rule_name: "Trip Nights".to_string(),
            policy_ref: "travel.nights".to_string(),
            input: serde_json::json!({"start_date": "2026-03-01"}),
            output: serde_json::json!({"nights": 3}),
            reasoning: "2026-03-01 to 2026-03-04 = 3 nights".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"trip_nights\""));
        assert!(json.contains("\"policy_ref\":\"travel.nights\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new("RATE_DEFAULTED", "Per-night rate not set", "medium");

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"RATE_DEFAULTED\""));
        assert!(json.contains("\"message\":\"Per-night rate not set\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_has_warning() {
        let mut trace = create_sample_audit_trace();
        assert!(!trace.has_warning("NEGATIVE_NET_PAY"));

        trace
            .warnings
            .push(AuditWarning::new("NEGATIVE_NET_PAY", "Net pay below zero", "high"));
        assert!(trace.has_warning("NEGATIVE_NET_PAY"));
        assert!(!trace.has_warning("RATE_DEFAULTED"));
    }

    #[test]
    fn test_trip_result_skips_missing_destination() {
        let result = TripCalculationResult {
            calculation_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            employee_id: "emp_001".to_string(),
            destination_code: None,
            per_diem: TripPerDiemResult {
                nights: 3,
                per_diem_budget: dec("135.000"),
                car_uplift_total: dec("60"),
                per_diem_payable: dec("135.000"),
            },
            audit_trace: create_sample_audit_trace(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"calculation_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"per_diem_budget\":\"135.000\""));
        assert!(!json.contains("destination_code"));
    }

    #[test]
    fn test_batch_result_deserialization() {
        let json = r#"{
            "calculation_id": "12345678-1234-1234-1234-123456789012",
            "timestamp": "2026-03-01T10:00:00Z",
            "engine_version": "0.1.0",
            "employees": [],
            "totals": {
                "employee_count": 0,
                "total_original_net": "0",
                "total_new_net": "0",
                "total_new_gross": "0",
                "total_delta": "0"
            },
            "audit_trace": {
                "steps": [],
                "warnings": [],
                "duration_us": 0
            }
        }"#;

        let result: BatchCalculationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.engine_version, "0.1.0");
        assert!(result.employees.is_empty());
        assert_eq!(result.totals, BatchTotals::zero());
    }
}
