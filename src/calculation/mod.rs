//! Calculation logic for the HR engine.
//!
//! This module contains the per-diem calculation for business trips, the
//! compensation adjustment calculation for salary updates, bulk salary
//! updates across a set of employees, and the GOSI deduction.
//!
//! Every calculation is a pure function of its inputs.

mod batch;
pub(crate) mod checked;
mod compensation;
mod gosi;
mod per_diem;

pub use batch::{BatchAdjustmentCalculation, aggregate_batch_totals, calculate_batch_adjustment};
pub use compensation::{
    COMPENSATION_POLICY_REF, CompensationCalculation, PayBreakdown, apply_update_rule,
    calculate_compensation_adjustment, compute_pay, resolve_components, round_to_unit,
};
pub use gosi::{GOSI_DEDUCTION_NAME, GosiDeductionResult, calculate_gosi_deduction};
pub use per_diem::{
    PER_DIEM_POLICY_REF, PerDiemAmounts, TripPerDiemCalculation, calculate_trip_per_diem,
    compute_nights, compute_per_diem,
};
