//! Core data models for the HR engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod compensation;
mod trip;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BatchCalculationResult, CompensationCalculationResult,
    TripCalculationResult,
};
pub use compensation::{
    BatchAdjustmentInput, BatchTotals, CompensationAdjustmentInput, CompensationAdjustmentResult,
    EmployeeAdjustment, EmployeeCompensation, PayComponent, UpdateRule,
};
pub use trip::{TravelMode, TripPerDiemInput, TripPerDiemResult};
