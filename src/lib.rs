//! HR engine: per-diem and compensation adjustment calculations.
//!
//! This crate provides the calculation core behind business-trip requests
//! and salary updates: nights and per-diem amounts for a trip, and new
//! gross and net pay for one employee or a batch of employees after a
//! salary update rule.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
