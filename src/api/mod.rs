//! HTTP API module for the HR engine.
//!
//! This module provides the REST API endpoints for per-diem and
//! compensation calculations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BatchEmployeeRequest, BatchRequest, CompensationRequest, PayComponentRequest, TripRequest,
};
pub use response::ApiError;
pub use state::AppState;
