//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_batch_adjustment, calculate_compensation_adjustment, calculate_gosi_deduction,
    calculate_trip_per_diem,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, BatchCalculationResult, CompensationCalculationResult, TripCalculationResult,
};

use super::request::{BatchRequest, CompensationRequest, TripRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/trips/per-diem", post(trip_per_diem_handler))
        .route("/compensation/adjust", post(compensation_adjust_handler))
        .route("/compensation/batch", post(compensation_batch_handler))
        .with_state(state)
}

fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error).into_response()
}

fn ok_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn failure_response(err: crate::error::EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for POST /trips/per-diem.
async fn trip_per_diem_handler(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing per-diem request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_trip_calculation(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                nights = result.per_diem.nights,
                per_diem_payable = %result.per_diem.per_diem_payable,
                duration_us = result.audit_trace.duration_us,
                "Per-diem calculation completed successfully"
            );
            ok_response(result)
        }
        Err(err) => failure_response(err, correlation_id),
    }
}

/// Handler for POST /compensation/adjust.
async fn compensation_adjust_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompensationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compensation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_compensation_calculation(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                net_pay = %result.adjustment.net_pay,
                delta = %result.adjustment.delta,
                duration_us = result.audit_trace.duration_us,
                "Compensation calculation completed successfully"
            );
            ok_response(result)
        }
        Err(err) => failure_response(err, correlation_id),
    }
}

/// Handler for POST /compensation/batch.
async fn compensation_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch compensation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_batch_calculation(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_count = result.totals.employee_count,
                total_delta = %result.totals.total_delta,
                duration_us = result.audit_trace.duration_us,
                "Batch calculation completed successfully"
            );
            ok_response(result)
        }
        Err(err) => failure_response(err, correlation_id),
    }
}

/// Performs the per-diem calculation for a trip request.
fn perform_trip_calculation(
    request: &TripRequest,
    config: &ConfigLoader,
) -> EngineResult<TripCalculationResult> {
    let start_time = Instant::now();

    let input = request.to_input(config)?;
    let calculation = calculate_trip_per_diem(&input, 1)?;

    Ok(TripCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        employee_id: request.employee_id.clone(),
        destination_code: request.destination_code.clone(),
        per_diem: calculation.result,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Performs the compensation adjustment for a single employee.
fn perform_compensation_calculation(
    request: &CompensationRequest,
    config: &ConfigLoader,
) -> EngineResult<CompensationCalculationResult> {
    let start_time = Instant::now();
    let mut input = request.to_input(config)?;
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    if let Some(registered_base) = request.gosi_registered_base {
        let gosi = config.gosi();
        let gosi_result = calculate_gosi_deduction(
            registered_base,
            gosi.employee_rate_percent,
            gosi.contribution_ceiling,
            step_number,
        )?;
        input.deductions.push(gosi_result.deduction);
        audit_steps.push(gosi_result.audit_step);
        step_number += 1;
    }

    let calculation = calculate_compensation_adjustment(&input, step_number)?;
    audit_steps.extend(calculation.audit_steps);

    Ok(CompensationCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        employee_id: request.employee_id.clone(),
        adjustment: calculation.result,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings: calculation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Performs a bulk salary update.
fn perform_batch_calculation(
    request: &BatchRequest,
    config: &ConfigLoader,
) -> EngineResult<BatchCalculationResult> {
    let start_time = Instant::now();

    let input = request.to_input(config)?;
    let calculation = calculate_batch_adjustment(&input, 1)?;

    Ok(BatchCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        employees: calculation.employees,
        totals: calculation.totals,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post(uri: &str, body: String) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_trip_valid_request_returns_200() {
        let body = r#"{
            "employee_id": "emp_001",
            "destination_code": "riyadh",
            "start_date": "2026-03-01",
            "end_date": "2026-03-04",
            "travel_mode": "car"
        }"#;

        let response = post("/trips/per-diem", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: TripCalculationResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.employee_id, "emp_001");
        assert_eq!(result.destination_code.as_deref(), Some("riyadh"));
        assert_eq!(result.per_diem.nights, 3);
        assert_eq!(result.per_diem.car_uplift_total, dec("60"));
        assert_eq!(result.per_diem.per_diem_budget, dec("135"));
        assert_eq!(result.per_diem.per_diem_payable, dec("135"));
        assert_eq!(result.audit_trace.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_trip_malformed_json_returns_400() {
        let response = post("/trips/per-diem", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_compensation_with_gosi() {
        let body = r#"{
            "employee_id": "emp_001",
            "base_salary": "10000",
            "update_rule": "fixed_increase",
            "update_value": "0",
            "gosi_registered_base": "10000"
        }"#;

        let response = post("/compensation/adjust", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CompensationCalculationResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.adjustment.total_deductions, dec("975"));
        assert_eq!(result.adjustment.net_pay, dec("9025"));
        assert_eq!(result.adjustment.delta, Decimal::ZERO);

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(rule_ids, vec!["gosi_deduction", "salary_update_rule", "net_pay"]);
        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_batch_unknown_template_returns_400() {
        let body = r#"{
            "update_rule": "percentage_increase",
            "update_value": "5",
            "employees": [
                {
                    "employee_id": "emp_001",
                    "base_salary": "1000",
                    "allowances": [ { "template": "hazard_pay" } ]
                }
            ]
        }"#;

        let response = post("/compensation/batch", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "TEMPLATE_NOT_FOUND");
    }
}
