//! Performance benchmarks for the HR engine.
//!
//! Measures the calculators directly and through the HTTP router:
//! - Single trip per-diem calculation
//! - Single compensation adjustment
//! - Batches of 10, 100 and 1000 employees
//! - End-to-end `/compensation/batch` request
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use hr_engine::api::{AppState, BatchRequest, create_router};
use hr_engine::calculation::{
    calculate_batch_adjustment, calculate_compensation_adjustment, calculate_trip_per_diem,
};
use hr_engine::config::ConfigLoader;
use hr_engine::models::{
    BatchAdjustmentInput, CompensationAdjustmentInput, EmployeeCompensation, PayComponent,
    TravelMode, TripPerDiemInput, UpdateRule,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_trip() -> TripPerDiemInput {
    TripPerDiemInput {
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        per_night_rate: Some(Decimal::new(25000, 3)),
        travel_mode: TravelMode::Car,
        corporate_card_used: false,
        car_uplift_per_night: Some(Decimal::from(20)),
    }
}

fn create_employee(i: usize) -> EmployeeCompensation {
    EmployeeCompensation {
        employee_id: format!("emp_{:04}", i),
        base_salary: Decimal::from(3000 + (i as i64 % 50) * 100),
        allowances: vec![
            PayComponent::percentage("Housing", Decimal::from(25)),
            PayComponent::fixed("Transport", Decimal::from(100)),
        ],
        deductions: vec![PayComponent::percentage("Pension", Decimal::from(5))],
    }
}

fn create_batch(size: usize) -> BatchAdjustmentInput {
    BatchAdjustmentInput {
        update_rule: UpdateRule::PercentageIncrease,
        update_value: Decimal::new(75, 1),
        employees: (0..size).map(create_employee).collect(),
    }
}

fn bench_trip_per_diem(c: &mut Criterion) {
    let trip = create_trip();

    c.bench_function("trip_per_diem", |b| {
        b.iter(|| calculate_trip_per_diem(black_box(&trip), 1).unwrap())
    });
}

fn bench_single_adjustment(c: &mut Criterion) {
    let input: CompensationAdjustmentInput =
        create_employee(1).to_adjustment_input(UpdateRule::PercentageIncrease, Decimal::from(10));

    c.bench_function("single_adjustment", |b| {
        b.iter(|| calculate_compensation_adjustment(black_box(&input), 1).unwrap())
    });
}

fn bench_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_adjustment");

    for size in [10usize, 100, 1000] {
        let batch = create_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| calculate_batch_adjustment(black_box(batch), 1).unwrap())
        });
    }

    group.finish();
}

fn bench_batch_endpoint(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::new(config);
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let employees: Vec<serde_json::Value> = (0..100)
        .map(|i| {
            serde_json::json!({
                "employee_id": format!("emp_{:04}", i),
                "base_salary": (3000 + i * 10).to_string(),
                "allowances": [ { "template": "housing" }, { "template": "transport" } ],
                "deductions": [ { "template": "pension" } ]
            })
        })
        .collect();
    let request: BatchRequest = serde_json::from_value(serde_json::json!({
        "update_rule": "percentage_increase",
        "update_value": "5",
        "employees": employees
    }))
    .unwrap();
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("batch_endpoint_100", |b| {
        b.to_async(&runtime).iter(|| async {
            let router = create_router(state.clone());
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/compensation/batch")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_trip_per_diem,
    bench_single_adjustment,
    bench_batches,
    bench_batch_endpoint
);
criterion_main!(benches);
