//! Per-diem calculation for business trips.
//!
//! This module counts the nights away on a trip and derives the per-diem
//! budget, car uplift and cash payable from the trip's rates.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::checked;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, TravelMode, TripPerDiemInput, TripPerDiemResult};

/// Policy reference recorded on per-diem audit steps.
pub const PER_DIEM_POLICY_REF: &str = "travel.per_diem";

/// The monetary figures derived for a number of nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerDiemAmounts {
    /// The per-diem budget including any car uplift.
    pub budget: Decimal,
    /// The amount paid out in cash.
    pub payable: Decimal,
    /// The car uplift portion of the budget.
    pub uplift_total: Decimal,
}

/// The result of a full per-diem calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct TripPerDiemCalculation {
    /// The derived per-diem figures.
    pub result: TripPerDiemResult,
    /// The audit steps recording the calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Counts the whole nights between two dates.
///
/// Spans of zero or fewer days return 0 rather than an error.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::compute_nights;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
///
/// assert_eq!(compute_nights(start, end), 3);
/// assert_eq!(compute_nights(end, start), 0);
/// ```
pub fn compute_nights(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = end.signed_duration_since(start).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Derives the per-diem budget, uplift and payable amount.
///
/// The car uplift applies only to car travel. Corporate card holders are
/// paid nothing in cash but the budget is still reported. Negative rates
/// are not rejected.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// when an amount exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::compute_per_diem;
/// use hr_engine::models::TravelMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amounts = compute_per_diem(
///     3,
///     Decimal::from_str("25.000").unwrap(),
///     TravelMode::Car,
///     false,
///     Decimal::from(20),
/// )
/// .unwrap();
///
/// assert_eq!(amounts.uplift_total, Decimal::from(60));
/// assert_eq!(amounts.budget, Decimal::from(135));
/// assert_eq!(amounts.payable, Decimal::from(135));
/// ```
pub fn compute_per_diem(
    nights: u32,
    rate: Decimal,
    mode: TravelMode,
    card_used: bool,
    uplift_rate: Decimal,
) -> EngineResult<PerDiemAmounts> {
    let nights = Decimal::from(nights);
    let uplift_total = match mode {
        TravelMode::Car => checked::mul(nights, uplift_rate)?,
        TravelMode::Plane => Decimal::ZERO,
    };
    let budget = checked::add(checked::mul(nights, rate)?, uplift_total)?;
    let payable = if card_used { Decimal::ZERO } else { budget };

    Ok(PerDiemAmounts {
        budget,
        payable,
        uplift_total,
    })
}

/// Calculates the per-diem figures for a trip, recording each decision.
///
/// Produces one audit step for the night count and one for the amounts.
/// Unset rates are treated as zero and raise a `RATE_DEFAULTED` warning.
///
/// # Arguments
///
/// * `input` - The trip dates, rates and travel details
/// * `step_number` - The step number for the first audit step
///
/// # Errors
///
/// Fails with `CalculationError` when the rates are too large to multiply out.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_trip_per_diem;
/// use hr_engine::models::{TravelMode, TripPerDiemInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TripPerDiemInput {
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     per_night_rate: Some(Decimal::from(25)),
///     travel_mode: TravelMode::Plane,
///     corporate_card_used: true,
///     car_uplift_per_night: Some(Decimal::from(20)),
/// };
///
/// let calculation = calculate_trip_per_diem(&input, 1).unwrap();
/// assert_eq!(calculation.result.nights, 3);
/// assert_eq!(calculation.result.per_diem_budget, Decimal::from(75));
/// assert_eq!(calculation.result.per_diem_payable, Decimal::ZERO);
/// ```
pub fn calculate_trip_per_diem(
    input: &TripPerDiemInput,
    step_number: u32,
) -> EngineResult<TripPerDiemCalculation> {
    let mut warnings = Vec::new();

    let nights = compute_nights(input.start_date, input.end_date);
    if input.end_date < input.start_date {
        warnings.push(AuditWarning::new(
            "REVERSED_DATES",
            format!(
                "Trip ends ({}) before it starts ({}); nights counted as 0",
                input.end_date, input.start_date
            ),
            "high",
        ));
    }

    let nights_step = AuditStep {
        step_number,
        rule_id: "trip_nights".to_string(),
        rule_name: "Trip Nights".to_string(),
        policy_ref: "travel.nights".to_string(),
        input: serde_json::json!({
            "start_date": input.start_date.to_string(),
            "end_date": input.end_date.to_string()
        }),
        output: serde_json::json!({ "nights": nights }),
        reasoning: format!(
            "{} to {} = {} night(s)",
            input.start_date, input.end_date, nights
        ),
    };

    if input.per_night_rate.is_none() {
        warnings.push(AuditWarning::new(
            "RATE_DEFAULTED",
            "Per-night rate not set; using 0",
            "medium",
        ));
    }
    if input.travel_mode == TravelMode::Car && input.car_uplift_per_night.is_none() {
        warnings.push(AuditWarning::new(
            "RATE_DEFAULTED",
            "Car uplift rate not set; using 0",
            "low",
        ));
    }

    let rate = input.rate_or_zero();
    let uplift_rate = input.uplift_or_zero();
    let amounts = compute_per_diem(
        nights,
        rate,
        input.travel_mode,
        input.corporate_card_used,
        uplift_rate,
    )?;

    if input.corporate_card_used && amounts.budget > Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "CORPORATE_CARD",
            format!(
                "Corporate card used; per diem of ${} is not paid in cash",
                amounts.budget.normalize()
            ),
            "low",
        ));
    }

    let nightly_total = checked::mul(Decimal::from(nights), rate)?;
    let mut reasoning = format!(
        "{} night(s) × ${} = ${}",
        nights,
        rate.normalize(),
        nightly_total.normalize()
    );
    if input.travel_mode == TravelMode::Car {
        reasoning.push_str(&format!(
            " + car uplift {} × ${} = ${}",
            nights,
            uplift_rate.normalize(),
            amounts.uplift_total.normalize()
        ));
    }
    reasoning.push_str(&format!("; budget ${}", amounts.budget.normalize()));
    if input.corporate_card_used {
        reasoning.push_str(", payable $0 (corporate card)");
    }

    let amounts_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "per_diem".to_string(),
        rule_name: "Per Diem".to_string(),
        policy_ref: PER_DIEM_POLICY_REF.to_string(),
        input: serde_json::json!({
            "nights": nights,
            "per_night_rate": rate.normalize().to_string(),
            "travel_mode": input.travel_mode.as_str(),
            "corporate_card_used": input.corporate_card_used,
            "car_uplift_per_night": uplift_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "per_diem_budget": amounts.budget.normalize().to_string(),
            "car_uplift_total": amounts.uplift_total.normalize().to_string(),
            "per_diem_payable": amounts.payable.normalize().to_string()
        }),
        reasoning,
    };

    Ok(TripPerDiemCalculation {
        result: TripPerDiemResult {
            nights,
            per_diem_budget: amounts.budget,
            car_uplift_total: amounts.uplift_total,
            per_diem_payable: amounts.payable,
        },
        audit_steps: vec![nights_step, amounts_step],
        warnings,
    })
}
