//! Business trip models.
//!
//! This module defines the inputs and outputs of the per-diem calculation
//! for a business trip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the employee travels to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Travel by plane. No car uplift applies.
    Plane,
    /// Travel by car. A per-night uplift is added to the budget.
    Car,
}

impl TravelMode {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Plane => "plane",
            TravelMode::Car => "car",
        }
    }
}

/// The inputs to a per-diem calculation.
///
/// Rates are optional because the trip form may not have resolved them yet.
/// An unset rate is treated as zero by the calculator.
///
/// # Example
///
/// ```
/// use hr_engine::models::{TravelMode, TripPerDiemInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TripPerDiemInput {
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     per_night_rate: Some(Decimal::new(25000, 3)),
///     travel_mode: TravelMode::Car,
///     corporate_card_used: false,
///     car_uplift_per_night: Some(Decimal::from(20)),
/// };
/// assert_eq!(input.rate_or_zero(), Decimal::new(25, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPerDiemInput {
    /// The first day of the trip.
    pub start_date: NaiveDate,
    /// The last day of the trip.
    pub end_date: NaiveDate,
    /// The per-night allowance rate.
    #[serde(default)]
    pub per_night_rate: Option<Decimal>,
    /// How the employee travels.
    pub travel_mode: TravelMode,
    /// Whether the employee pays expenses with a corporate card.
    #[serde(default)]
    pub corporate_card_used: bool,
    /// The extra per-night amount paid when travelling by car.
    #[serde(default)]
    pub car_uplift_per_night: Option<Decimal>,
}

impl TripPerDiemInput {
    /// Returns the per-night rate, substituting zero when unset.
    pub fn rate_or_zero(&self) -> Decimal {
        self.per_night_rate.unwrap_or(Decimal::ZERO)
    }

    /// Returns the car uplift rate, substituting zero when unset.
    pub fn uplift_or_zero(&self) -> Decimal {
        self.car_uplift_per_night.unwrap_or(Decimal::ZERO)
    }
}

/// The derived per-diem figures for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPerDiemResult {
    /// Whole nights away.
    pub nights: u32,
    /// The per-diem budget including any car uplift.
    pub per_diem_budget: Decimal,
    /// The car uplift portion of the budget.
    pub car_uplift_total: Decimal,
    /// The amount paid out in cash. Zero for corporate card holders.
    pub per_diem_payable: Decimal,
}
