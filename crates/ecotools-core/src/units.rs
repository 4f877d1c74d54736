//! Unit Conversion Functions
//!
//! Conversions used when presenting trip and telemetry figures:
//! - Distance: meters → km, km ↔ miles
//! - Time: seconds → whole minutes
//! - Speed: km/h ↔ mph
//! - Mass: kg ↔ lbs
//! - Display rounding

use serde::{Deserialize, Serialize};

/// Unit system used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsSystem {
    /// Kilometers, km/h, kilograms
    #[default]
    Metric,
    /// Miles, mph, pounds
    Imperial,
}

/// Convert meters to kilometers
pub fn meters_to_km(meters: f64) -> f64 {
    meters / 1000.0
}

/// Convert seconds to minutes, rounded to the nearest whole minute
pub fn seconds_to_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

/// Convert kilometers to miles
pub fn km_to_miles(km: f64) -> f64 {
    km * 0.62137119223733
}

/// Convert km/h to mph
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * 0.62137119223733
}

/// Convert mph to km/h
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph / 0.62137119223733
}

/// Convert kilograms to pounds
pub fn kg_to_lbs(kg: f64) -> f64 {
    kg / 0.45359237
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
