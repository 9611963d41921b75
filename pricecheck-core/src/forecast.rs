//! Forecast projection
//!
//! Compares the predicted price for next year with the current average of
//! the retailer prices. When the average is zero the percentage change is
//! undefined and serializes as the `"not applicable"` sentinel.

use serde::{Serialize, Serializer};

/// Sentinel emitted in place of a percentage when the average price is zero
pub const NOT_APPLICABLE: &str = "not applicable";

/// Percentage change, or the sentinel when it cannot be computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangePct {
    Percent(f64),
    NotApplicable,
}

impl Serialize for ChangePct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Percent(pct) => serializer.serialize_f64(*pct),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub predicted_price: f64,
    pub change_abs: f64,
    pub change_pct: ChangePct,
}

impl Forecast {
    /// Build the forecast for `predicted` against the current average.
    ///
    /// All numbers are rounded to two decimals.
    pub fn project(predicted: f64, avg_actual: f64) -> Self {
        if avg_actual > 0.0 {
            let change_abs = predicted - avg_actual;
            let change_pct = change_abs / avg_actual * 100.0;
            Self {
                predicted_price: round2(predicted),
                change_abs: round2(change_abs),
                change_pct: ChangePct::Percent(round2(change_pct)),
            }
        } else {
            Self {
                predicted_price: round2(predicted),
                change_abs: round2(predicted),
                change_pct: ChangePct::NotApplicable,
            }
        }
    }
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, breaking exact ties to even, so `10.125`
/// becomes `10.12` while `10.126` becomes `10.13`. Scaling by 100 first would
/// introduce its own rounding error.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
