//! Spray amount value object.
//!
//! Amounts arrive as arbitrary JSON numbers and carry one historical
//! normalization rule: a value whose JSON text ends in the literal suffix
//! `.0` is floored to an integer before fan-out (`10.0` becomes `10`).
//! Every other value, fractional or not, passes through untouched. The rule
//! is a display quirk the mobile clients depend on; it must not be
//! generalized to rounding.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Monetary amount attached to a spray, kept as a raw JSON number so the
/// wire representation (`10.0` vs `10`) survives deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprayAmount(Number);

impl SprayAmount {
    /// Wraps a raw JSON number.
    pub fn new(value: Number) -> Self {
        Self(value)
    }

    /// Creates an amount from an integer value.
    pub fn from_u64(value: u64) -> Self {
        Self(Number::from(value))
    }

    /// Creates an amount from a float value.
    ///
    /// Returns `None` for non-finite values, which JSON cannot represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    /// Returns the underlying JSON number.
    pub fn as_number(&self) -> &Number {
        &self.0
    }

    /// Whether the amount is negative.
    pub fn is_negative(&self) -> bool {
        if let Some(i) = self.0.as_i64() {
            return i < 0;
        }
        self.0.as_f64().map(|f| f < 0.0).unwrap_or(false)
    }

    /// Applies the `.0`-suffix normalization rule.
    ///
    /// If the JSON text of the amount ends with `.0`, the amount is replaced
    /// by its floor as an integer JSON number. Any other value is returned
    /// unchanged.
    pub fn normalized(&self) -> Self {
        if !self.0.to_string().ends_with(".0") {
            return self.clone();
        }
        match self.0.as_f64() {
            Some(f) => Self(Number::from(f.floor() as i64)),
            None => self.clone(),
        }
    }
}

impl Default for SprayAmount {
    fn default() -> Self {
        Self(Number::from(0))
    }
}

impl fmt::Display for SprayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
