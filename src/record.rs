//! Input records for the dot-matrix engine.
//!
//! A [`CountRecord`] is one `(category, group, count)` triple as handed over
//! by upstream data loading. Counts stay plain numbers until validation so
//! that malformed values can be rejected with a precise error instead of
//! being silently truncated.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest count that is still an exact integer in `f64`.
pub const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// One `(category, group, count)` input triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRecord {
    /// Color-coded sub-classification (legend entry).
    pub category: String,
    /// Row-band classification (axis label).
    pub group: String,
    /// Number of marker units. Must be a non-negative integer.
    pub count: f64,
}

impl CountRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(category: impl Into<String>, group: impl Into<String>, count: f64) -> Self {
        Self {
            category: category.into(),
            group: group.into(),
            count,
        }
    }

    /// Validate the count and return it as whole marker units.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if the count is NaN, infinite,
    /// negative, fractional or too large to be an exact integer.
    pub fn units(&self) -> Result<u64> {
        let c = self.count;
        let reason = if c.is_nan() {
            "count is NaN".to_string()
        } else if c.is_infinite() {
            format!("count {c} is not finite")
        } else if c < 0.0 {
            format!("count {c} is negative")
        } else if c.fract() != 0.0 {
            format!("count {c} is not an integer")
        } else if c > MAX_EXACT_COUNT {
            format!("count {c} exceeds {MAX_EXACT_COUNT}")
        } else {
            return Ok(c as u64);
        };
        Err(Error::invalid_record(&self.category, &self.group, reason))
    }
}

/// How fractional unit counts are turned into whole markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round up, so any non-zero quantity gets at least one marker.
    #[default]
    Ceil,
    /// Round half away from zero.
    Round,
    /// Round down.
    Floor,
}

impl Rounding {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Ceil => value.ceil(),
            Self::Round => value.round(),
            Self::Floor => value.floor(),
        }
    }
}

/// Pre-scale raw quantities into marker units.
///
/// Each count is divided by `per_unit` and rounded. Non-finite or negative
/// counts are passed through untouched so the engine still rejects them.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `per_unit` is not finite and positive.
pub fn to_units(records: &[CountRecord], per_unit: f64, rounding: Rounding) -> Result<Vec<CountRecord>> {
    if !per_unit.is_finite() || per_unit <= 0.0 {
        return Err(Error::invalid_config(
            "per_unit",
            format!("{per_unit} must be finite and > 0"),
        ));
    }

    Ok(records
        .iter()
        .map(|r| {
            let count = if r.count.is_finite() && r.count >= 0.0 {
                rounding.apply(r.count / per_unit)
            } else {
                r.count
            };
            CountRecord::new(r.category.clone(), r.group.clone(), count)
        })
        .collect())
}
