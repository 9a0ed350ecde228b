use serde::{Deserialize, Serialize};
use skyfare_core::{CoreError, CoreResult, Flight};

/// Closed price interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Validated constructor.
    pub fn new(min: f64, max: f64) -> CoreResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::validation("price bounds must be finite numbers"));
        }
        if self.min < 0.0 || self.max < 0.0 {
            return Err(CoreError::validation(format!(
                "price bounds must be non-negative, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(CoreError::validation(format!(
                "price range is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

pub fn in_range(flight: &Flight, range: &PriceRange) -> bool {
    range.contains(flight.price)
}
