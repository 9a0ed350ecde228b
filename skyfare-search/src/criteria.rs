use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use skyfare_core::CoreResult;
use crate::price::PriceRange;
use crate::time_bucket::TimeBucket;
use crate::trip_type::TripTypeMode;

/// Seed values for a fresh set of criteria. Loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterDefaults {
    pub price_range: PriceRange,
}

impl FilterDefaults {
    pub fn new(price_range: PriceRange) -> CoreResult<Self> {
        price_range.validate()?;
        Ok(Self { price_range })
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            price_range: PriceRange { min: 200.0, max: 500.0 },
        }
    }
}

/// Constraints applied to one result set.
///
/// An empty bucket set means "no constraint", not "nothing matches".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub trip_type_mode: TripTypeMode,
    pub price_range: PriceRange,
    #[serde(default)]
    pub departure_time_buckets: BTreeSet<TimeBucket>,
    #[serde(default)]
    pub return_time_buckets: BTreeSet<TimeBucket>,
}

impl FilterCriteria {
    pub fn from_defaults(defaults: &FilterDefaults, mode: TripTypeMode) -> Self {
        Self {
            trip_type_mode: mode,
            price_range: defaults.price_range,
            departure_time_buckets: BTreeSet::new(),
            return_time_buckets: BTreeSet::new(),
        }
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn with_departure_buckets(mut self, buckets: impl IntoIterator<Item = TimeBucket>) -> Self {
        self.departure_time_buckets = buckets.into_iter().collect();
        self
    }

    pub fn with_return_buckets(mut self, buckets: impl IntoIterator<Item = TimeBucket>) -> Self {
        self.return_time_buckets = buckets.into_iter().collect();
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.price_range.validate()
    }

    pub fn has_time_constraints(&self) -> bool {
        !self.departure_time_buckets.is_empty() || !self.return_time_buckets.is_empty()
    }
}

/// Partially specified criteria as a client sends them. Missing pieces are
/// filled from [`FilterDefaults`] and the trip type of the search.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSelection {
    #[serde(default)]
    pub trip_type_mode: Option<TripTypeMode>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub departure_time_buckets: BTreeSet<TimeBucket>,
    #[serde(default)]
    pub return_time_buckets: BTreeSet<TimeBucket>,
}

impl CriteriaSelection {
    pub fn resolve(self, defaults: &FilterDefaults, fallback_mode: TripTypeMode) -> CoreResult<FilterCriteria> {
        let criteria = FilterCriteria {
            trip_type_mode: self.trip_type_mode.unwrap_or(fallback_mode),
            price_range: self.price_range.unwrap_or(defaults.price_range),
            departure_time_buckets: self.departure_time_buckets,
            return_time_buckets: self.return_time_buckets,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}
