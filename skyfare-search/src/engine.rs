//! Result filtering shared by the one-way, round-trip and "show all" views.

use serde::Serialize;
use skyfare_core::Flight;
use tracing::debug;
use crate::criteria::FilterCriteria;
use crate::price::in_range;
use crate::time_bucket::classify;
use crate::trip_type::matches;

/// First check a flight failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Malformed,
    TripType,
    Price,
    DepartureTime,
    ReturnTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub examined: usize,
    pub accepted: usize,
    pub malformed: usize,
    pub trip_type: usize,
    pub price: usize,
    pub departure_time: usize,
    pub return_time: usize,
}

impl FilterStats {
    fn record(&mut self, verdict: Verdict) {
        self.examined += 1;
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::Rejected(RejectReason::Malformed) => self.malformed += 1,
            Verdict::Rejected(RejectReason::TripType) => self.trip_type += 1,
            Verdict::Rejected(RejectReason::Price) => self.price += 1,
            Verdict::Rejected(RejectReason::DepartureTime) => self.departure_time += 1,
            Verdict::Rejected(RejectReason::ReturnTime) => self.return_time += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub flights: Vec<Flight>,
    pub stats: FilterStats,
}

/// Pure predicate pass over a candidate list. Never reorders, never fails:
/// no match is a normal, empty outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlightFilterEngine;

impl FlightFilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, flight: &Flight, criteria: &FilterCriteria) -> Verdict {
        if !flight.is_well_formed() {
            debug!(
                airline = %flight.airline,
                trip_type = %flight.trip_type,
                "Excluding flight with inconsistent return leg"
            );
            return Verdict::Rejected(RejectReason::Malformed);
        }

        if !matches(flight, criteria.trip_type_mode) {
            return Verdict::Rejected(RejectReason::TripType);
        }

        if !in_range(flight, &criteria.price_range) {
            return Verdict::Rejected(RejectReason::Price);
        }

        let departure_bucket = classify(&flight.departure);
        if !criteria.departure_time_buckets.is_empty()
            && !criteria.departure_time_buckets.contains(&departure_bucket)
        {
            return Verdict::Rejected(RejectReason::DepartureTime);
        }

        if flight.is_round_trip() && !criteria.return_time_buckets.is_empty() {
            let return_bucket = classify(flight.return_departure.as_deref().unwrap_or_default());
            if !criteria.return_time_buckets.contains(&return_bucket) {
                return Verdict::Rejected(RejectReason::ReturnTime);
            }
        }

        Verdict::Accepted
    }

    pub fn accepts(&self, flight: &Flight, criteria: &FilterCriteria) -> bool {
        self.evaluate(flight, criteria) == Verdict::Accepted
    }

    pub fn filter(&self, flights: &[Flight], criteria: &FilterCriteria) -> Vec<Flight> {
        flights
            .iter()
            .filter(|flight| self.accepts(flight, criteria))
            .cloned()
            .collect()
    }

    pub fn filter_with_report(&self, flights: &[Flight], criteria: &FilterCriteria) -> FilterReport {
        let mut stats = FilterStats::default();

        let flights: Vec<Flight> = flights
            .iter()
            .filter(|flight| {
                let verdict = self.evaluate(flight, criteria);
                stats.record(verdict);
                verdict == Verdict::Accepted
            })
            .cloned()
            .collect();

        FilterReport { flights, stats }
    }
}
