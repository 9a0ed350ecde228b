//! State behind one traveler's result page.
//!
//! Lookups can overlap: a second search may be issued before the first one
//! answers. Every lookup is tagged with a ticket and only the response for
//! the most recently issued ticket is kept.

use std::sync::atomic::{AtomicU64, Ordering};
use skyfare_core::{CoreResult, Flight};
use tracing::{debug, info};
use crate::criteria::{FilterCriteria, FilterDefaults};
use crate::engine::{FilterReport, FlightFilterEngine};
use crate::trip_type::TripTypeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket {
    pub sequence: u64,
}

/// Monotonic ticket source.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> SearchTicket {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket { sequence }
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.sequence
    }
}

/// Current result set plus the criteria applied to it.
#[derive(Debug)]
pub struct ResultsView {
    defaults: FilterDefaults,
    engine: FlightFilterEngine,
    sequencer: SearchSequencer,
    flights: Vec<Flight>,
    criteria: FilterCriteria,
}

impl ResultsView {
    pub fn new(defaults: FilterDefaults) -> Self {
        Self {
            criteria: FilterCriteria::from_defaults(&defaults, TripTypeMode::All),
            defaults,
            engine: FlightFilterEngine::new(),
            sequencer: SearchSequencer::new(),
            flights: Vec::new(),
        }
    }

    /// Start a new search. Criteria go back to defaults for `mode`.
    pub fn begin_search(&mut self, mode: TripTypeMode) -> SearchTicket {
        let ticket = self.sequencer.issue();
        self.criteria = FilterCriteria::from_defaults(&self.defaults, mode);
        debug!(sequence = ticket.sequence, ?mode, "Search issued");
        ticket
    }

    /// Store a lookup response. Returns `false` and drops the flights when
    /// a newer search has been issued since `ticket`.
    pub fn apply_response(&mut self, ticket: SearchTicket, flights: Vec<Flight>) -> bool {
        if !self.sequencer.is_latest(ticket) {
            info!(
                sequence = ticket.sequence,
                discarded = flights.len(),
                "Discarding stale search response"
            );
            return false;
        }
        self.flights = flights;
        true
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> CoreResult<()> {
        criteria.validate()?;
        self.criteria = criteria;
        Ok(())
    }

    /// Reset price and time buckets; the trip-type mode stays.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::from_defaults(&self.defaults, self.criteria.trip_type_mode);
    }

    pub fn defaults(&self) -> &FilterDefaults {
        &self.defaults
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn visible(&self) -> Vec<Flight> {
        self.engine.filter(&self.flights, &self.criteria)
    }

    pub fn report(&self) -> FilterReport {
        self.engine.filter_with_report(&self.flights, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{one_way, round_trip};
    use crate::price::PriceRange;
    use crate::time_bucket::TimeBucket;

    #[test]
    fn test_sequencer_is_monotonic() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = ResultsView::new(FilterDefaults::default());
        let first = view.begin_search(TripTypeMode::OneWay);
        let second = view.begin_search(TripTypeMode::OneWay);

        assert!(view.apply_response(second, vec![one_way("2024-12-25T10:00:00", 250.0)]));
        assert!(!view.apply_response(first, vec![one_way("2024-12-25T10:00:00", 300.0), one_way("2024-12-25T11:00:00", 310.0)]));

        assert_eq!(view.flights().len(), 1);
        assert_eq!(view.flights()[0].price, 250.0);
    }

    #[test]
    fn test_new_search_resets_criteria() {
        let mut view = ResultsView::new(FilterDefaults::default());
        view.begin_search(TripTypeMode::OneWay);
        let narrowed = view
            .criteria()
            .clone()
            .with_price_range(PriceRange::new(250.0, 260.0).unwrap())
            .with_departure_buckets([TimeBucket::AfterSixPm]);
        view.set_criteria(narrowed).unwrap();

        view.begin_search(TripTypeMode::RoundTrip);
        assert_eq!(view.criteria().trip_type_mode, TripTypeMode::RoundTrip);
        assert_eq!(view.criteria().price_range, view.defaults().price_range);
        assert!(!view.criteria().has_time_constraints());
    }

    #[test]
    fn test_clear_filters_keeps_mode() {
        let mut view = ResultsView::new(FilterDefaults::default());
        let ticket = view.begin_search(TripTypeMode::RoundTrip);
        view.apply_response(
            ticket,
            vec![
                round_trip("2024-12-25T08:00:00", "2024-12-30T20:00:00", 300.0),
                round_trip("2024-12-25T20:00:00", "2024-12-30T20:00:00", 300.0),
            ],
        );

        let criteria = view.criteria().clone().with_departure_buckets([TimeBucket::SixToNoon]);
        view.set_criteria(criteria).unwrap();
        assert_eq!(view.visible().len(), 1);

        view.clear_filters();
        assert_eq!(view.criteria().trip_type_mode, TripTypeMode::RoundTrip);
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn test_invalid_criteria_leave_view_untouched() {
        let mut view = ResultsView::new(FilterDefaults::default());
        let before = view.criteria().clone();
        let inverted = before.clone().with_price_range(PriceRange { min: 400.0, max: 100.0 });
        assert!(view.set_criteria(inverted).is_err());
        assert_eq!(view.criteria(), &before);
    }
}
