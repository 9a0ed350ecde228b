use chrono::Datelike;
use serde::{Deserialize, Serialize};
use skyfare_core::{canonical_location, Flight};
use tracing::debug;
use crate::timestamp::local_date_time;
use crate::trip_type::{matches, TripTypeMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

impl Route {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: canonical_location(from),
            to: canonical_location(to),
        }
    }
}

/// "Least by month": cheapest fares on a route over a calendar month.
///
/// Day-level price and time-of-day filters do not apply here; only the
/// trip-type toggle does.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Flights on `route` departing in `month` (1-12), cheapest first.
    /// Equal prices keep their input order. `limit` truncates to the top K.
    pub fn cheapest_by_month(
        &self,
        flights: &[Flight],
        route: &Route,
        month: u32,
        mode: TripTypeMode,
        limit: Option<usize>,
    ) -> Vec<Flight> {
        let mut ranked: Vec<&Flight> = flights
            .iter()
            .filter(|flight| {
                if !flight.is_well_formed() {
                    debug!(airline = %flight.airline, "Skipping malformed flight in monthly ranking");
                    return false;
                }
                flight.serves(&route.from, &route.to)
                    && departs_in_month(flight, month)
                    && matches(flight, mode)
            })
            .collect();

        // sort_by is stable, so ties stay in input order
        ranked.sort_by(|a, b| a.price.total_cmp(&b.price));

        if let Some(limit) = limit {
            ranked.truncate(limit);
        }

        ranked.into_iter().cloned().collect()
    }
}

fn departs_in_month(flight: &Flight, month: u32) -> bool {
    match local_date_time(&flight.departure) {
        Some(departure) => departure.month() == month,
        None => {
            debug!(departure = %flight.departure, "Unreadable departure in monthly ranking");
            false
        }
    }
}
