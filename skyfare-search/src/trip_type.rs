use serde::{Deserialize, Serialize};
use skyfare_core::{Flight, TripType};

/// Which trip types a result view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripTypeMode {
    OneWay,
    RoundTrip,
    All,
}

impl From<TripType> for TripTypeMode {
    fn from(trip_type: TripType) -> Self {
        match trip_type {
            TripType::OneWay => TripTypeMode::OneWay,
            TripType::RoundTrip => TripTypeMode::RoundTrip,
        }
    }
}

/// The one trip-type predicate every result view goes through.
pub fn matches(flight: &Flight, mode: TripTypeMode) -> bool {
    match mode {
        TripTypeMode::All => true,
        TripTypeMode::OneWay => flight.trip_type == TripType::OneWay,
        TripTypeMode::RoundTrip => flight.trip_type == TripType::RoundTrip,
    }
}
