use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlightClass {
    #[default]
    Economy,
    Luxury,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "one-way",
            TripType::RoundTrip => "round-trip",
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flight record as returned by the lookup service.
///
/// Timestamps stay in the string form the service sent them in; parsing
/// happens where a component needs an hour or a month out of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub airline: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub return_departure: Option<String>,
    #[serde(default)]
    pub return_arrival: Option<String>,
    pub price: f64,
    pub flight_class: FlightClass,
    pub trip_type: TripType,
    #[serde(default)]
    pub seat_count: u32,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub return_duration: Option<String>,
}

impl Flight {
    /// One-way records carry no return leg; round-trip records carry both
    /// return timestamps. Anything else is a data-quality defect.
    pub fn is_well_formed(&self) -> bool {
        let has_return_departure = is_present(&self.return_departure);
        let has_return_arrival = is_present(&self.return_arrival);

        match self.trip_type {
            TripType::OneWay => !has_return_departure && !has_return_arrival,
            TripType::RoundTrip => has_return_departure && has_return_arrival,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip
    }

    /// Route check, case-insensitive on both ends.
    pub fn serves(&self, from: &str, to: &str) -> bool {
        self.from.trim().eq_ignore_ascii_case(from.trim())
            && self.to.trim().eq_ignore_ascii_case(to.trim())
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn sample_flight(trip_type: TripType) -> Flight {
    let (return_departure, return_arrival) = match trip_type {
        TripType::OneWay => (None, None),
        TripType::RoundTrip => (
            Some("2024-12-30T09:00:00".to_string()),
            Some("2024-12-30T17:00:00".to_string()),
        ),
    };

    Flight {
        id: None,
        airline: "Test Air".to_string(),
        from: "nyc".to_string(),
        to: "lon".to_string(),
        departure: "2024-12-25T23:00:00".to_string(),
        arrival: "2024-12-26T07:00:00".to_string(),
        return_departure,
        return_arrival,
        price: 300.0,
        flight_class: FlightClass::Economy,
        trip_type,
        seat_count: 120,
        duration: Some("8h 0m".to_string()),
        return_duration: None,
    }
}
