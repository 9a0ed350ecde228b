use chrono::{Datelike, NaiveDate};
use skyfare_core::search::{
    FlightSearchRequest, MonthInput, MonthSelection, MonthlySearchRequest, SearchSelection,
};
use skyfare_core::{canonical_location, CoreError, CoreResult, TripType};

/// Turns form selections into lookup queries, rejecting anything the
/// lookup service should never see.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchRequestBuilder;

impl SearchRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, selection: &SearchSelection) -> CoreResult<FlightSearchRequest> {
        let (from_location, to_location) = route(&selection.from, &selection.to)?;

        let return_date = match (selection.trip_type, selection.return_date) {
            (TripType::RoundTrip, None) => {
                return Err(CoreError::validation("return date is required for a round trip"));
            }
            (TripType::RoundTrip, Some(return_date)) if return_date < selection.departure_date => {
                return Err(CoreError::validation(format!(
                    "return date {} is before departure date {}",
                    return_date, selection.departure_date
                )));
            }
            (TripType::RoundTrip, Some(return_date)) => Some(return_date),
            (TripType::OneWay, Some(_)) => {
                return Err(CoreError::validation("a one-way search cannot carry a return date"));
            }
            (TripType::OneWay, None) => None,
        };

        Ok(FlightSearchRequest {
            trip_type: selection.trip_type,
            from_location,
            to_location,
            departure_date: selection.departure_date,
            return_date,
            flight_class: selection.flight_class,
        })
    }

    pub fn build_monthly(&self, selection: &MonthSelection) -> CoreResult<MonthlySearchRequest> {
        let (from_location, to_location) = route(&selection.from, &selection.to)?;
        let month = resolve_month(&selection.month)?;

        Ok(MonthlySearchRequest {
            from_location,
            to_location,
            month,
        })
    }
}

fn route(from: &str, to: &str) -> CoreResult<(String, String)> {
    let from = canonical_location(from);
    let to = canonical_location(to);

    if from.is_empty() || to.is_empty() {
        return Err(CoreError::validation("both from and to locations are required"));
    }
    if from == to {
        return Err(CoreError::validation(format!(
            "from and to must differ, both are '{}'",
            from
        )));
    }
    Ok((from, to))
}

/// Month index 1..=12 from either an index or a `YYYY-MM` label.
pub fn resolve_month(input: &MonthInput) -> CoreResult<u32> {
    let month = match input {
        MonthInput::Index(index) => *index,
        MonthInput::Label(label) => {
            let label = label.trim();
            match label.parse::<u32>() {
                Ok(index) => index,
                Err(_) => NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d")
                    .map(|date| date.month())
                    .map_err(|_| CoreError::validation(format!("'{}' is not a month", label)))?,
            }
        }
    };

    if !(1..=12).contains(&month) {
        return Err(CoreError::validation(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(month)
}
