use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::flight::{FlightClass, TripType};

/// What the traveler picked on the search form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSelection {
    pub trip_type: TripType,
    pub from: String,
    pub to: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub flight_class: FlightClass,
}

/// Month as the form sends it: either a 1-based index or a `YYYY-MM` label.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MonthInput {
    Index(u32),
    Label(String),
}

/// Selection for the "least by month" mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSelection {
    pub from: String,
    pub to: String,
    pub month: MonthInput,
}

/// Query sent to the flight lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub trip_type: TripType,
    pub from_location: String,
    pub to_location: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub flight_class: FlightClass,
}

/// Query sent to the monthly lookup service. `month` is 1..=12.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySearchRequest {
    pub from_location: String,
    pub to_location: String,
    pub month: u32,
}
