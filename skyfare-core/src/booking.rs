use serde::{Deserialize, Serialize};
use crate::flight::Flight;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passenger {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub email: String,
}

/// Payload handed to the booking service. The flight is passed through
/// exactly as the traveler picked it from the filtered results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub flight: Flight,
    pub phone_number: String,
    pub passengers: Vec<Passenger>,
}

impl BookingSubmission {
    /// Fare times passenger count, as printed on the invoice.
    pub fn total_price(&self) -> f64 {
        self.flight.price * self.passengers.len() as f64
    }
}
