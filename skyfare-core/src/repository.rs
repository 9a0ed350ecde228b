use async_trait::async_trait;
use crate::booking::BookingSubmission;
use crate::flight::Flight;
use crate::location::Location;
use crate::search::{FlightSearchRequest, MonthlySearchRequest};
use crate::CoreResult;

/// Flight lookup service. Failures surface as `CoreError::LookupFailure`.
#[async_trait]
pub trait FlightLookup: Send + Sync {
    async fn search_flights(&self, request: &FlightSearchRequest) -> CoreResult<Vec<Flight>>;

    /// Flights on a route, already scoped by the service to one month.
    async fn search_month(&self, request: &MonthlySearchRequest) -> CoreResult<Vec<Flight>>;
}

/// Source of the from/to choices.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn list_locations(&self) -> CoreResult<Vec<Location>>;
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit_booking(&self, booking: &BookingSubmission) -> CoreResult<()>;

    async fn list_bookings(&self, phone_number: &str) -> CoreResult<Vec<BookingSubmission>>;
}
