pub mod booking;
pub mod flight;
pub mod location;
pub mod repository;
pub mod search;

pub use flight::{Flight, FlightClass, TripType};
pub use location::{canonical_location, Location};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Flight lookup failed: {0}")]
    LookupFailure(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::LookupFailure(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
