use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skyfare_core::booking::BookingSubmission;
use tracing::info;
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsQuery {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub status: &'static str,
    pub passengers: usize,
    pub total_price: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/bookings", post(create_booking).get(list_bookings))
}

fn validate_phone(phone_number: &str) -> Result<(), AppError> {
    if phone_number.len() == 10 && phone_number.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "Phone number must be exactly 10 digits".to_string(),
        ))
    }
}

pub fn validate_booking(booking: &BookingSubmission) -> Result<(), AppError> {
    validate_phone(&booking.phone_number)?;

    if booking.passengers.is_empty() {
        return Err(AppError::ValidationError(
            "At least one passenger is required".to_string(),
        ));
    }

    for (index, passenger) in booking.passengers.iter().enumerate() {
        if passenger.name.trim().is_empty()
            || passenger.email.trim().is_empty()
            || passenger.age.is_none()
        {
            return Err(AppError::ValidationError(format!(
                "Passenger {} needs a name, age and email",
                index + 1
            )));
        }
    }

    Ok(())
}

async fn create_booking(
    State(state): State<AppState>,
    AppJson(booking): AppJson<BookingSubmission>,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    validate_booking(&booking)?;
    state.bookings.submit_booking(&booking).await?;

    info!(
        airline = %booking.flight.airline,
        passengers = booking.passengers.len(),
        "Booking submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingConfirmation {
            status: "confirmed",
            passengers: booking.passengers.len(),
            total_price: booking.total_price(),
        }),
    ))
}

async fn list_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookingsQuery>,
) -> Result<Json<Vec<BookingSubmission>>, AppError> {
    validate_phone(&query.phone_number)?;
    let bookings = state.bookings.list_bookings(&query.phone_number).await?;
    Ok(Json(bookings))
}
