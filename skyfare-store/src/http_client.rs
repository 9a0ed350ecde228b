use std::time::Duration;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use skyfare_core::booking::BookingSubmission;
use skyfare_core::repository::{BookingGateway, FlightLookup, LocationDirectory};
use skyfare_core::search::{FlightSearchRequest, MonthlySearchRequest};
use skyfare_core::{CoreError, CoreResult, Flight, Location};
use tracing::{info, warn};
use crate::app_config::LookupConfig;

/// HTTP client for the flight/location/booking backend.
///
/// No retries here: a failed call is reported once as a lookup failure.
#[derive(Clone)]
pub struct HttpBackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(config: &LookupConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CoreError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(&self, url: &str, response: reqwest::Response) -> CoreResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "Backend returned an error status");
            return Err(CoreError::lookup(format!("{} returned {}: {}", url, status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CoreError::lookup(format!("Malformed response from {}: {}", url, e)))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> CoreResult<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CoreError::lookup(format!("POST {} failed: {}", url, e)))?;
        self.read_json(&url, response).await
    }
}

#[async_trait]
impl FlightLookup for HttpBackendClient {
    async fn search_flights(&self, request: &FlightSearchRequest) -> CoreResult<Vec<Flight>> {
        let flights: Vec<Flight> = self.post_json("users", request).await?;
        info!(
            from = %request.from_location,
            to = %request.to_location,
            count = flights.len(),
            "Flight lookup returned"
        );
        Ok(flights)
    }

    async fn search_month(&self, request: &MonthlySearchRequest) -> CoreResult<Vec<Flight>> {
        let flights: Vec<Flight> = self.post_json("users/month", request).await?;
        info!(
            from = %request.from_location,
            to = %request.to_location,
            month = request.month,
            count = flights.len(),
            "Monthly lookup returned"
        );
        Ok(flights)
    }
}

#[async_trait]
impl LocationDirectory for HttpBackendClient {
    async fn list_locations(&self) -> CoreResult<Vec<Location>> {
        let url = self.endpoint("users/locations");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::lookup(format!("GET {} failed: {}", url, e)))?;
        self.read_json(&url, response).await
    }
}

#[async_trait]
impl BookingGateway for HttpBackendClient {
    async fn submit_booking(&self, booking: &BookingSubmission) -> CoreResult<()> {
        let url = self.endpoint("users/book");
        let response = self
            .client
            .post(&url)
            .json(booking)
            .send()
            .await
            .map_err(|e| CoreError::lookup(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Booking was not confirmed");
            return Err(CoreError::lookup(format!("booking rejected with status {}", status)));
        }
        info!(airline = %booking.flight.airline, passengers = booking.passengers.len(), "Booking confirmed");
        Ok(())
    }

    async fn list_bookings(&self, phone_number: &str) -> CoreResult<Vec<BookingSubmission>> {
        let url = self.endpoint("users/bookings");
        let response = self
            .client
            .get(&url)
            .query(&[("phoneNumber", phone_number)])
            .send()
            .await
            .map_err(|e| CoreError::lookup(format!("GET {} failed: {}", url, e)))?;
        self.read_json(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use axum::{
        extract::State,
        http::{header, Method, StatusCode, Uri},
        response::{IntoResponse, Response},
        Json, Router,
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use skyfare_core::booking::Passenger;
    use skyfare_core::{FlightClass, TripType};

    fn client(base_url: &str) -> HttpBackendClient {
        HttpBackendClient::new(&LookupConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 1,
        })
        .expect("client should build")
    }

    #[derive(Debug, Clone)]
    struct SeenRequest {
        method: String,
        path: String,
        query: Option<String>,
        body: String,
    }

    type Seen = Arc<Mutex<Vec<SeenRequest>>>;

    fn flight_json() -> Value {
        json!({
            "airline": "Test Air",
            "from": "nyc",
            "to": "lon",
            "departure": "2024-06-01T19:30:00",
            "arrival": "2024-06-02T07:30:00",
            "price": 250,
            "flightClass": "Economy",
            "tripType": "one-way",
            "seatCount": 80
        })
    }

    async fn backend_stub(State(seen): State<Seen>, method: Method, uri: Uri, body: String) -> Response {
        seen.lock().unwrap().push(SeenRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            body,
        });

        match uri.path() {
            "/users" => Json(json!([flight_json()])).into_response(),
            "/users/month" => (StatusCode::INTERNAL_SERVER_ERROR, "database offline").into_response(),
            "/users/locations" => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                "not json",
            )
                .into_response(),
            "/users/book" => (StatusCode::SERVICE_UNAVAILABLE, "no seats").into_response(),
            "/users/bookings" => Json(json!([])).into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    /// Backend stub on an ephemeral port. Returns its base URL and the
    /// requests it has received.
    async fn spawn_backend() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let router = Router::new().fallback(backend_stub).with_state(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{}", addr), seen)
    }

    fn last_request(seen: &Seen) -> SeenRequest {
        seen.lock().unwrap().last().cloned().expect("backend should have been called")
    }

    #[test]
    fn test_endpoint_joining() {
        let c = client("http://localhost:3005/");
        assert_eq!(c.endpoint("users/month"), "http://localhost:3005/users/month");
        assert_eq!(c.endpoint("/users"), "http://localhost:3005/users");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_lookup_failure() {
        // Port 9 (discard) on localhost is expected to refuse the connection.
        let c = client("http://127.0.0.1:9");
        let result = c.list_locations().await;
        assert!(matches!(result, Err(CoreError::LookupFailure(_))));
    }

    #[tokio::test]
    async fn test_search_flights_posts_camel_case_query() {
        let (base_url, seen) = spawn_backend().await;
        let request = FlightSearchRequest {
            trip_type: TripType::OneWay,
            from_location: "nyc".to_string(),
            to_location: "lon".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            return_date: None,
            flight_class: FlightClass::Economy,
        };

        let flights = client(&base_url).search_flights(&request).await.unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].price, 250.0);

        let sent = last_request(&seen);
        assert_eq!(sent.method, "POST");
        assert_eq!(sent.path, "/users");
        let body: Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(
            body,
            json!({
                "tripType": "one-way",
                "fromLocation": "nyc",
                "toLocation": "lon",
                "departureDate": "2024-06-01",
                "returnDate": null,
                "flightClass": "Economy"
            })
        );
    }

    #[tokio::test]
    async fn test_error_status_is_lookup_failure() {
        let (base_url, seen) = spawn_backend().await;
        let request = MonthlySearchRequest {
            from_location: "nyc".to_string(),
            to_location: "lon".to_string(),
            month: 7,
        };

        let result = client(&base_url).search_month(&request).await;
        match result {
            Err(CoreError::LookupFailure(msg)) => assert!(msg.contains("500"), "{msg}"),
            other => panic!("expected lookup failure, got {:?}", other),
        }

        let sent = last_request(&seen);
        assert_eq!(sent.path, "/users/month");
        let body: Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(body, json!({ "fromLocation": "nyc", "toLocation": "lon", "month": 7 }));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_lookup_failure() {
        let (base_url, seen) = spawn_backend().await;
        let result = client(&base_url).list_locations().await;
        assert!(matches!(result, Err(CoreError::LookupFailure(_))));
        assert_eq!(last_request(&seen).method, "GET");
    }

    #[tokio::test]
    async fn test_rejected_booking_is_lookup_failure() {
        let (base_url, seen) = spawn_backend().await;
        let booking = BookingSubmission {
            flight: serde_json::from_value(flight_json()).unwrap(),
            phone_number: "5551234567".to_string(),
            passengers: vec![Passenger {
                name: "Ada".to_string(),
                age: Some(36),
                email: "ada@example.com".to_string(),
            }],
        };

        let result = client(&base_url).submit_booking(&booking).await;
        assert!(matches!(result, Err(CoreError::LookupFailure(_))));

        let sent = last_request(&seen);
        assert_eq!(sent.path, "/users/book");
        let body: Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(body["phoneNumber"], "5551234567");
        assert_eq!(body["passengers"][0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_list_bookings_sends_phone_number_query() {
        let (base_url, seen) = spawn_backend().await;
        let bookings = client(&base_url).list_bookings("5551234567").await.unwrap();
        assert!(bookings.is_empty());

        let sent = last_request(&seen);
        assert_eq!(sent.path, "/users/bookings");
        assert_eq!(sent.query.as_deref(), Some("phoneNumber=5551234567"));
    }
}
