use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use skyfare_search::FilterStats;
use crate::error::AppError;
use crate::state::AppState;

/// Search counters exposed at `/metrics`.
pub struct SearchMetrics {
    registry: Registry,
    searches: IntCounterVec,
    stale_responses: IntCounter,
    malformed_flights: IntCounter,
}

impl SearchMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let searches = IntCounterVec::new(
            Opts::new("skyfare_searches_total", "Lookups issued, by search mode"),
            &["mode"],
        )?;
        let stale_responses = IntCounter::new(
            "skyfare_stale_responses_total",
            "Lookup responses dropped because a newer search was issued",
        )?;
        let malformed_flights = IntCounter::new(
            "skyfare_malformed_flights_total",
            "Flight records excluded for an inconsistent return leg",
        )?;

        registry.register(Box::new(searches.clone()))?;
        registry.register(Box::new(stale_responses.clone()))?;
        registry.register(Box::new(malformed_flights.clone()))?;

        Ok(Self {
            registry,
            searches,
            stale_responses,
            malformed_flights,
        })
    }

    pub fn record_search(&self, mode: &str) {
        self.searches.with_label_values(&[mode]).inc();
    }

    pub fn record_stale(&self) {
        self.stale_responses.inc();
    }

    pub fn record_stats(&self, stats: &FilterStats) {
        self.malformed_flights.inc_by(stats.malformed as u64);
    }

    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics))
}

async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
