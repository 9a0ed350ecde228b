//! Per-traveler result views.
//!
//! A session keeps the last applied lookup response plus the active
//! criteria, so criteria can be changed without hitting the lookup
//! service again. Lookups run without holding the session lock; a response
//! that arrives after a newer search was issued is dropped. A view left
//! idle past `sessions.idle_seconds` is evicted.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use serde::Serialize;
use skyfare_core::search::SearchSelection;
use skyfare_core::Flight;
use skyfare_search::{CriteriaSelection, FilterCriteria, FilterStats, ResultsView, SearchRequestBuilder};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::session_store::SessionStore;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub criteria: FilterCriteria,
    pub total: usize,
    pub flights: Vec<Flight>,
    pub stats: FilterStats,
}

impl ResultsResponse {
    fn from_view(view: &ResultsView) -> Self {
        let report = view.report();
        Self {
            criteria: view.criteria().clone(),
            total: view.flights().len(),
            flights: report.flights,
            stats: report.stats,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSearchResponse {
    pub sequence: u64,
    pub applied: bool,
    pub results: ResultsResponse,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", axum::routing::delete(close_session))
        .route("/v1/sessions/{id}/search", post(search))
        .route("/v1/sessions/{id}/criteria", put(set_criteria).delete(clear_criteria))
        .route("/v1/sessions/{id}/results", get(results))
}

/// Periodically drop views nobody has touched within the idle window.
pub fn spawn_idle_sweep(sessions: Arc<RwLock<SessionStore>>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = sessions.write().await.cleanup_idle(Instant::now());
            if evicted > 0 {
                info!(evicted, "Idle sessions evicted");
            }
        }
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFoundError(format!("Session {} not found", id))
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let id = Uuid::new_v4();
    let view = ResultsView::new(state.settings.filters);
    let criteria = view.criteria().clone();

    let mut sessions = state.sessions.write().await;
    let now = Instant::now();
    let evicted = sessions.cleanup_idle(now);
    if evicted > 0 {
        debug!(evicted, "Idle sessions evicted");
    }
    sessions.insert(id, view, now);
    debug!(%id, "Session created");
    (StatusCode::CREATED, Json(SessionResponse { id, criteria }))
}

async fn close_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.sessions.write().await.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(not_found(id)),
    }
}

async fn search(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(selection): AppJson<SearchSelection>,
) -> Result<Json<SessionSearchResponse>, AppError> {
    let request = SearchRequestBuilder::new().build(&selection)?;

    let ticket = {
        let mut sessions = state.sessions.write().await;
        let view = sessions.touch(&id, Instant::now()).ok_or_else(|| not_found(id))?;
        view.begin_search(request.trip_type.into())
    };

    state.metrics.record_search("session");
    let flights = state.lookup.search_flights(&request).await?;

    let mut sessions = state.sessions.write().await;
    // The session may have been closed or evicted while the lookup was in flight.
    let view = sessions.touch(&id, Instant::now()).ok_or_else(|| not_found(id))?;
    let applied = view.apply_response(ticket, flights);
    let results = ResultsResponse::from_view(view);
    if applied {
        state.metrics.record_stats(&results.stats);
    } else {
        state.metrics.record_stale();
    }

    info!(%id, sequence = ticket.sequence, applied, visible = results.flights.len(), "Session search completed");

    Ok(Json(SessionSearchResponse {
        sequence: ticket.sequence,
        applied,
        results,
    }))
}

async fn set_criteria(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(selection): AppJson<CriteriaSelection>,
) -> Result<Json<ResultsResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let view = sessions.touch(&id, Instant::now()).ok_or_else(|| not_found(id))?;
    let current_mode = view.criteria().trip_type_mode;
    let criteria = selection.resolve(view.defaults(), current_mode)?;
    view.set_criteria(criteria)?;
    Ok(Json(ResultsResponse::from_view(view)))
}

async fn clear_criteria(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ResultsResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let view = sessions.touch(&id, Instant::now()).ok_or_else(|| not_found(id))?;
    view.clear_filters();
    Ok(Json(ResultsResponse::from_view(view)))
}

async fn results(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ResultsResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let view = sessions.touch(&id, Instant::now()).ok_or_else(|| not_found(id))?;
    Ok(Json(ResultsResponse::from_view(view)))
}
