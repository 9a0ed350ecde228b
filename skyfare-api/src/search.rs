use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use skyfare_core::search::{FlightSearchRequest, MonthInput, MonthSelection, MonthlySearchRequest, SearchSelection};
use skyfare_core::Flight;
use skyfare_search::{
    CriteriaSelection, FilterCriteria, FilterStats, FlightFilterEngine, MonthlyAggregator, Route,
    SearchRequestBuilder, TripTypeMode,
};
use tracing::info;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchFlightsRequest {
    pub selection: SearchSelection,
    #[serde(default)]
    pub criteria: CriteriaSelection,
}

#[derive(Debug, Serialize)]
pub struct SearchFlightsResponse {
    pub request: FlightSearchRequest,
    pub criteria: FilterCriteria,
    pub flights: Vec<Flight>,
    pub stats: FilterStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSearchRequest {
    pub from: String,
    pub to: String,
    pub month: MonthInput,
    #[serde(default)]
    pub trip_type_mode: Option<TripTypeMode>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSearchResponse {
    pub request: MonthlySearchRequest,
    pub trip_type_mode: TripTypeMode,
    pub flights: Vec<Flight>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/flights/month", post(search_month))
}

/// One-shot search: build the lookup query, fetch, filter.
async fn search_flights(
    State(state): State<AppState>,
    AppJson(req): AppJson<SearchFlightsRequest>,
) -> Result<Json<SearchFlightsResponse>, AppError> {
    let request = SearchRequestBuilder::new().build(&req.selection)?;
    let criteria = req
        .criteria
        .resolve(&state.settings.filters, request.trip_type.into())?;

    state.metrics.record_search("day");
    let flights = state.lookup.search_flights(&request).await?;
    let report = FlightFilterEngine::new().filter_with_report(&flights, &criteria);
    state.metrics.record_stats(&report.stats);

    info!(
        from = %request.from_location,
        to = %request.to_location,
        examined = report.stats.examined,
        accepted = report.stats.accepted,
        "Flight search served"
    );

    Ok(Json(SearchFlightsResponse {
        request,
        criteria,
        flights: report.flights,
        stats: report.stats,
    }))
}

/// Cheapest flights on a route for a whole month.
async fn search_month(
    State(state): State<AppState>,
    AppJson(req): AppJson<MonthSearchRequest>,
) -> Result<Json<MonthSearchResponse>, AppError> {
    let selection = MonthSelection {
        from: req.from,
        to: req.to,
        month: req.month,
    };
    let request = SearchRequestBuilder::new().build_monthly(&selection)?;
    let mode = req.trip_type_mode.unwrap_or(TripTypeMode::OneWay);
    let limit = req.limit.unwrap_or(state.settings.monthly_limit);
    if limit == 0 {
        return Err(AppError::ValidationError("limit must be at least 1".to_string()));
    }

    state.metrics.record_search("month");
    let flights = state.lookup.search_month(&request).await?;
    let route = Route::new(&request.from_location, &request.to_location);
    let ranked = MonthlyAggregator::new().cheapest_by_month(&flights, &route, request.month, mode, Some(limit));

    info!(
        from = %request.from_location,
        to = %request.to_location,
        month = request.month,
        returned = ranked.len(),
        "Monthly search served"
    );

    Ok(Json(MonthSearchResponse {
        request,
        trip_type_mode: mode,
        flights: ranked,
    }))
}
