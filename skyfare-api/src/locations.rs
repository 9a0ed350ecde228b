use axum::{extract::State, routing::get, Json, Router};
use skyfare_core::Location;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/locations", get(list_locations))
}

async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let locations = state.locations.list_locations().await?;
    Ok(Json(locations))
}
