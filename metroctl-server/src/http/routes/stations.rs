//! Station endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use metroctl_core::StationName;

use crate::db::repos::{StationRecord, StationRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create station request
#[derive(Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// Station response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<StationRecord> for StationResponse {
    fn from(s: StationRecord) -> Self {
        Self {
            id: s.id,
            name: s.name,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// POST /stations - create a station
async fn create_station(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), ApiError> {
    let name = StationName::new(&req.name)?;
    let station = StationRepo::new(&state.pool).create(name).await?;

    Ok((StatusCode::CREATED, Json(StationResponse::from(station))))
}

/// GET /stations - list all stations
async fn list_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationResponse>>, ApiError> {
    let stations = StationRepo::new(&state.pool).list().await?;

    Ok(Json(stations.into_iter().map(StationResponse::from).collect()))
}

/// DELETE /stations/{id} - delete a station
async fn delete_station(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    StationRepo::new(&state.pool).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Station routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/{id}", delete(delete_station))
}
