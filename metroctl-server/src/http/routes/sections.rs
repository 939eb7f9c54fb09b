//! Section endpoints
//!
//! Sections are only ever appended at a line's terminal station and
//! removed from the terminal end; violations come back as 400 with the
//! specific reason.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use metroctl_core::{Distance, Duration, Section};

use crate::db::repos::{SectionRecord, SectionRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create section request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i64,
    pub duration: Option<i64>,
}

/// Delete section query parameters
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSectionParams {
    pub station_id: i64,
}

/// Section response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: i64,
    pub line_id: i64,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i64,
    pub duration: Option<i64>,
}

impl From<SectionRecord> for SectionResponse {
    fn from(s: SectionRecord) -> Self {
        Self {
            id: s.id,
            line_id: s.line_id,
            up_station_id: s.up_station_id,
            down_station_id: s.down_station_id,
            distance: s.distance,
            duration: s.duration,
        }
    }
}

/// GET /lines/{id}/sections - list a line's sections in path order
async fn list_sections(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<i64>,
) -> Result<Json<Vec<SectionResponse>>, ApiError> {
    let sections = SectionRepo::new(&state.pool).list(line_id).await?;

    Ok(Json(sections.into_iter().map(SectionResponse::from).collect()))
}

/// POST /lines/{id}/sections - append a section at the terminal
async fn create_section(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<i64>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), ApiError> {
    let section = Section::new(
        req.up_station_id,
        req.down_station_id,
        Distance::new(req.distance)?,
        req.duration.map(Duration::new).transpose()?,
    );

    let record = SectionRepo::new(&state.pool).append(line_id, section).await?;

    Ok((StatusCode::CREATED, Json(SectionResponse::from(record))))
}

/// DELETE /lines/{id}/sections?stationId={sid} - remove the terminal section
async fn delete_section(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<i64>,
    Query(params): Query<DeleteSectionParams>,
) -> Result<StatusCode, ApiError> {
    SectionRepo::new(&state.pool)
        .remove(line_id, params.station_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Section routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/lines/{id}/sections",
        get(list_sections).post(create_section).delete(delete_section),
    )
}
