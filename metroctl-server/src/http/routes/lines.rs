//! Line endpoints
//!
//! A line is created with its initial section; the response carries the
//! ordered station path implied by its sections.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use metroctl_core::{Distance, Duration, LineColor, LineName, Section};

use crate::db::repos::{LineDetail, LineRepo};
use crate::http::error::ApiError;
use crate::http::routes::stations::StationResponse;
use crate::http::server::AppState;

/// Create line request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i64,
    pub duration: Option<i64>,
}

/// Update line request (rename/recolor only)
#[derive(Deserialize)]
pub struct UpdateLineRequest {
    pub name: String,
    pub color: String,
}

/// Line response with its ordered station path
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: String,
    pub stations: Vec<StationResponse>,
}

impl From<LineDetail> for LineResponse {
    fn from(d: LineDetail) -> Self {
        Self {
            id: d.line.id,
            name: d.line.name,
            color: d.line.color,
            created_at: d.line.created_at.to_rfc3339(),
            stations: d.stations.into_iter().map(StationResponse::from).collect(),
        }
    }
}

/// POST /lines - create a line with its initial section
async fn create_line(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLineRequest>,
) -> Result<(StatusCode, Json<LineResponse>), ApiError> {
    let name = LineName::new(&req.name)?;
    let color = LineColor::new(&req.color)?;
    let initial = Section::new(
        req.up_station_id,
        req.down_station_id,
        Distance::new(req.distance)?,
        req.duration.map(Duration::new).transpose()?,
    );

    let detail = LineRepo::new(&state.pool).create(name, color, initial).await?;

    Ok((StatusCode::CREATED, Json(LineResponse::from(detail))))
}

/// GET /lines - list all lines
async fn list_lines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LineResponse>>, ApiError> {
    let details = LineRepo::new(&state.pool).list().await?;

    Ok(Json(details.into_iter().map(LineResponse::from).collect()))
}

/// GET /lines/{id} - get a single line
async fn get_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<LineResponse>, ApiError> {
    let detail = LineRepo::new(&state.pool).get(id).await?;

    Ok(Json(LineResponse::from(detail)))
}

/// PUT /lines/{id} - rename/recolor a line
async fn update_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLineRequest>,
) -> Result<Json<LineResponse>, ApiError> {
    let name = LineName::new(&req.name)?;
    let color = LineColor::new(&req.color)?;

    let detail = LineRepo::new(&state.pool).update(id, name, color).await?;

    Ok(Json(LineResponse::from(detail)))
}

/// DELETE /lines/{id} - delete a line and its sections
async fn delete_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    LineRepo::new(&state.pool).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Line routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/{id}",
            get(get_line).put(update_line).delete(delete_line),
        )
}
