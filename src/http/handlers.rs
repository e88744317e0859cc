//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one endpoint and delegates to the service
//! layer. Request bodies are parsed from raw JSON here at the boundary so
//! that malformed payloads surface as 400 validation responses with the
//! API's error body, not as the framework's default rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto::{
    CreateMissionRequest, CreateScientistRequest, HealthResponse, MissionDetail, PlanetSummary,
    ScientistDetail, ScientistSummary, UpdateScientistRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::ScientistId;
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::validation(e.to_string()))
}

/// GET /
///
/// Liveness check: 200 with an empty body.
pub async fn home() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Service and database status.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

/// GET /scientists
///
/// List all scientists as scalar summaries.
pub async fn list_scientists(
    State(state): State<AppState>,
) -> HandlerResult<Vec<ScientistSummary>> {
    let scientists = services::list_scientists(state.repository.as_ref()).await?;
    Ok(Json(scientists.into_iter().map(Into::into).collect()))
}

/// POST /scientists
///
/// Create a scientist. 201 with the created record, 400 on validation
/// failure.
pub async fn create_scientist(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ScientistDetail>), AppError> {
    let request: CreateScientistRequest = parse_body(body)?;
    let scientist = services::create_scientist(state.repository.as_ref(), request.into()).await?;
    Ok((StatusCode::CREATED, Json(scientist.into())))
}

/// GET /scientists/{id}
///
/// Full record with nested missions, each carrying its planet.
pub async fn get_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ScientistDetail> {
    let aggregate =
        services::get_scientist(state.repository.as_ref(), ScientistId::new(id)).await?;
    Ok(Json(aggregate.into()))
}

/// PATCH /scientists/{id}
///
/// Partial update of the scalar attributes. 202 with the updated summary,
/// 400 on unknown attributes or invalid values, 404 if absent.
pub async fn update_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ScientistSummary>), AppError> {
    let request: UpdateScientistRequest = parse_body(body)?;
    let scientist =
        services::update_scientist(state.repository.as_ref(), ScientistId::new(id), request.into())
            .await?;
    Ok((StatusCode::ACCEPTED, Json(scientist.into())))
}

/// DELETE /scientists/{id}
///
/// 204 with an empty body; the scientist's missions are removed with them.
pub async fn delete_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete_scientist(state.repository.as_ref(), ScientistId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /planets
///
/// List all planets as scalar summaries.
pub async fn list_planets(State(state): State<AppState>) -> HandlerResult<Vec<PlanetSummary>> {
    let planets = services::list_planets(state.repository.as_ref()).await?;
    Ok(Json(planets.into_iter().map(Into::into).collect()))
}

/// POST /missions
///
/// Create a mission. 201 with the created record and both nested
/// relations, 400 when a foreign key is dangling or a field is missing.
pub async fn create_mission(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MissionDetail>), AppError> {
    let request: CreateMissionRequest = parse_body(body)?;
    let mission = request.into_new_mission().map_err(AppError::Validation)?;
    let created = services::create_mission(state.repository.as_ref(), mission).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
