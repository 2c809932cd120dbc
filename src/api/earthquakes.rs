use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::domain::{EarthquakeRecord, NewEarthquake};
use crate::error::AppError;
use crate::gateway::{DeleteInfo, InsertInfo};

pub const USAGE: &str = "\
Usage:
  /list              GET     Returns a list of all earthquakes
  /minmag/:threshold GET     Returns earthquakes at or above the threshold, largest first
  /new               POST    Creates a new entry from the JSON body
                             {name, magnitude, occurrence?, longitude?, latitude?}
  /delete/:id        DELETE  Deletes the earthquake entry with the given id
";

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub status: &'static str,
    pub results: Vec<EarthquakeRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub status: &'static str,
    pub inserted_info: InsertInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub status: &'static str,
    pub delete_info: DeleteInfo,
}

pub async fn usage() -> &'static str {
    USAGE
}

pub async fn list_all(State(state): State<AppState>) -> Result<Json<ResultsResponse>, AppError> {
    let results = state.gateway.list_all().await?;
    Ok(Json(ResultsResponse {
        status: "ok",
        results,
    }))
}

pub async fn list_by_min_magnitude(
    Path(threshold): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResultsResponse>, AppError> {
    let results = state.gateway.list_by_min_magnitude(&threshold).await?;
    Ok(Json(ResultsResponse {
        status: "ok",
        results,
    }))
}

pub async fn insert(
    State(state): State<AppState>,
    payload: Result<Json<NewEarthquake>, JsonRejection>,
) -> Result<Json<InsertResponse>, AppError> {
    let Json(record) = payload.map_err(|e| AppError::Request(e.body_text()))?;
    let inserted_info = state.gateway.insert(record).await?;
    Ok(Json(InsertResponse {
        status: "ok",
        inserted_info,
    }))
}

pub async fn delete_by_id(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let delete_info = state.gateway.delete_by_id(&id).await?;
    Ok(Json(DeleteResponse {
        status: "ok",
        delete_info,
    }))
}
