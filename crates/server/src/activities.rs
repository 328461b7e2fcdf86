//! Activities API endpoints.

use api_types::activity::{ActivityNew, ActivityUpdate, Coordinates as CoordinatesView};
use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveTime;
use engine::{
    Activity, ActivityCategory, ActivityPatch, Coordinates, NewActivity, Record, parse_time,
};

use crate::{Id, JsonBody, ServerError, server::ServerState};

fn coordinates(view: CoordinatesView) -> Coordinates {
    Coordinates {
        lat: view.lat,
        lng: view.lng,
    }
}

fn parse_category(category: Option<&str>) -> Result<Option<ActivityCategory>, ServerError> {
    Ok(category.map(ActivityCategory::try_from).transpose()?)
}

fn parse_optional_time(time: Option<&str>) -> Result<Option<NaiveTime>, ServerError> {
    Ok(time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_time)
        .transpose()?)
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Activity>>, ServerError> {
    Ok(Json(state.engine.activities().await?))
}

/// Creates the activity and links it into its day.
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ActivityNew>,
) -> Result<(StatusCode, Json<Activity>), ServerError> {
    let activity = state
        .engine
        .create_activity(NewActivity {
            trip_id: payload.trip_id,
            day_id: payload.day_id,
            title: payload.title,
            start_time: parse_time(&payload.start_time)?,
            end_time: parse_optional_time(payload.end_time.as_deref())?,
            location: payload.location,
            notes: payload.notes,
            category: parse_category(payload.category.as_deref())?.unwrap_or_default(),
            coordinates: payload.coordinates.map(coordinates).unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Activity>, ServerError> {
    state
        .engine
        .activity(id.0)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(Activity::KIND, id.0))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Id,
    JsonBody(payload): JsonBody<ActivityUpdate>,
) -> Result<Json<Activity>, ServerError> {
    let end_time = match payload.end_time {
        Some(end_time) => Some(parse_optional_time(end_time.as_deref())?),
        None => None,
    };

    let activity = state
        .engine
        .update_activity(
            id.0,
            ActivityPatch {
                title: payload.title,
                start_time: payload.start_time.as_deref().map(parse_time).transpose()?,
                end_time,
                location: payload.location,
                notes: payload.notes,
                category: parse_category(payload.category.as_deref())?,
                coordinates: payload.coordinates.map(coordinates),
            },
        )
        .await?;

    Ok(Json(activity))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Activity>, ServerError> {
    Ok(Json(state.engine.delete_activity(id.0).await?))
}
