//! Itinerary days API endpoints.

use api_types::day::{DayNew, DayReconciled, DayUpdate};
use axum::{Json, extract::State, http::StatusCode};
use engine::{Activity, ItineraryDay, ItineraryDayPatch, NewItineraryDay, Record};

use crate::{Id, JsonBody, ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ItineraryDay>>, ServerError> {
    Ok(Json(state.engine.itinerary_days().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<DayNew>,
) -> Result<(StatusCode, Json<ItineraryDay>), ServerError> {
    let day = state
        .engine
        .create_itinerary_day(NewItineraryDay {
            trip_id: payload.trip_id,
            date: payload.date,
            day_number: payload.day_number,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(day)))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<ItineraryDay>, ServerError> {
    state
        .engine
        .itinerary_day(id.0)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(ItineraryDay::KIND, id.0))
}

/// Only `date` and `dayNumber` are writable; the embedded activities follow
/// the activity endpoints.
pub async fn update(
    State(state): State<ServerState>,
    id: Id,
    JsonBody(payload): JsonBody<DayUpdate>,
) -> Result<Json<ItineraryDay>, ServerError> {
    let day = state
        .engine
        .update_itinerary_day(
            id.0,
            ItineraryDayPatch {
                date: payload.date,
                day_number: payload.day_number,
                activities: None,
            },
        )
        .await?;

    Ok(Json(day))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<ItineraryDay>, ServerError> {
    Ok(Json(state.engine.delete_itinerary_day(id.0).await?))
}

pub async fn activities(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Vec<Activity>>, ServerError> {
    if state.engine.itinerary_day(id.0).await?.is_none() {
        return Err(ServerError::not_found(ItineraryDay::KIND, id.0));
    }
    Ok(Json(state.engine.activities_by_day(id.0).await?))
}

pub async fn reconcile(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<DayReconciled>, ServerError> {
    let changed = state.engine.reconcile_day(id.0).await?;
    Ok(Json(DayReconciled { changed }))
}
