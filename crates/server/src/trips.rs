//! Trips API endpoints.

use api_types::trip::{TripNew, TripReconciled, TripUpdate};
use axum::{Json, extract::State, http::StatusCode};
use engine::{
    Activity, BudgetSummary, Currency, Expense, ItineraryDay, Money, NewTrip, Record, Trip,
    TripOverview, TripPatch,
};
use uuid::Uuid;

use crate::{Id, JsonBody, ServerError, server::ServerState};

fn parse_currency(code: Option<&str>) -> Result<Option<Currency>, ServerError> {
    Ok(code.map(Currency::try_from).transpose()?)
}

pub(crate) async fn require_trip(state: &ServerState, trip_id: Uuid) -> Result<Trip, ServerError> {
    state
        .engine
        .trip(trip_id)
        .await?
        .ok_or_else(|| ServerError::not_found(Trip::KIND, trip_id))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Trip>>, ServerError> {
    Ok(Json(state.engine.trips().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<TripNew>,
) -> Result<(StatusCode, Json<Trip>), ServerError> {
    let currency = parse_currency(payload.currency.as_deref())?.unwrap_or_default();
    let budget = Money::parse(&payload.budget, currency)?;

    let trip = state
        .engine
        .create_trip(NewTrip {
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            destination: payload.destination,
            cover_image: payload.cover_image,
            budget,
            currency,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Trip>, ServerError> {
    Ok(Json(require_trip(&state, id.0).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Id,
    JsonBody(payload): JsonBody<TripUpdate>,
) -> Result<Json<Trip>, ServerError> {
    let currency = parse_currency(payload.currency.as_deref())?;
    let budget = match payload.budget.as_deref() {
        Some(budget) => {
            let currency = match currency {
                Some(currency) => currency,
                None => require_trip(&state, id.0).await?.currency,
            };
            Some(Money::parse(budget, currency)?)
        }
        None => None,
    };

    let trip = state
        .engine
        .update_trip(
            id.0,
            TripPatch {
                name: payload.name,
                start_date: payload.start_date,
                end_date: payload.end_date,
                destination: payload.destination,
                cover_image: payload.cover_image,
                budget,
                currency,
            },
        )
        .await?;

    Ok(Json(trip))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Trip>, ServerError> {
    Ok(Json(state.engine.delete_trip(id.0).await?))
}

pub async fn days(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Vec<ItineraryDay>>, ServerError> {
    let trip = require_trip(&state, id.0).await?;
    Ok(Json(state.engine.days_by_trip(trip.id).await?))
}

pub async fn activities(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Vec<Activity>>, ServerError> {
    let trip = require_trip(&state, id.0).await?;
    Ok(Json(state.engine.activities_by_trip(trip.id).await?))
}

pub async fn expenses(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let trip = require_trip(&state, id.0).await?;
    Ok(Json(state.engine.expenses_by_trip(trip.id).await?))
}

pub async fn budget(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<BudgetSummary>, ServerError> {
    Ok(Json(state.engine.budget_summary(id.0).await?))
}

pub async fn overview(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<TripOverview>, ServerError> {
    Ok(Json(state.engine.trip_overview(id.0).await?))
}

pub async fn reconcile(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<TripReconciled>, ServerError> {
    let repaired_days = state.engine.reconcile_trip(id.0).await?;
    Ok(Json(TripReconciled { repaired_days }))
}
