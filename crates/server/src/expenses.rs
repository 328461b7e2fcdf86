//! Expenses API endpoints.
//!
//! Amounts are decimal strings read in the currency of the expense's trip.

use api_types::expense::{ExpenseNew, ExpenseUpdate};
use axum::{Json, extract::State, http::StatusCode};
use engine::{Expense, ExpenseCategory, ExpensePatch, Money, NewExpense, Record};

use crate::{Id, JsonBody, ServerError, server::ServerState, trips::require_trip};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    Ok(Json(state.engine.expenses().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ExpenseNew>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let trip = require_trip(&state, payload.trip_id).await?;

    let expense = state
        .engine
        .create_expense(NewExpense {
            trip_id: trip.id,
            category: ExpenseCategory::try_from(payload.category.as_str())?,
            amount: Money::parse(&payload.amount, trip.currency)?,
            description: payload.description,
            date: payload.date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Expense>, ServerError> {
    state
        .engine
        .expense(id.0)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(Expense::KIND, id.0))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Id,
    JsonBody(payload): JsonBody<ExpenseUpdate>,
) -> Result<Json<Expense>, ServerError> {
    let amount = match payload.amount.as_deref() {
        Some(amount) => {
            let expense = state
                .engine
                .expense(id.0)
                .await?
                .ok_or_else(|| ServerError::not_found(Expense::KIND, id.0))?;
            let trip = require_trip(&state, expense.trip_id).await?;
            Some(Money::parse(amount, trip.currency)?)
        }
        None => None,
    };

    let expense = state
        .engine
        .update_expense(
            id.0,
            ExpensePatch {
                category: payload
                    .category
                    .as_deref()
                    .map(ExpenseCategory::try_from)
                    .transpose()?,
                amount,
                description: payload.description,
                date: payload.date,
            },
        )
        .await?;

    Ok(Json(expense))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Id,
) -> Result<Json<Expense>, ServerError> {
    Ok(Json(state.engine.delete_expense(id.0).await?))
}
