use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use engine::EngineError;
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub use server::{ServerState, router, run_with_listener};

mod activities;
mod days;
mod expenses;
mod server;
mod trips;

pub mod types {
    pub mod trip {
        pub use api_types::trip::{TripNew, TripReconciled, TripUpdate};
        pub use engine::{BudgetSummary, Trip, TripOverview};
    }

    pub mod day {
        pub use api_types::day::{DayNew, DayReconciled, DayUpdate};
        pub use engine::ItineraryDay;
    }

    pub mod activity {
        pub use api_types::activity::{ActivityNew, ActivityUpdate};
        pub use engine::Activity;
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseUpdate};
        pub use engine::Expense;
    }

    pub use api_types::ErrorBody;
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

impl ServerError {
    /// `NotFound` for a lookup that came back empty.
    fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::Engine(EngineError::NotFound {
            kind,
            id: id.to_string(),
        })
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Validation(_)
        | EngineError::InvalidAmount(_)
        | EngineError::CurrencyMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Fixture(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Fixture(fixture_err) => {
            tracing::error!("fixture error: {fixture_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(api_types::ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// `Json` body whose rejection is reported as a `ServerError`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Single `{id}` path segment parsed as a UUID.
pub struct Id(pub Uuid);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
        Ok(Self(id))
    }
}
