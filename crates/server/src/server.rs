use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{activities, days, expenses, trips};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Every route of the API, bound to `engine`.
pub fn router(engine: Arc<Engine>) -> Router {
    let state = ServerState { engine };

    Router::new()
        .route("/trips", get(trips::list).post(trips::create))
        .route(
            "/trips/{id}",
            get(trips::get).patch(trips::update).delete(trips::delete),
        )
        .route("/trips/{id}/days", get(trips::days))
        .route("/trips/{id}/activities", get(trips::activities))
        .route("/trips/{id}/expenses", get(trips::expenses))
        .route("/trips/{id}/budget", get(trips::budget))
        .route("/trips/{id}/overview", get(trips::overview))
        .route("/trips/{id}/reconcile", post(trips::reconcile))
        .route("/days", get(days::list).post(days::create))
        .route(
            "/days/{id}",
            get(days::get).patch(days::update).delete(days::delete),
        )
        .route("/days/{id}/activities", get(days::activities))
        .route("/days/{id}/reconcile", post(days::reconcile))
        .route("/activities", get(activities::list).post(activities::create))
        .route(
            "/activities/{id}",
            get(activities::get)
                .patch(activities::update)
                .delete(activities::delete),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .patch(expenses::update)
                .delete(expenses::delete),
        )
        .with_state(state)
}

/// Serve the API on `listener` until the process stops.
pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine))).await
}
