use uuid::Uuid;

use crate::{EngineError, ItineraryDay, ResultEngine, Store, Trip, store::Record};

mod activities;
mod budget;
mod days;
mod expenses;
mod trips;

pub use trips::TripOverview;

/// Entry point of every trip planning operation.
///
/// The engine owns nothing but the injected [`Store`]; cloning the store
/// before building shares the same session state.
#[derive(Debug)]
pub struct Engine {
    store: Store,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The underlying store, for callers that need raw collection access.
    pub fn store(&self) -> &Store {
        &self.store
    }

    async fn require_trip(&self, trip_id: Uuid) -> ResultEngine<Trip> {
        self.store
            .trips
            .get(trip_id)
            .await?
            .ok_or_else(|| EngineError::not_found(Trip::KIND, trip_id))
    }

    async fn require_day(&self, day_id: Uuid) -> ResultEngine<ItineraryDay> {
        self.store
            .days
            .get(day_id)
            .await?
            .ok_or_else(|| EngineError::not_found(ItineraryDay::KIND, day_id))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Store>,
}

impl EngineBuilder {
    /// Pass the store holding the session state. Defaults to an empty
    /// in-memory store with nominal latency.
    pub fn store(mut self, store: Store) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            store: self.store.unwrap_or_default(),
        })
    }
}
