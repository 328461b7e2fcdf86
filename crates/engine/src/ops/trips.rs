use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BudgetSummary, EngineError, ItineraryDay, NewTrip, ResultEngine, Trip, TripPatch,
    budget::summarize, itinerary::plan_for_trip, store::ForeignKey,
};

use super::Engine;

/// Everything the trip dashboard shows, read in one call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub trip: Trip,
    pub days: Vec<ItineraryDay>,
    pub budget: BudgetSummary,
}

impl Engine {
    /// Return all trips, in creation order.
    pub async fn trips(&self) -> ResultEngine<Vec<Trip>> {
        self.store.trips.list().await
    }

    /// Return a trip, or `None` if absent.
    pub async fn trip(&self, trip_id: Uuid) -> ResultEngine<Option<Trip>> {
        self.store.trips.get(trip_id).await
    }

    /// Create a trip and lay out its itinerary.
    ///
    /// The input is fully validated before the first write. Days are then
    /// created one store operation at a time in `day_number` order; if one
    /// fails, the trip and the days created so far are kept and the error is
    /// returned.
    pub async fn create_trip(&self, new: NewTrip) -> ResultEngine<Trip> {
        let trip = Trip::new(new, Utc::now())?;
        let plan = plan_for_trip(&trip)?;

        let trip = self.store.trips.insert(trip).await?;
        tracing::info!(
            "Trip {} \"{}\" created ({} days)",
            trip.id,
            trip.name,
            plan.len()
        );

        for new_day in plan {
            let day = ItineraryDay::new(new_day)?;
            self.store.days.insert(day).await?;
        }

        Ok(trip)
    }

    /// Create the itinerary days of an existing trip.
    ///
    /// Intended for trips whose days were never generated (or were removed);
    /// it does not look at days already present.
    pub async fn generate_itinerary(&self, trip_id: Uuid) -> ResultEngine<Vec<ItineraryDay>> {
        let trip = self.require_trip(trip_id).await?;
        let mut days = Vec::new();
        for new_day in plan_for_trip(&trip)? {
            let day = ItineraryDay::new(new_day)?;
            days.push(self.store.days.insert(day).await?);
        }
        tracing::info!("Generated {} itinerary days for trip {trip_id}", days.len());
        Ok(days)
    }

    /// Update a trip. Changing the dates does not touch its days.
    ///
    /// Amounts carry no currency of their own, so the currency can only be
    /// changed together with a budget in the new currency and while the
    /// trip has no expenses.
    pub async fn update_trip(&self, trip_id: Uuid, patch: TripPatch) -> ResultEngine<Trip> {
        let trip = self.require_trip(trip_id).await?;
        if let Some(currency) = patch.currency
            && currency != trip.currency
        {
            let expenses = self.store.expenses.list_by(ForeignKey::Trip(trip_id)).await?;
            if !expenses.is_empty() {
                return Err(EngineError::CurrencyMismatch(format!(
                    "trip {trip_id} has {} expenses in {}",
                    expenses.len(),
                    trip.currency
                )));
            }
        }
        self.store.trips.update(trip_id, patch).await
    }

    /// Delete a trip together with its expenses, activities and days.
    ///
    /// Children are removed first and the trip last, so an interrupted
    /// cascade leaves the trip readable.
    pub async fn delete_trip(&self, trip_id: Uuid) -> ResultEngine<Trip> {
        self.require_trip(trip_id).await?;
        let key = ForeignKey::Trip(trip_id);

        let expenses = self.store.expenses.delete_by(key).await?;
        let activities = self.store.activities.delete_by(key).await?;
        let days = self.store.days.delete_by(key).await?;
        let trip = self.store.trips.delete(trip_id).await?;

        tracing::info!(
            "Trip {trip_id} deleted with {} days, {} activities, {} expenses",
            days.len(),
            activities.len(),
            expenses.len()
        );
        Ok(trip)
    }

    /// Trip, ordered days and budget summary in one read.
    pub async fn trip_overview(&self, trip_id: Uuid) -> ResultEngine<TripOverview> {
        let trip = self.require_trip(trip_id).await?;
        let key = ForeignKey::Trip(trip_id);
        let (days, expenses) = tokio::try_join!(
            self.store.days.list_by(key),
            self.store.expenses.list_by(key)
        )?;
        let budget = summarize(trip.budget, trip.currency, &expenses)?;

        Ok(TripOverview { trip, days, budget })
    }
}
