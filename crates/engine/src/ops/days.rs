use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    EngineError, ItineraryDay, ItineraryDayPatch, NewItineraryDay, ResultEngine,
    itinerary::ensure_slot, store::ForeignKey,
};

use super::Engine;

impl Engine {
    /// Return every itinerary day, in creation order.
    pub async fn itinerary_days(&self) -> ResultEngine<Vec<ItineraryDay>> {
        self.store.days.list().await
    }

    /// Return a day with its embedded activities, or `None` if absent.
    pub async fn itinerary_day(&self, day_id: Uuid) -> ResultEngine<Option<ItineraryDay>> {
        self.store.days.get(day_id).await
    }

    /// Days of a trip, ordered by `day_number`.
    pub async fn days_by_trip(&self, trip_id: Uuid) -> ResultEngine<Vec<ItineraryDay>> {
        self.store.days.list_by(ForeignKey::Trip(trip_id)).await
    }

    /// Add a single day to an existing trip.
    ///
    /// The date must fall within the trip, must not already have a day, and
    /// `day_number` must be its position in the trip.
    pub async fn create_itinerary_day(&self, new: NewItineraryDay) -> ResultEngine<ItineraryDay> {
        let trip = self.require_trip(new.trip_id).await?;
        ensure_slot(&trip, new.date, new.day_number)?;
        self.ensure_date_free(trip.id, new.date).await?;

        let day = ItineraryDay::new(new)?;
        self.store.days.insert(day).await
    }

    /// Update a day. A new `date` or `day_number` is held to the same rules
    /// as on creation.
    pub async fn update_itinerary_day(
        &self,
        day_id: Uuid,
        patch: ItineraryDayPatch,
    ) -> ResultEngine<ItineraryDay> {
        if patch.date.is_some() || patch.day_number.is_some() {
            let day = self.require_day(day_id).await?;
            let trip = self.require_trip(day.trip_id).await?;
            let date = patch.date.unwrap_or(day.date);
            ensure_slot(&trip, date, patch.day_number.unwrap_or(day.day_number))?;
            if date != day.date {
                self.ensure_date_free(trip.id, date).await?;
            }
        }
        self.store.days.update(day_id, patch).await
    }

    async fn ensure_date_free(&self, trip_id: Uuid, date: NaiveDate) -> ResultEngine<()> {
        let days = self.days_by_trip(trip_id).await?;
        if let Some(taken) = days.iter().find(|day| day.date == date) {
            return Err(EngineError::Validation(format!(
                "trip {trip_id} already has day {} on {date}",
                taken.day_number
            )));
        }
        Ok(())
    }

    /// Delete a day. Its activities stay in the activity collection.
    pub async fn delete_itinerary_day(&self, day_id: Uuid) -> ResultEngine<ItineraryDay> {
        let day = self.store.days.delete(day_id).await?;
        if !day.activities.is_empty() {
            tracing::warn!(
                "Itinerary day {day_id} deleted with {} activities left without a day",
                day.activities.len()
            );
        }
        Ok(day)
    }
}
