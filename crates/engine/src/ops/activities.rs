use uuid::Uuid;

use crate::{
    Activity, ActivityPatch, EngineError, ItineraryDay, NewActivity, ResultEngine,
    activity::by_start_time,
    store::ForeignKey,
};

use super::Engine;

impl Engine {
    /// Return every activity, in creation order.
    pub async fn activities(&self) -> ResultEngine<Vec<Activity>> {
        self.store.activities.list().await
    }

    /// Return an activity, or `None` if absent.
    pub async fn activity(&self, activity_id: Uuid) -> ResultEngine<Option<Activity>> {
        self.store.activities.get(activity_id).await
    }

    /// Activities of a trip, in creation order.
    pub async fn activities_by_trip(&self, trip_id: Uuid) -> ResultEngine<Vec<Activity>> {
        self.store.activities.list_by(ForeignKey::Trip(trip_id)).await
    }

    /// Activities of a day, ordered by start time.
    pub async fn activities_by_day(&self, day_id: Uuid) -> ResultEngine<Vec<Activity>> {
        self.store.activities.list_by(ForeignKey::Day(day_id)).await
    }

    /// Create an activity and link it into its day.
    ///
    /// The activity is persisted first, then inserted into the day's embedded
    /// list with an atomic `modify`, keeping the list in start time order.
    /// The two writes are separate: if the day cannot be updated the
    /// activity stays persisted, a warning is logged and the activity is
    /// still returned. [`Engine::reconcile_day`] repairs such a day.
    pub async fn create_activity(&self, new: NewActivity) -> ResultEngine<Activity> {
        let activity = Activity::new(new)?;
        self.require_trip(activity.trip_id).await?;
        if let Some(day) = self.store.days.get(activity.day_id).await?
            && day.trip_id != activity.trip_id
        {
            return Err(EngineError::Validation(format!(
                "itinerary day {} does not belong to trip {}",
                day.id, activity.trip_id
            )));
        }

        let activity = self.store.activities.insert(activity).await?;

        let linked = activity.clone();
        let result = self
            .store
            .days
            .modify(
                activity.day_id,
                Box::new(move |day: &mut ItineraryDay| {
                    insert_ordered(&mut day.activities, linked);
                    Ok(())
                }),
            )
            .await;
        if let Err(err) = result {
            tracing::warn!(
                "Activity {} saved but not linked to day {}: {err}",
                activity.id,
                activity.day_id
            );
        }

        Ok(activity)
    }

    /// Update an activity. The copy embedded in its day is left as is.
    pub async fn update_activity(
        &self,
        activity_id: Uuid,
        patch: ActivityPatch,
    ) -> ResultEngine<Activity> {
        self.store.activities.update(activity_id, patch).await
    }

    /// Delete an activity. The copy embedded in its day is left as is.
    pub async fn delete_activity(&self, activity_id: Uuid) -> ResultEngine<Activity> {
        self.store.activities.delete(activity_id).await
    }

    /// Rebuild a day's embedded activities from the activity collection.
    ///
    /// Returns `true` if the embedded list differed and was replaced.
    pub async fn reconcile_day(&self, day_id: Uuid) -> ResultEngine<bool> {
        let day = self.require_day(day_id).await?;
        let expected = self.activities_by_day(day_id).await?;
        if day.activities == expected {
            return Ok(false);
        }

        self.store
            .days
            .modify(
                day_id,
                Box::new(move |day: &mut ItineraryDay| {
                    day.activities = expected;
                    Ok(())
                }),
            )
            .await?;
        tracing::info!("Itinerary day {day_id} reconciled with the activity collection");
        Ok(true)
    }

    /// Run [`Engine::reconcile_day`] over every day of a trip.
    ///
    /// Returns how many days were repaired.
    pub async fn reconcile_trip(&self, trip_id: Uuid) -> ResultEngine<usize> {
        self.require_trip(trip_id).await?;
        let mut repaired = 0;
        for day in self.days_by_trip(trip_id).await? {
            match self.reconcile_day(day.id).await {
                Ok(true) => repaired += 1,
                Ok(false) => {}
                // Deleted concurrently, nothing left to repair.
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(repaired)
    }
}

/// Insert after every activity starting at the same time or earlier.
fn insert_ordered(activities: &mut Vec<Activity>, activity: Activity) {
    let index = activities
        .partition_point(|existing| by_start_time(existing, &activity).is_le());
    activities.insert(index, activity);
}
