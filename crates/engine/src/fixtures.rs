//! Seed records for a session.
//!
//! The bundled set holds two trips with their days, activities and expenses.
//! Day records embed the same activities the activity collection holds, so a
//! seeded store starts consistent.

use serde::de::DeserializeOwned;

use crate::{Activity, Expense, ItineraryDay, ResultEngine, Trip};

const TRIPS: &str = include_str!("../fixtures/trips.json");
const ITINERARY_DAYS: &str = include_str!("../fixtures/itinerary_days.json");
const ACTIVITIES: &str = include_str!("../fixtures/activities.json");
const EXPENSES: &str = include_str!("../fixtures/expenses.json");

/// Initial contents of the four collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fixtures {
    pub trips: Vec<Trip>,
    pub itinerary_days: Vec<ItineraryDay>,
    pub activities: Vec<Activity>,
    pub expenses: Vec<Expense>,
}

impl Fixtures {
    /// The fixture set shipped with the crate.
    pub fn bundled() -> ResultEngine<Self> {
        Self::from_json(TRIPS, ITINERARY_DAYS, ACTIVITIES, EXPENSES)
    }

    /// Parse one JSON array per collection.
    pub fn from_json(
        trips: &str,
        itinerary_days: &str,
        activities: &str,
        expenses: &str,
    ) -> ResultEngine<Self> {
        Ok(Self {
            trips: parse(trips)?,
            itinerary_days: parse(itinerary_days)?,
            activities: parse(activities)?,
            expenses: parse(expenses)?,
        })
    }
}

fn parse<T: DeserializeOwned>(json: &str) -> ResultEngine<Vec<T>> {
    Ok(serde_json::from_str(json)?)
}
