//! The module contains the `Trip` record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, Money, ResultEngine,
    store::{ForeignKey, Record},
    util::{ensure_date_range, normalize_required_text},
};

/// Cover used when a trip is created without one.
pub const DEFAULT_COVER_IMAGE: &str = "https://images.unsplash.com/photo-1488646953014-85cb44e25828?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// Longest itinerary a trip may span, in days.
pub const MAX_TRIP_DAYS: i64 = 366;

/// A trip.
///
/// The trip owns its itinerary days and expenses through their `trip_id`.
/// `budget` is expressed in minor units of `currency`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination: String,
    pub cover_image: String,
    pub budget: Money,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a trip to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTrip {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination: String,
    pub cover_image: Option<String>,
    pub budget: Money,
    pub currency: Currency,
}

/// Partial update of a trip. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub cover_image: Option<String>,
    pub budget: Option<Money>,
    pub currency: Option<Currency>,
}

impl Trip {
    /// Validate `new` and build the record, stamping both timestamps with
    /// `now`.
    pub fn new(new: NewTrip, now: DateTime<Utc>) -> ResultEngine<Self> {
        let name = normalize_required_text(&new.name, "trip name")?;
        let destination = normalize_required_text(&new.destination, "destination")?;
        validate_span(new.start_date, new.end_date)?;
        let budget = new.budget.ensure_non_negative("budget")?;
        let cover_image = new
            .cover_image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string());

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            start_date: new.start_date,
            end_date: new.end_date,
            destination,
            cover_image,
            budget,
            currency: new.currency,
            created_at: now,
            updated_at: now,
        })
    }

    /// Number of calendar days in `[start_date, end_date]`.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn validate_span(start: NaiveDate, end: NaiveDate) -> ResultEngine<()> {
    ensure_date_range(start, end)?;
    if (end - start).num_days() + 1 > MAX_TRIP_DAYS {
        return Err(EngineError::Validation(format!(
            "a trip cannot span more than {MAX_TRIP_DAYS} days"
        )));
    }
    Ok(())
}

impl Record for Trip {
    const KIND: &'static str = "trip";
    type Patch = TripPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn belongs_to(&self, _key: ForeignKey) -> bool {
        false
    }

    fn apply(&mut self, patch: TripPatch) -> ResultEngine<()> {
        if let Some(currency) = patch.currency
            && currency != self.currency
            && patch.budget.is_none()
        {
            return Err(EngineError::CurrencyMismatch(format!(
                "changing the currency from {} to {currency} needs the budget in {currency}",
                self.currency
            )));
        }
        if let Some(name) = patch.name {
            self.name = normalize_required_text(&name, "trip name")?;
        }
        if let Some(destination) = patch.destination {
            self.destination = normalize_required_text(&destination, "destination")?;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        validate_span(self.start_date, self.end_date)?;
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = cover_image;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget.ensure_non_negative("budget")?;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
