//! Itinerary days and the generator that lays them out over a trip.
//!
//! A trip spanning `[start_date, end_date]` gets exactly one
//! [`ItineraryDay`] per calendar day: `day_number` runs `1..=N` and `date`
//! advances by one day per record.
//!
//! Each day embeds a copy of its activities so that reading a day needs no
//! join. The copy is kept in step with the activity collection when an
//! activity is created; see `Engine::reconcile_day` for the repair pass.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Activity, EngineError, ResultEngine, Trip,
    store::{ForeignKey, Record},
    util::ensure_date_range,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub date: NaiveDate,
    /// 1-based position inside the trip.
    pub day_number: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItineraryDay {
    pub trip_id: Uuid,
    pub date: NaiveDate,
    pub day_number: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItineraryDayPatch {
    pub date: Option<NaiveDate>,
    pub day_number: Option<u32>,
    pub activities: Option<Vec<Activity>>,
}

impl ItineraryDay {
    pub fn new(new: NewItineraryDay) -> ResultEngine<Self> {
        validate_day_number(new.day_number)?;
        Ok(Self {
            id: Uuid::new_v4(),
            trip_id: new.trip_id,
            date: new.date,
            day_number: new.day_number,
            activities: Vec::new(),
        })
    }
}

fn validate_day_number(day_number: u32) -> ResultEngine<()> {
    if day_number == 0 {
        return Err(EngineError::Validation(
            "day number is 1-based".to_string(),
        ));
    }
    Ok(())
}

/// Check that `date` falls within `trip` and that `day_number` is its
/// 1-based position there.
pub(crate) fn ensure_slot(trip: &Trip, date: NaiveDate, day_number: u32) -> ResultEngine<()> {
    if date < trip.start_date || date > trip.end_date {
        return Err(EngineError::Validation(format!(
            "day {date} is outside trip {} ({} to {})",
            trip.id, trip.start_date, trip.end_date
        )));
    }
    let position = (date - trip.start_date).num_days() + 1;
    if i64::from(day_number) != position {
        return Err(EngineError::Validation(format!(
            "{date} is day {position} of trip {}, not day {day_number}",
            trip.id
        )));
    }
    Ok(())
}

impl Record for ItineraryDay {
    const KIND: &'static str = "itinerary day";
    type Patch = ItineraryDayPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn belongs_to(&self, key: ForeignKey) -> bool {
        matches!(key, ForeignKey::Trip(trip_id) if self.trip_id == trip_id)
    }

    fn order_under(_key: ForeignKey, a: &Self, b: &Self) -> Ordering {
        a.day_number.cmp(&b.day_number)
    }

    fn apply(&mut self, patch: ItineraryDayPatch) -> ResultEngine<()> {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(day_number) = patch.day_number {
            validate_day_number(day_number)?;
            self.day_number = day_number;
        }
        if let Some(activities) = patch.activities {
            self.activities = activities;
        }
        Ok(())
    }
}

/// Lay out one day per calendar day of `[start, end]`, in order.
///
/// The caller is responsible for having validated the span; an inverted
/// range is still refused here rather than producing an empty plan.
pub fn plan_days(
    trip_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> ResultEngine<Vec<NewItineraryDay>> {
    ensure_date_range(start, end)?;
    let day_count = (end - start).num_days() + 1;

    (0..day_count)
        .map(|offset| -> ResultEngine<NewItineraryDay> {
            let offset = u32::try_from(offset)
                .map_err(|_| EngineError::Validation("trip span too long".to_string()))?;
            let date = start
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| EngineError::Validation("date out of range".to_string()))?;
            Ok(NewItineraryDay {
                trip_id,
                date,
                day_number: offset + 1,
            })
        })
        .collect()
}

/// [`plan_days`] over a trip's own date range.
pub fn plan_for_trip(trip: &Trip) -> ResultEngine<Vec<NewItineraryDay>> {
    plan_days(trip.id, trip.start_date, trip.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_day_trip() {
        let trip_id = Uuid::new_v4();
        let plan = plan_days(trip_id, date(2024, 6, 1), date(2024, 6, 3)).unwrap();

        let numbers: Vec<u32> = plan.iter().map(|d| d.day_number).collect();
        let dates: Vec<NaiveDate> = plan.iter().map(|d| d.date).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(dates, [date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 3)]);
        assert!(plan.iter().all(|d| d.trip_id == trip_id));
    }

    #[test]
    fn single_day_trip() {
        let plan = plan_days(Uuid::new_v4(), date(2024, 6, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].day_number, 1);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let plan = plan_days(Uuid::new_v4(), date(2024, 2, 27), date(2024, 3, 2)).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[2].date, date(2024, 2, 29));
        assert_eq!(plan[4].date, date(2024, 3, 2));
    }

    #[test]
    fn day_count_and_strict_order_hold_for_many_spans() {
        let start = date(2023, 12, 20);
        for span in 0..40u64 {
            let end = start.checked_add_days(Days::new(span)).unwrap();
            let plan = plan_days(Uuid::new_v4(), start, end).unwrap();

            assert_eq!(plan.len() as u64, span + 1);
            for pair in plan.windows(2) {
                assert_eq!(pair[1].day_number, pair[0].day_number + 1);
                assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
            }
            assert_eq!(plan.last().unwrap().date, end);
        }
    }

    #[test]
    fn inverted_range_is_refused() {
        assert!(plan_days(Uuid::new_v4(), date(2024, 6, 2), date(2024, 6, 1)).is_err());
    }

    fn trip(start: NaiveDate, end: NaiveDate) -> Trip {
        Trip::new(
            crate::NewTrip {
                name: "Rome".to_string(),
                start_date: start,
                end_date: end,
                destination: "Rome".to_string(),
                cover_image: None,
                budget: crate::Money::ZERO,
                currency: crate::Currency::Eur,
            },
            chrono::Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn slot_follows_the_trip_calendar() {
        let trip = trip(date(2024, 6, 1), date(2024, 6, 3));

        assert!(ensure_slot(&trip, date(2024, 6, 1), 1).is_ok());
        assert!(ensure_slot(&trip, date(2024, 6, 3), 3).is_ok());
        assert_eq!(
            ensure_slot(&trip, date(2024, 6, 1), 7).unwrap_err(),
            EngineError::Validation(format!(
                "2024-06-01 is day 1 of trip {}, not day 7",
                trip.id
            ))
        );
        assert!(ensure_slot(&trip, date(2024, 6, 4), 4).is_err());
        assert!(ensure_slot(&trip, date(2024, 5, 31), 1).is_err());
    }

    #[test]
    fn planned_days_fill_their_slots() {
        let trip = trip(date(2024, 2, 27), date(2024, 3, 2));
        for day in plan_for_trip(&trip).unwrap() {
            ensure_slot(&trip, day.date, day.day_number).unwrap();
        }
    }

    #[test]
    fn day_number_zero_is_refused() {
        let err = ItineraryDay::new(NewItineraryDay {
            trip_id: Uuid::new_v4(),
            date: date(2024, 6, 1),
            day_number: 0,
        })
        .unwrap_err();
        assert_eq!(err, EngineError::Validation("day number is 1-based".to_string()));
    }
}
