//! The module contains the `Activity` record and its categories.

use std::cmp::Ordering;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    store::{ForeignKey, Record},
    util::{normalize_optional_text, normalize_required_text},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[default]
    Sightseeing,
    Food,
    Transport,
    Accommodation,
    Shopping,
    Entertainment,
}

impl ActivityCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sightseeing => "sightseeing",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
        }
    }
}

impl TryFrom<&str> for ActivityCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sightseeing" => Ok(Self::Sightseeing),
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "accommodation" => Ok(Self::Accommodation),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            other => Err(EngineError::Validation(format!(
                "invalid activity category: {other}"
            ))),
        }
    }
}

/// Map position of an activity. Unknown positions are `0, 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Something planned on one itinerary day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub day_id: Uuid,
    pub title: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default, with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: ActivityCategory,
    #[serde(default)]
    pub coordinates: Coordinates,
}

/// Fields of an activity to create.
#[derive(Clone, Debug, PartialEq)]
pub struct NewActivity {
    pub trip_id: Uuid,
    pub day_id: Uuid,
    pub title: String,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub category: ActivityCategory,
    pub coordinates: Coordinates,
}

/// Partial update of an activity.
///
/// Optional fields are doubly wrapped: `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<Option<NaiveTime>>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub category: Option<ActivityCategory>,
    pub coordinates: Option<Coordinates>,
}

impl Activity {
    pub fn new(new: NewActivity) -> ResultEngine<Self> {
        let title = normalize_required_text(&new.title, "activity title")?;
        validate_times(new.start_time, new.end_time)?;

        Ok(Self {
            id: Uuid::new_v4(),
            trip_id: new.trip_id,
            day_id: new.day_id,
            title,
            start_time: new.start_time,
            end_time: new.end_time,
            location: normalize_optional_text(new.location.as_deref()),
            notes: normalize_optional_text(new.notes.as_deref()),
            category: new.category,
            coordinates: new.coordinates,
        })
    }
}

fn validate_times(start: NaiveTime, end: Option<NaiveTime>) -> ResultEngine<()> {
    if let Some(end) = end
        && end < start
    {
        return Err(EngineError::Validation(format!(
            "activity ends at {} before it starts at {}",
            end.format(hhmm::FORMAT),
            start.format(hhmm::FORMAT)
        )));
    }
    Ok(())
}

/// Order activities by start time, the order a day is read in.
pub(crate) fn by_start_time(a: &Activity, b: &Activity) -> Ordering {
    a.start_time.cmp(&b.start_time)
}

impl Record for Activity {
    const KIND: &'static str = "activity";
    type Patch = ActivityPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn belongs_to(&self, key: ForeignKey) -> bool {
        match key {
            ForeignKey::Trip(trip_id) => self.trip_id == trip_id,
            ForeignKey::Day(day_id) => self.day_id == day_id,
        }
    }

    fn order_under(key: ForeignKey, a: &Self, b: &Self) -> Ordering {
        match key {
            ForeignKey::Day(_) => by_start_time(a, b),
            ForeignKey::Trip(_) => Ordering::Equal,
        }
    }

    fn apply(&mut self, patch: ActivityPatch) -> ResultEngine<()> {
        if let Some(title) = patch.title {
            self.title = normalize_required_text(&title, "activity title")?;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        validate_times(self.start_time, self.end_time)?;
        if let Some(location) = patch.location {
            self.location = normalize_optional_text(location.as_deref());
        }
        if let Some(notes) = patch.notes {
            self.notes = normalize_optional_text(notes.as_deref());
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(coordinates) = patch.coordinates {
            self.coordinates = coordinates;
        }
        Ok(())
    }
}

/// Parse a wall clock time written as `HH:MM`. A trailing `:SS` is accepted.
pub fn parse_time(value: &str) -> ResultEngine<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, hhmm::FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| EngineError::Validation(format!("invalid time \"{value}\", expected HH:MM")))
}

/// `HH:MM` serde representation for `NaiveTime`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => serializer.collect_str(&time.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => crate::activity::parse_time(&raw)
                    .map(Some)
                    .map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}
