//! Request and response bodies of the HTTP API.
//!
//! Field names are camelCase on the wire. Money travels as a decimal string
//! in the major unit of the trip currency (`"12.50"`), times as `HH:MM`,
//! dates as `YYYY-MM-DD`. Codes (currency, categories) are validated by the
//! server, not here.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that distinguishes "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent is `None`, `null` is `Some(None)`, a value is `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod trip {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TripNew {
        pub name: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub destination: String,
        pub cover_image: Option<String>,
        /// Decimal amount in the trip currency, e.g. `"1500.00"`.
        pub budget: String,
        /// ISO code; `USD` when absent.
        pub currency: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TripUpdate {
        pub name: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub destination: Option<String>,
        pub cover_image: Option<String>,
        /// Read in the currency the trip has after the update.
        pub budget: Option<String>,
        pub currency: Option<String>,
    }

    /// Response of a trip-wide repair pass.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TripReconciled {
        pub repaired_days: usize,
    }
}

pub mod day {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DayNew {
        pub trip_id: Uuid,
        pub date: NaiveDate,
        pub day_number: u32,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DayUpdate {
        pub date: Option<NaiveDate>,
        pub day_number: Option<u32>,
    }

    /// Response of a day repair pass.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayReconciled {
        /// Whether the embedded activity list was out of date.
        pub changed: bool,
    }
}

pub mod activity {
    use uuid::Uuid;

    use super::*;

    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct Coordinates {
        pub lat: f64,
        pub lng: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ActivityNew {
        pub trip_id: Uuid,
        pub day_id: Uuid,
        pub title: String,
        /// `HH:MM`.
        pub start_time: String,
        pub end_time: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        /// `sightseeing` when absent.
        pub category: Option<String>,
        pub coordinates: Option<Coordinates>,
    }

    /// Partial update. `null` clears `endTime`, `location` and `notes`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ActivityUpdate {
        pub title: Option<String>,
        pub start_time: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub end_time: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub location: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub notes: Option<Option<String>>,
        pub category: Option<String>,
        pub coordinates: Option<Coordinates>,
    }
}

pub mod expense {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub trip_id: Uuid,
        pub category: String,
        /// Decimal amount in the trip currency.
        pub amount: String,
        pub description: String,
        pub date: NaiveDate,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub category: Option<String>,
        pub amount: Option<String>,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }
}
