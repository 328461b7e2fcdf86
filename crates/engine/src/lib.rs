//! Trip planning engine.
//!
//! The engine keeps trips, itinerary days, activities and expenses in a
//! [`Store`] and exposes every operation on [`Engine`]:
//!
//! - creating a trip lays out one itinerary day per calendar day;
//! - creating an activity links it into its day's embedded list;
//! - budget summaries aggregate a trip's expenses per category.

pub use activity::{Activity, ActivityCategory, ActivityPatch, Coordinates, NewActivity, hhmm, parse_time};
pub use budget::{BudgetStatus, BudgetSummary, RECENT_EXPENSES, recent, summarize};
pub use currency::Currency;
pub use error::EngineError;
pub use expense::{Expense, ExpenseCategory, ExpensePatch, NewExpense};
pub use fixtures::Fixtures;
pub use itinerary::{ItineraryDay, ItineraryDayPatch, NewItineraryDay, plan_days, plan_for_trip};
pub use money::Money;
pub use ops::{Engine, EngineBuilder, TripOverview};
pub use store::{
    ForeignKey, Latency, MemoryRepository, Mutation, Operation, Record, Repository, Store,
};
pub use trip::{DEFAULT_COVER_IMAGE, MAX_TRIP_DAYS, NewTrip, Trip, TripPatch};

mod activity;
pub mod budget;
mod currency;
mod error;
mod expense;
mod fixtures;
mod itinerary;
mod money;
mod ops;
pub mod store;
mod trip;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
