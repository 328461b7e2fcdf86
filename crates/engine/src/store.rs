//! Session storage for the four entity kinds.
//!
//! Every kind lives in its own keyed collection behind the [`Repository`]
//! trait. [`MemoryRepository`] keeps records in memory and simulates remote
//! I/O latency before every operation; a networked store can implement the
//! same trait. Returned records are always owned clones, so callers can never
//! reach stored state through a value they received.

use std::{cmp::Ordering, fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{Activity, Expense, Fixtures, ItineraryDay, ResultEngine, Trip};

mod memory;

pub use memory::MemoryRepository;

/// Parent reference used to select child records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    Trip(Uuid),
    Day(Uuid),
}

/// A record kind the store can hold.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human readable kind, used in errors and logs.
    const KIND: &'static str;

    /// Partial update merged by [`Repository::update`].
    type Patch: Send + 'static;

    fn id(&self) -> Uuid;

    /// Whether the record is a child of `key`.
    fn belongs_to(&self, key: ForeignKey) -> bool;

    /// Ordering of the children selected by `key`. The sort is stable, so
    /// `Equal` keeps insertion order.
    fn order_under(_key: ForeignKey, _a: &Self, _b: &Self) -> Ordering {
        Ordering::Equal
    }

    /// Shallow merge: fields absent from `patch` are preserved. On error the
    /// store discards the partially patched copy.
    fn apply(&mut self, patch: Self::Patch) -> ResultEngine<()>;
}

/// Atomic read-modify-write step run by [`Repository::modify`].
pub type Mutation<R> = Box<dyn FnOnce(&mut R) -> ResultEngine<()> + Send>;

/// Asynchronous keyed collection of one record kind.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Snapshot of every record, in insertion order.
    async fn list(&self) -> ResultEngine<Vec<R>>;

    /// The record, or `None` when the id is absent.
    async fn get(&self, id: Uuid) -> ResultEngine<Option<R>>;

    /// Children of `key`, ordered by [`Record::order_under`].
    async fn list_by(&self, key: ForeignKey) -> ResultEngine<Vec<R>>;

    /// Append a new record. Fails with `ExistingKey` on an id collision.
    async fn insert(&self, record: R) -> ResultEngine<R>;

    /// Merge `patch` into the record. Fails with `NotFound` if absent.
    async fn update(&self, id: Uuid, patch: R::Patch) -> ResultEngine<R>;

    /// Run `mutation` on the stored record while holding the collection
    /// lock, so concurrent read-modify-write cycles cannot lose updates.
    async fn modify(&self, id: Uuid, mutation: Mutation<R>) -> ResultEngine<R>;

    /// Remove the record. Fails with `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> ResultEngine<R>;

    /// Remove every child of `key`, returning what was removed.
    async fn delete_by(&self, key: ForeignKey) -> ResultEngine<Vec<R>>;
}

/// Store operation, used to pick the simulated delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    ListBy,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Nominal delay in milliseconds.
    #[must_use]
    pub const fn nominal_millis(self) -> u64 {
        match self {
            Operation::List => 300,
            Operation::Get => 200,
            Operation::ListBy => 250,
            Operation::Create => 400,
            Operation::Update => 300,
            Operation::Delete => 250,
        }
    }
}

/// Simulated I/O latency, expressed as a percentage of the nominal delays.
///
/// The delay is a `tokio::time::sleep`: it suspends the calling task only and
/// cannot be interrupted once the operation has started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    percent: u32,
}

impl Latency {
    /// The nominal delays (200 to 400 ms).
    #[must_use]
    pub const fn nominal() -> Self {
        Self { percent: 100 }
    }

    /// No delay at all; operations resolve without suspending.
    #[must_use]
    pub const fn none() -> Self {
        Self { percent: 0 }
    }

    #[must_use]
    pub const fn scaled(percent: u32) -> Self {
        Self { percent }
    }

    #[must_use]
    pub const fn percent(self) -> u32 {
        self.percent
    }

    #[must_use]
    pub fn delay(self, operation: Operation) -> Duration {
        Duration::from_millis(operation.nominal_millis() * u64::from(self.percent) / 100)
    }

    pub async fn wait(self, operation: Operation) {
        let delay = self.delay(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::nominal()
    }
}

/// The four collections of a session.
///
/// A store is created once (empty or from fixtures) and injected into the
/// `Engine`; dropping it discards the session state.
#[derive(Clone)]
pub struct Store {
    pub trips: Arc<dyn Repository<Trip>>,
    pub days: Arc<dyn Repository<ItineraryDay>>,
    pub activities: Arc<dyn Repository<Activity>>,
    pub expenses: Arc<dyn Repository<Expense>>,
}

impl Store {
    /// Empty in-memory store.
    #[must_use]
    pub fn in_memory(latency: Latency) -> Self {
        Self::seeded(Fixtures::default(), latency)
    }

    /// In-memory store holding the given fixture records.
    #[must_use]
    pub fn seeded(fixtures: Fixtures, latency: Latency) -> Self {
        let Fixtures {
            trips,
            itinerary_days,
            activities,
            expenses,
        } = fixtures;

        Self {
            trips: Arc::new(MemoryRepository::with_records(trips, latency)),
            days: Arc::new(MemoryRepository::with_records(itinerary_days, latency)),
            activities: Arc::new(MemoryRepository::with_records(activities, latency)),
            expenses: Arc::new(MemoryRepository::with_records(expenses, latency)),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::in_memory(Latency::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_scales_nominal_delays() {
        assert_eq!(
            Latency::nominal().delay(Operation::Create),
            Duration::from_millis(400)
        );
        assert_eq!(
            Latency::scaled(50).delay(Operation::Get),
            Duration::from_millis(100)
        );
        assert!(Latency::none().delay(Operation::Update).is_zero());
    }
}
