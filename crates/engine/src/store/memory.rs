use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

use super::{ForeignKey, Latency, Mutation, Operation, Record, Repository};

/// In-memory collection with simulated latency.
///
/// The delay is awaited before the lock is taken, so a slow operation never
/// blocks other tasks; the mutation itself runs under the write lock.
#[derive(Debug)]
pub struct MemoryRepository<R> {
    records: RwLock<Vec<R>>,
    latency: Latency,
}

impl<R: Record> MemoryRepository<R> {
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    #[must_use]
    pub fn with_records(records: Vec<R>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    fn position(records: &[R], id: Uuid) -> ResultEngine<usize> {
        records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| EngineError::not_found(R::KIND, id))
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn list(&self) -> ResultEngine<Vec<R>> {
        self.latency.wait(Operation::List).await;
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> ResultEngine<Option<R>> {
        self.latency.wait(Operation::Get).await;
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn list_by(&self, key: ForeignKey) -> ResultEngine<Vec<R>> {
        self.latency.wait(Operation::ListBy).await;
        let mut children: Vec<R> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.belongs_to(key))
            .cloned()
            .collect();
        children.sort_by(|a, b| R::order_under(key, a, b));
        Ok(children)
    }

    async fn insert(&self, record: R) -> ResultEngine<R> {
        self.latency.wait(Operation::Create).await;
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(EngineError::ExistingKey(record.id().to_string()));
        }
        records.push(record.clone());
        tracing::debug!("{} {} created", R::KIND, record.id());
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> ResultEngine<R> {
        self.latency.wait(Operation::Update).await;
        let mut records = self.records.write().await;
        let index = Self::position(&records, id)?;

        let mut updated = records[index].clone();
        updated.apply(patch)?;
        records[index] = updated.clone();
        tracing::debug!("{} {id} updated", R::KIND);
        Ok(updated)
    }

    async fn modify(&self, id: Uuid, mutation: Mutation<R>) -> ResultEngine<R> {
        self.latency.wait(Operation::Update).await;
        let mut records = self.records.write().await;
        let index = Self::position(&records, id)?;

        let mut updated = records[index].clone();
        mutation(&mut updated)?;
        if updated.id() != id {
            return Err(EngineError::Validation(format!(
                "{} id cannot change",
                R::KIND
            )));
        }
        records[index] = updated.clone();
        tracing::debug!("{} {id} modified", R::KIND);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> ResultEngine<R> {
        self.latency.wait(Operation::Delete).await;
        let mut records = self.records.write().await;
        let index = Self::position(&records, id)?;
        tracing::debug!("{} {id} deleted", R::KIND);
        Ok(records.remove(index))
    }

    async fn delete_by(&self, key: ForeignKey) -> ResultEngine<Vec<R>> {
        self.latency.wait(Operation::Delete).await;
        let mut records = self.records.write().await;
        let (removed, kept): (Vec<R>, Vec<R>) =
            records.drain(..).partition(|record| record.belongs_to(key));
        *records = kept;
        tracing::debug!("{} {} deleted under {key:?}", removed.len(), R::KIND);
        Ok(removed)
    }
}
