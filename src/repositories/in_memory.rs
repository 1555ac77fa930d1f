use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entities::Record;
use crate::errors::RepoErr;
use crate::repositories::Store;

#[derive(Clone)]
pub struct InMemoryStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl<T: Record> Store<T> for InMemoryStore<T> {
    async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: &str) -> Option<T> {
        let items = self.inner.read().await;
        items.iter().find(|r| r.id() == id).cloned()
    }

    async fn insert(&self, record: T) -> Result<T, RepoErr> {
        let mut items = self.inner.write().await;
        if items.iter().any(|r| r.id() == record.id()) {
            return Err(RepoErr::DuplicateId(record.id().to_string()));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, record: T) -> Result<T, RepoErr> {
        let mut items = self.inner.write().await;
        let slot = items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RepoErr::NotFound(id.to_string()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoErr> {
        let mut items = self.inner.write().await;
        let idx = items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RepoErr::NotFound(id.to_string()))?;
        items.remove(idx);
        Ok(())
    }
}
