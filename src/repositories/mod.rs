pub mod in_memory;

use async_trait::async_trait;

use crate::entities::Record;
use crate::errors::RepoErr;

/// Ordered collection of records, addressed by id.
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    async fn list(&self) -> Vec<T>;
    async fn get(&self, id: &str) -> Option<T>;
    async fn insert(&self, record: T) -> Result<T, RepoErr>;
    /// Replaces the record stored under `id`, keeping its position.
    async fn update(&self, id: &str, record: T) -> Result<T, RepoErr>;
    async fn delete(&self, id: &str) -> Result<(), RepoErr>;
}
