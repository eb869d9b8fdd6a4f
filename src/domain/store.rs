use async_trait::async_trait;

use super::todo_item::TodoItem;

/// A write that affected no rows while the row is still present. Anything
/// other than a concurrent delete is surfaced instead of being collapsed
/// into not-found.
#[derive(Debug, thiserror::Error)]
#[error("write to todo item {id} affected no rows but the row still exists")]
pub struct WriteConflict {
    pub id: i64,
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn insert(&self, name: String, is_completed: bool) -> anyhow::Result<TodoItem>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<TodoItem>>;
    async fn list(&self) -> anyhow::Result<Vec<TodoItem>>;
    /// Persists `name`/`is_completed` for the row matching `item.id`; returns
    /// the number of rows affected so callers can detect a vanished row.
    async fn save(&self, item: &TodoItem) -> anyhow::Result<u64>;
    async fn exists(&self, id: i64) -> anyhow::Result<bool>;
    async fn remove(&self, id: i64) -> anyhow::Result<bool>;
}
