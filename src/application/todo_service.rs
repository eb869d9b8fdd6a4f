use crate::domain::store::{TodoStore, WriteConflict};
use crate::domain::todo_item::{TodoItem, TodoItemDto, TodoItemUpdateDto};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<TodoItemDto>>;
    async fn get(&self, id: i64) -> Result<Option<TodoItemDto>>;
    async fn create(&self, dto: TodoItemDto) -> Result<Option<TodoItemDto>>;
    async fn update(&self, id: i64, dto: TodoItemDto) -> Result<bool>;
    async fn partial_update(&self, id: i64, patch: TodoItemUpdateDto) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoServiceImpl<S> {
    pub fn new(store: S) -> Self { Self { store } }

    /// Commits a mutated row. A save that touches no rows means the row
    /// vanished between lookup and write: a concurrent delete becomes
    /// `false`, anything else is a [`WriteConflict`].
    async fn commit(&self, item: &TodoItem) -> Result<bool> {
        if self.store.save(item).await? == 0 {
            if self.store.exists(item.id).await? {
                return Err(WriteConflict { id: item.id }.into());
            }
            return Ok(false);
        }
        Ok(true)
    }
}

#[async_trait]
impl<S: TodoStore> TodoService for TodoServiceImpl<S> {
    async fn list(&self) -> Result<Vec<TodoItemDto>> {
        Ok(self.store.list().await?.into_iter().map(item_to_dto).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItemDto>> {
        Ok(self.store.find(id).await?.map(item_to_dto))
    }

    async fn create(&self, dto: TodoItemDto) -> Result<Option<TodoItemDto>> {
        // The store owns id assignment; whatever the client sent is ignored.
        let item = self.store.insert(dto.name, dto.is_completed).await?;
        Ok(Some(item_to_dto(item)))
    }

    async fn update(&self, id: i64, dto: TodoItemDto) -> Result<bool> {
        let Some(mut item) = self.store.find(id).await? else { return Ok(false) };
        item.name = dto.name;
        item.is_completed = dto.is_completed;
        self.commit(&item).await
    }

    async fn partial_update(&self, id: i64, patch: TodoItemUpdateDto) -> Result<bool> {
        let Some(mut item) = self.store.find(id).await? else { return Ok(false) };
        if let Some(name) = patch.name { item.name = name; }
        if let Some(is_completed) = patch.is_completed { item.is_completed = is_completed; }
        self.commit(&item).await
    }

    async fn delete(&self, id: i64) -> Result<bool> { self.store.remove(id).await }
}

fn item_to_dto(item: TodoItem) -> TodoItemDto {
    TodoItemDto { id: item.id, name: item.name, is_completed: item.is_completed }
}
