use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{store::TodoStore, todo_item::TodoItem};

#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                is_completed INTEGER NOT NULL,
                secret INTEGER
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, name: String, is_completed: bool) -> Result<TodoItem> {
        let result = sqlx::query("INSERT INTO todo_items (name, is_completed) VALUES (?1, ?2)")
            .bind(&name)
            .bind(is_completed)
            .execute(&*self.pool)
            .await?;
        Ok(TodoItem { id: result.last_insert_rowid(), name, is_completed, secret: None })
    }

    async fn find(&self, id: i64) -> Result<Option<TodoItem>> {
        let row = sqlx::query("SELECT id, name, is_completed, secret FROM todo_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(row_to_item))
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query("SELECT id, name, is_completed, secret FROM todo_items ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn save(&self, item: &TodoItem) -> Result<u64> {
        let result = sqlx::query("UPDATE todo_items SET name = ?2, is_completed = ?3 WHERE id = ?1")
            .bind(item.id)
            .bind(&item.name)
            .bind(item.is_completed)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM todo_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_item(row: SqliteRow) -> TodoItem {
    TodoItem {
        id: row.get("id"),
        name: row.get("name"),
        is_completed: row.get("is_completed"),
        secret: row.get("secret"),
    }
}
