use serde::{Deserialize, Serialize};
use validator::Validate;

/// Storage-resident todo item. `id` is assigned by the store, never by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub name: String,
    pub is_completed: bool,
    /// Column exists in the schema but no operation reads or writes it.
    pub secret: Option<bool>,
}

/// Full transfer object; the only shape returned to clients. `secret` stays internal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDto {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Name field is required"))]
    pub name: String,
    // Presence is enforced by the type: a bare bool cannot be absent once
    // deserialization has succeeded.
    pub is_completed: bool,
}

/// Partial-update payload. `id` is only compared against the path; absent
/// fields leave the stored row untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemUpdateDto {
    pub id: i64,
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}
