use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::todo_item::TodoItemDto;

/// Checks a create payload and flattens the outcome into a field → message
/// map; an empty map means the payload is valid. The `isCompleted` presence
/// rule needs no entry here since the field type already guarantees it.
pub fn field_errors(dto: &TodoItemDto) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if let Err(invalid) = dto.validate() {
        for (field, failures) in invalid.field_errors() {
            let Some(failure) = failures.first() else { continue };
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            errors.insert(field.to_string(), message);
        }
    }
    errors
}
