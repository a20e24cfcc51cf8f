//! Record <-> item conversion

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Attribute map as read from or written to the table.
pub type Item = Map<String, Value>;

/// Convert a record into an item, dropping attributes whose value is null
/// (DynamoDB has no use for them).
pub fn to_item<R: Serialize + ?Sized>(record: &R) -> Result<Item, ValidationError> {
    match serde_json::to_value(record)? {
        Value::Object(mut item) => {
            item.retain(|_, value| !value.is_null());
            Ok(item)
        }
        _ => Err(ValidationError::NotAnObject),
    }
}

/// Build a typed record from an item. Missing `Option` fields become `None`;
/// missing required fields or mismatched types fail.
pub fn from_item<R: DeserializeOwned>(item: Item) -> Result<R, ValidationError> {
    Ok(serde_json::from_value(Value::Object(item))?)
}
