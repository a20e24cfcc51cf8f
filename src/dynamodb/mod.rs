//! Helpers for DynamoDB-backed handlers
//!
//! Cursor encoding for `LastEvaluatedKey` and conversion between typed
//! records and store items.

pub mod item;
pub mod pagination;

pub use item::{from_item, to_item, Item};
pub use pagination::{decode_pagination_token, encode_pagination_token};
