//! API response envelopes

pub mod response;

pub use response::{ApiResponse, PaginatedResponse};
