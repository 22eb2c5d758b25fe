//! # Postboard Shared
//!
//! Wire types shared by the API server and the `post-client` tool.

pub mod dto;
pub mod response;

pub use response::{ErrorDetail, ErrorResponse};
