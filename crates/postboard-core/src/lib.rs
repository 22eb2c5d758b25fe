//! # Postboard Core
//!
//! The domain layer of Postboard.
//! Posts, the query engine that lists and searches them, and the ports the
//! infrastructure implements. No I/O happens in this crate.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;
pub mod service;

pub use error::{DomainError, FieldError, StoreError};
pub use service::PostService;
