//! `sakila-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, input sanitization/validation, and pagination math.

pub mod error;
pub mod page;
pub mod sanitize;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use page::{PageParams, Pagination};
