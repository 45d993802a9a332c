//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every other crate agrees on:
//! - Unified error type and HTTP status classification
//! - Typed UUID identifiers
//! - Pagination request/response primitives
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod page;
