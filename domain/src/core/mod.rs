//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`id::IdGenerator`]: `<prefix>-<millis>` identifiers
//! - [`string`]: channel-name and avatar helpers

pub mod error;
pub mod id;
pub mod string;
