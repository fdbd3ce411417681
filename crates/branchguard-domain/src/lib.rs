//! Audit traversal and branch classification (no network IO).
//!
//! Input: a [`PolicySource`] implemented elsewhere (the HTTP client, or an in-memory fake).
//! Output: per-repository classification buckets plus any captured request errors.

#![forbid(unsafe_code)]

pub mod classify;
pub mod policy;
pub mod source;

mod engine;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

#[cfg(test)]
mod proptest;

pub use engine::{audit, DomainAudit};
pub use policy::ErrorPolicy;
pub use source::PolicySource;
