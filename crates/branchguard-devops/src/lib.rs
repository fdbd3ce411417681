//! Azure DevOps adapter: the four list endpoints the audit needs, over blocking HTTP.
//!
//! This crate does network IO and nothing else. It implements
//! [`branchguard_domain::PolicySource`] so the traversal logic stays testable without a server.

#![forbid(unsafe_code)]

mod client;
mod decode;
mod endpoints;

pub use client::{ClientConfig, DevOpsClient};
pub use decode::{decode_collection, strip_bom};
pub use endpoints::Endpoints;

/// Fuzz-friendly API for testing payload decoding without a server.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use branchguard_types::{Branch, PolicyConfiguration, Project, Repository};

    /// Decode arbitrary text as each of the four collection payloads.
    ///
    /// Returns the number of payload kinds that decoded successfully. **Never panics.**
    pub fn decode_all(text: &str) -> usize {
        let url = "fuzz://payload";
        [
            super::decode_collection::<Project>(url, text).is_ok(),
            super::decode_collection::<Repository>(url, text).is_ok(),
            super::decode_collection::<Branch>(url, text).is_ok(),
            super::decode_collection::<PolicyConfiguration>(url, text).is_ok(),
        ]
        .iter()
        .filter(|ok| **ok)
        .count()
    }
}
