//! Fuzz target for Azure DevOps collection payload decoding.
//!
//! Goal: The decoder should **never panic** on any response body.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_collection_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Response bodies are decoded as text before parsing
    let text = String::from_utf8_lossy(data);
    let decoded = branchguard_devops::fuzz::decode_all(&text);
    assert!(decoded <= 4);
});
