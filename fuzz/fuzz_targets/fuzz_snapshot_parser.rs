//! Fuzz target for resolution snapshot parsing.
//!
//! Goal: parsing and converting a snapshot should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_snapshot_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = depwitness_repo::fuzz::parse_snapshot(text);
    }
});
