//! Fuzz target for assertion, exclusion, and artifact path parsing.
//!
//! Goal: none of the text inputs a user controls should **panic** the parsers.
//! A well-formed assertion must render back to its own text, and every key derived from a
//! path must survive being written as an assertion.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_assertion_parser
//! ```

#![no_main]

use arbitrary::Arbitrary;
use camino::Utf8Path;
use depwitness_domain::identity::derive_key;
use depwitness_domain::parse_assertion;
use depwitness_domain::policy::ExclusionSet;
use depwitness_types::ScopedName;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct WitnessInput {
    assertion: String,
    exclusions: String,
    artifact_path: String,
}

fuzz_target!(|input: WitnessInput| {
    if input.assertion.len() > 1024
        || input.exclusions.len() > 1024
        || input.artifact_path.len() > 1024
    {
        return;
    }

    if let Ok(parsed) = parse_assertion(&input.assertion) {
        let rendered = format!("{}:{}", parsed.key.all(), parsed.digest);
        assert_eq!(rendered, input.assertion);
    }

    let set = ExclusionSet::parse(&input.exclusions);
    for entry in set.entries() {
        let _ = ScopedName::parse(&entry);
    }

    if let Ok(key) = derive_key(Utf8Path::new(&input.artifact_path)) {
        let assertion = format!("{}:00", key.all());
        let reparsed = parse_assertion(&assertion).map(|a| a.key).ok();
        assert_eq!(reparsed, Some(key));
    }
});
