//! Pure verification logic (no IO).
//!
//! Input: a project model constructed elsewhere plus an [`ArtifactDigester`] that knows how
//! to hash artifact files.
//! Output: the aggregated dependency digest map, verification results, and the per
//! configuration graph report.

#![forbid(unsafe_code)]

pub mod collect;
pub mod error;
pub mod graph;
pub mod identity;
pub mod model;
pub mod policy;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{
    build_hash_map, check_assertions, emit_assertions, parse_assertion, render_assertions, verify,
    verify_against, Assertion, DependencyHashMap, DigestConflict, HashMapBuild, ScanStats, Verification,
};
pub use error::WitnessError;
pub use graph::{describe_configurations, ConfigurationInfo};

use camino::Utf8Path;
use depwitness_types::ContentDigest;

/// Computes the content digest of an artifact file.
///
/// Implemented by the IO layer; the domain only wraps failures into
/// [`WitnessError::UnreadableFile`].
pub trait ArtifactDigester {
    fn digest(&self, path: &Utf8Path) -> std::io::Result<ContentDigest>;
}
