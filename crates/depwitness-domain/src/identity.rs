//! Identity derivation from the module cache layout.

use crate::error::WitnessError;
use camino::{Utf8Component, Utf8Path};
use depwitness_types::DependencyKey;

/// Number of trailing segments in `group/name/version/checksum/file`.
const LAYOUT_SEGMENTS: usize = 5;

/// Derive the identity key of a cached artifact from its path.
///
/// Only the last five segments matter. The checksum segment is discarded: it may be a
/// transport hash rather than a content hash, and the engine computes its own digest.
/// The kept segments must not contain `:`, the assertion field separator.
pub fn derive_key(path: &Utf8Path) -> Result<DependencyKey, WitnessError> {
    let segments: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Utf8Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect();

    if segments.len() < LAYOUT_SEGMENTS {
        return Err(WitnessError::MalformedPath {
            path: path.to_path_buf(),
        });
    }

    let tail = &segments[segments.len() - LAYOUT_SEGMENTS..];
    let kept = [tail[0], tail[1], tail[2], tail[4]];
    if kept.iter().any(|segment| segment.contains(':')) {
        return Err(WitnessError::MalformedPath {
            path: path.to_path_buf(),
        });
    }
    Ok(DependencyKey::new(tail[0], tail[1], tail[2], tail[4]))
}
