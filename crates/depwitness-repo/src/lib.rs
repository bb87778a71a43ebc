//! Filesystem adapters: load resolution snapshots and hash artifact files.
//!
//! This crate is allowed to do filesystem IO. It never resolves dependencies itself; the
//! host build exports what it resolved as a snapshot and this crate only reads it.

#![forbid(unsafe_code)]

mod digest;
mod snapshot;

use anyhow::Context;
use camino::Utf8Path;
use depwitness_domain::model::ProjectModel;

pub use digest::{sha256_file, FileDigester};
pub use snapshot::{
    into_project_model, parse_snapshot_json, ArtifactSnapshot, ConfigurationSnapshot,
    DependencySnapshot, ResolutionSnapshotV1, SCHEMA_SNAPSHOT_V1,
};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a resolution snapshot and convert it to the domain model.
    ///
    /// **Never panics** on any input.
    pub fn parse_snapshot(text: &str) -> anyhow::Result<()> {
        let snapshot = parse_snapshot_json(text)?;
        let _ = into_project_model(snapshot, Utf8Path::new("/fuzz"));
        Ok(())
    }
}

/// Load the project model the host build exported to `snapshot_path`.
///
/// Relative artifact paths resolve against `artifact_root`, defaulting to the snapshot's
/// directory.
pub fn load_project(
    snapshot_path: &Utf8Path,
    artifact_root: Option<&Utf8Path>,
) -> anyhow::Result<ProjectModel> {
    let text = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("read {}", snapshot_path))?;
    let snapshot =
        parse_snapshot_json(&text).with_context(|| format!("parse {}", snapshot_path))?;

    let root = match artifact_root {
        Some(root) => root.to_path_buf(),
        None => snapshot_path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or(Utf8Path::new("."))
            .to_path_buf(),
    };

    let model = into_project_model(snapshot, &root);
    tracing::debug!(
        project = %model.name,
        configurations = model.configurations.len(),
        buildscript = model.buildscript.len(),
        "loaded resolution snapshot"
    );
    Ok(model)
}
