//! Inputs shared by the verify, generate, and graph use cases.

use anyhow::Context;
use camino::Utf8Path;
use depwitness_domain::model::ProjectModel;
use depwitness_settings::{Overrides, ResolvedConfig, WitnessConfigV1};

/// Where the project snapshot lives and how to configure the run.
#[derive(Clone, Debug)]
pub struct WitnessInput<'a> {
    /// Path to the exported resolution snapshot.
    pub snapshot_path: &'a Utf8Path,
    /// Root for relative artifact paths (defaults to the snapshot's directory).
    pub artifact_root: Option<&'a Utf8Path>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Parse config (empty is allowed, defaults apply) and load the project snapshot.
pub fn load_inputs(input: &WitnessInput<'_>) -> anyhow::Result<(ProjectModel, ResolvedConfig)> {
    let cfg = if input.config_text.trim().is_empty() {
        WitnessConfigV1::default()
    } else {
        depwitness_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = depwitness_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let project = load_project(input)?;
    Ok((project, resolved))
}

pub(crate) fn load_project(input: &WitnessInput<'_>) -> anyhow::Result<ProjectModel> {
    depwitness_repo::load_project(input.snapshot_path, input.artifact_root)
        .context("load resolution snapshot")
}
