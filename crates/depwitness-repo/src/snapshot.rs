use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use depwitness_domain::model::{
    ConfigurationModel, DependencyEdge, ProjectModel, RequestedSelector, ResolvedArtifact,
    Resolution,
};
use depwitness_types::ModuleCoordinate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SCHEMA_SNAPSHOT_V1: &str = "depwitness.snapshot.v1";

/// The host build's view of one project, exported as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResolutionSnapshotV1 {
    /// Optional schema string for tooling (`depwitness.snapshot.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project name, used to scope configuration names.
    pub project: String,

    #[serde(default)]
    pub configurations: Vec<ConfigurationSnapshot>,

    /// Configurations of the build script classpath.
    #[serde(default)]
    pub buildscript: Vec<ConfigurationSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationSnapshot {
    pub name: String,

    #[serde(default = "default_resolvable")]
    pub resolvable: bool,

    #[serde(default)]
    pub extends_from: Vec<String>,

    /// First-level dependency edges, as requested.
    #[serde(default)]
    pub dependencies: Vec<DependencySnapshot>,

    /// Every resolved artifact, transitive ones included.
    #[serde(default)]
    pub artifacts: Vec<ArtifactSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DependencySnapshot {
    Module(ModuleCoordinate),
    Project(String),
    Files(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ArtifactSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleCoordinate>,
    /// Absolute, or relative to the artifact root.
    pub path: String,
}

fn default_resolvable() -> bool {
    true
}

pub fn parse_snapshot_json(text: &str) -> anyhow::Result<ResolutionSnapshotV1> {
    let snapshot: ResolutionSnapshotV1 =
        serde_json::from_str(text).context("parse resolution snapshot")?;
    if let Some(schema) = snapshot.schema.as_deref()
        && schema != SCHEMA_SNAPSHOT_V1
    {
        anyhow::bail!("unsupported snapshot schema: {schema} (expected {SCHEMA_SNAPSHOT_V1})");
    }
    if snapshot.project.trim().is_empty() {
        anyhow::bail!("snapshot project name is empty");
    }
    ensure_unique_names(&snapshot.configurations).context("configurations")?;
    ensure_unique_names(&snapshot.buildscript).context("buildscript configurations")?;
    Ok(snapshot)
}

fn ensure_unique_names(configurations: &[ConfigurationSnapshot]) -> anyhow::Result<()> {
    let mut seen = BTreeSet::new();
    for c in configurations {
        if !seen.insert(c.name.as_str()) {
            anyhow::bail!("duplicate configuration name: {}", c.name);
        }
    }
    Ok(())
}

/// Convert a parsed snapshot into the domain model, anchoring relative artifact paths at
/// `artifact_root`.
pub fn into_project_model(snapshot: ResolutionSnapshotV1, artifact_root: &Utf8Path) -> ProjectModel {
    let convert = |configs: Vec<ConfigurationSnapshot>| -> Vec<ConfigurationModel> {
        configs
            .into_iter()
            .map(|c| into_configuration(c, artifact_root))
            .collect()
    };
    ProjectModel {
        name: snapshot.project,
        configurations: convert(snapshot.configurations),
        buildscript: convert(snapshot.buildscript),
    }
}

fn into_configuration(c: ConfigurationSnapshot, artifact_root: &Utf8Path) -> ConfigurationModel {
    let dependencies = c
        .dependencies
        .into_iter()
        .map(|d| DependencyEdge {
            requested: match d {
                DependencySnapshot::Module(m) => RequestedSelector::Module(m),
                DependencySnapshot::Project(p) => RequestedSelector::Project(p),
                DependencySnapshot::Files(f) => RequestedSelector::Files(f),
            },
        })
        .collect();

    let artifacts = c
        .artifacts
        .into_iter()
        .map(|a| ResolvedArtifact {
            module: a.module,
            path: anchor(&a.path, artifact_root),
        })
        .collect();

    ConfigurationModel {
        name: c.name,
        resolvable: c.resolvable,
        extends_from: c.extends_from,
        resolution: Resolution {
            dependencies,
            artifacts,
        },
    }
}

fn anchor(path: &str, root: &Utf8Path) -> Utf8PathBuf {
    let path = Utf8Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
