use crate::model::{
    ConfigurationModel, DependencyEdge, ProjectModel, RequestedSelector, ResolvedArtifact,
};
use crate::ArtifactDigester;
use camino::{Utf8Path, Utf8PathBuf};
use depwitness_types::{ContentDigest, ModuleCoordinate};
use std::collections::BTreeMap;

pub fn config(name: &str, extends_from: &[&str]) -> ConfigurationModel {
    ConfigurationModel {
        name: name.to_string(),
        resolvable: true,
        extends_from: extends_from.iter().map(|s| s.to_string()).collect(),
        resolution: Default::default(),
    }
}

pub fn project(name: &str, configurations: Vec<ConfigurationModel>) -> ProjectModel {
    ProjectModel {
        name: name.to_string(),
        configurations,
        buildscript: Vec::new(),
    }
}

pub fn module_edge(group: &str, name: &str, version: &str) -> DependencyEdge {
    DependencyEdge {
        requested: RequestedSelector::Module(ModuleCoordinate::new(group, name, version)),
    }
}

pub fn artifact(group: &str, name: &str, version: &str, path: &str) -> ResolvedArtifact {
    ResolvedArtifact {
        module: Some(ModuleCoordinate::new(group, name, version)),
        path: Utf8PathBuf::from(path),
    }
}

/// Declare `group:name:version` directly and resolve it to `path`.
pub fn with_module(
    configuration: &mut ConfigurationModel,
    group: &str,
    name: &str,
    version: &str,
    path: &str,
) {
    configuration
        .resolution
        .dependencies
        .push(module_edge(group, name, version));
    configuration
        .resolution
        .artifacts
        .push(artifact(group, name, version, path));
}

/// Digester backed by a fixed path -> digest table; unknown paths are unreadable.
#[derive(Clone, Debug, Default)]
pub struct MemoryDigester {
    digests: BTreeMap<Utf8PathBuf, ContentDigest>,
}

impl MemoryDigester {
    pub fn with(mut self, path: &str, digest: &str) -> Self {
        self.digests
            .insert(Utf8PathBuf::from(path), ContentDigest::new(digest));
        self
    }
}

impl ArtifactDigester for MemoryDigester {
    fn digest(&self, path: &Utf8Path) -> std::io::Result<ContentDigest> {
        self.digests.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}
