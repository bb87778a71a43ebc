//! Direct module dependency collection for one configuration.

use crate::model::{ConfigurationModel, RequestedSelector};
use camino::Utf8Path;
use depwitness_types::ModuleCoordinate;
use std::collections::BTreeSet;

/// Artifact files of the dependencies a configuration requested directly as modules.
///
/// A configuration's resolved files include transitive dependencies, so the files are
/// filtered down to those owned by a module coordinate that a first-level edge requested.
/// Project and file dependencies are never returned.
pub fn direct_module_dependencies(configuration: &ConfigurationModel) -> BTreeSet<&Utf8Path> {
    let requested: BTreeSet<&ModuleCoordinate> = configuration
        .resolution
        .dependencies
        .iter()
        .filter_map(|edge| match &edge.requested {
            RequestedSelector::Module(coordinate) => Some(coordinate),
            RequestedSelector::Project(_) | RequestedSelector::Files(_) => None,
        })
        .collect();

    if requested.is_empty() {
        return BTreeSet::new();
    }

    configuration
        .resolution
        .artifacts
        .iter()
        .filter(|artifact| {
            artifact
                .module
                .as_ref()
                .is_some_and(|module| requested.contains(module))
        })
        .map(|artifact| artifact.path.as_path())
        .collect()
}
