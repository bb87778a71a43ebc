//! Per-configuration dependency graph for human inspection.

use crate::collect::direct_module_dependencies;
use crate::error::WitnessError;
use crate::identity::derive_key;
use crate::model::ProjectModel;
use crate::ArtifactDigester;
use depwitness_types::ScopedName;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigurationInfo {
    /// Everything the configuration transitively extends, in hierarchy order.
    pub superconfigurations: Vec<String>,
    /// Sorted `group:name:version:file:digest` lines.
    pub dependencies: Vec<String>,
}

/// Describe every resolvable configuration of the project.
///
/// Exclusions do not apply here; the report is exhaustive.
pub fn describe_configurations(
    project: &ProjectModel,
    digester: &dyn ArtifactDigester,
) -> Result<BTreeMap<ScopedName, ConfigurationInfo>, WitnessError> {
    let mut out = BTreeMap::new();
    let scope = &project.configurations[..];

    for configuration in scope.iter().filter(|c| c.resolvable) {
        let mut dependencies = Vec::new();
        for path in direct_module_dependencies(configuration) {
            let key = derive_key(path)?;
            let digest = digester
                .digest(path)
                .map_err(|source| WitnessError::UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            dependencies.push(format!("{}:{}", key.all(), digest));
        }
        dependencies.sort();

        let superconfigurations = configuration
            .superconfigurations(scope)
            .into_iter()
            .map(str::to_string)
            .collect();

        out.insert(
            project.scoped_name(&configuration.name),
            ConfigurationInfo {
                superconfigurations,
                dependencies,
            },
        );
    }

    Ok(out)
}
