use camino::Utf8PathBuf;
use depwitness_types::{ModuleCoordinate, ScopedName};
use std::collections::BTreeSet;

/// One project as exposed by the host build: its ordinary configurations plus the
/// configurations of its build script classpath.
#[derive(Clone, Debug, Default)]
pub struct ProjectModel {
    pub name: String,
    pub configurations: Vec<ConfigurationModel>,
    pub buildscript: Vec<ConfigurationModel>,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigurationModel {
    pub name: String,
    /// Some configurations exist only to be extended and cannot be resolved.
    pub resolvable: bool,
    /// Direct parents, by name, within the same scope.
    pub extends_from: Vec<String>,
    pub resolution: Resolution,
}

/// What resolving a configuration produced.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// First-level edges of the resolution root.
    pub dependencies: Vec<DependencyEdge>,
    /// Every resolved file, transitive ones included.
    pub artifacts: Vec<ResolvedArtifact>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyEdge {
    pub requested: RequestedSelector,
}

/// What a dependency declaration asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestedSelector {
    Module(ModuleCoordinate),
    Project(String),
    Files(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Owning module; `None` for file and project artifacts.
    pub module: Option<ModuleCoordinate>,
    pub path: Utf8PathBuf,
}

impl ProjectModel {
    /// Ordinary configurations followed by buildscript configurations, each scope in name
    /// order. This is the canonical visiting order for aggregation.
    pub fn canonical_configurations(&self) -> Vec<(&[ConfigurationModel], &ConfigurationModel)> {
        let mut out = Vec::new();
        for scope in [&self.configurations[..], &self.buildscript[..]] {
            let mut sorted: Vec<&ConfigurationModel> = scope.iter().collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            out.extend(sorted.into_iter().map(|c| (scope, c)));
        }
        out
    }

    pub fn scoped_name(&self, configuration: &str) -> ScopedName {
        ScopedName::new(&self.name, configuration)
    }
}

impl ConfigurationModel {
    /// The configuration itself followed by everything it transitively extends.
    ///
    /// Depth-first pre-order over `extends_from`, each name once. Parents missing from
    /// `scope` are listed by name but contribute no ancestors of their own.
    pub fn hierarchy<'a>(&'a self, scope: &'a [ConfigurationModel]) -> Vec<&'a str> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        collect_hierarchy(self.name.as_str(), Some(self), scope, &mut seen, &mut out);
        out
    }

    /// Hierarchy without the configuration itself.
    pub fn superconfigurations<'a>(&'a self, scope: &'a [ConfigurationModel]) -> Vec<&'a str> {
        self.hierarchy(scope).into_iter().skip(1).collect()
    }
}

fn collect_hierarchy<'a>(
    name: &'a str,
    config: Option<&'a ConfigurationModel>,
    scope: &'a [ConfigurationModel],
    seen: &mut BTreeSet<&'a str>,
    out: &mut Vec<&'a str>,
) {
    if !seen.insert(name) {
        return;
    }
    out.push(name);
    let Some(config) = config else { return };
    for parent in &config.extends_from {
        let parent_config = scope.iter().find(|c| &c.name == parent);
        collect_hierarchy(parent.as_str(), parent_config, scope, seen, out);
    }
}
