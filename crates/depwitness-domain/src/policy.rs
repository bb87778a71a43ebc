use crate::model::{ConfigurationModel, ProjectModel};
use depwitness_types::ScopedName;
use std::collections::BTreeSet;

/// Configuration names and scoped names excluded from verification.
///
/// Exclusion is hierarchical: a configuration is excluded when it, or anything it extends,
/// is listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
    scoped: BTreeSet<ScopedName>,
}

impl ExclusionSet {
    /// Parse a comma-separated list such as `lint, app:annotationProcessor`.
    pub fn parse(list: &str) -> Self {
        let mut set = Self::default();
        set.extend_from_list(list);
        set
    }

    pub fn extend_from_list(&mut self, list: &str) {
        for entry in list.split(',') {
            self.insert(entry);
        }
    }

    /// Add one entry. Entries containing `:` are scoped names; blank entries are ignored.
    ///
    /// A scoped entry missing its project or configuration half (`:compile`, `app:`) can never
    /// match and is dropped with a warning.
    pub fn insert(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() {
            return;
        }
        if !entry.contains(':') {
            self.names.insert(entry.to_string());
            return;
        }
        match ScopedName::parse(entry) {
            Some(scoped) => {
                self.scoped.insert(scoped);
            }
            None => {
                tracing::warn!(
                    exclusion = entry,
                    "ignoring exclusion without a project or configuration name"
                );
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.scoped.is_empty()
    }

    pub fn matches(&self, name: &ScopedName) -> bool {
        self.names.contains(&name.configuration) || self.scoped.contains(name)
    }

    /// The first entry of `configuration`'s hierarchy that is excluded, if any.
    pub fn excluding_ancestor<'a>(
        &self,
        project: &ProjectModel,
        scope: &'a [ConfigurationModel],
        configuration: &'a ConfigurationModel,
    ) -> Option<&'a str> {
        configuration
            .hierarchy(scope)
            .into_iter()
            .find(|name| self.matches(&project.scoped_name(name)))
    }

    /// Entries that name no configuration of `project` in either scope.
    ///
    /// Parents referenced through `extends_from` count as known even when the scope does not
    /// declare them.
    pub fn unmatched(&self, project: &ProjectModel) -> Vec<String> {
        let known: BTreeSet<&str> = project
            .configurations
            .iter()
            .chain(&project.buildscript)
            .flat_map(|c| std::iter::once(&c.name).chain(&c.extends_from))
            .map(String::as_str)
            .collect();

        let names = self
            .names
            .iter()
            .filter(|name| !known.contains(name.as_str()))
            .cloned();
        let scoped = self
            .scoped
            .iter()
            .filter(|s| s.project != project.name || !known.contains(s.configuration.as_str()))
            .map(ScopedName::to_string);
        names.chain(scoped).collect()
    }

    /// Entries in their textual form, names first.
    pub fn entries(&self) -> Vec<String> {
        self.names
            .iter()
            .cloned()
            .chain(self.scoped.iter().map(ScopedName::to_string))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for entry in iter {
            set.extend_from_list(entry.as_ref());
        }
        set
    }
}

/// Effective knobs for one verification run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessPolicy {
    pub exclusions: ExclusionSet,
    /// Fail instead of warn when two configurations disagree on a key's digest.
    pub fail_on_conflict: bool,
}
