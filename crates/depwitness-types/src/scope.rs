use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A configuration name qualified by its owning project.
///
/// Compared field by field; the `project:configuration` string form is only produced at
/// the boundary (logs, report output).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ScopedName {
    pub project: String,
    pub configuration: String,
}

impl ScopedName {
    pub fn new(project: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            configuration: configuration.into(),
        }
    }

    /// Parse `project:configuration`. The split happens at the last `:` so project paths
    /// such as `:app:lib` keep their separators.
    pub fn parse(text: &str) -> Option<Self> {
        let (project, configuration) = text.rsplit_once(':')?;
        if project.is_empty() || configuration.is_empty() {
            return None;
        }
        Some(Self::new(project, configuration))
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.configuration)
    }
}
