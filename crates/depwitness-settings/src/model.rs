use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "depwitness.config.v1";

/// `depwitness.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WitnessConfigV1 {
    /// Optional schema string for tooling (`depwitness.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Configuration names or `project:configuration` names to leave unverified.
    /// Excluding a configuration also excludes every configuration extending it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<ExcludeList>,

    /// Fail when two configurations resolve the same artifact key to different content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_conflict: Option<bool>,

    /// Pinned `group:name:version:file:digest` assertions.
    #[serde(default)]
    pub verify: Vec<String>,
}

/// Exclusions as either one comma-separated string or a list of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ExcludeList {
    Csv(String),
    List(Vec<String>),
}

impl ExcludeList {
    pub fn entries(&self) -> Vec<&str> {
        match self {
            ExcludeList::Csv(s) => vec![s.as_str()],
            ExcludeList::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}
