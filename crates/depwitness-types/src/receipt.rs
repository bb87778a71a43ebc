use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for verification receipts.
pub const SCHEMA_REPORT_V1: &str = "depwitness.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Counters describing what one verification run looked at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationData {
    pub project: String,
    pub configurations_scanned: u32,
    pub configurations_excluded: u32,
    /// Configurations skipped because they cannot be resolved.
    #[serde(default)]
    pub configurations_unresolvable: u32,
    /// Direct dependency artifacts read and hashed, counting repeats across configurations.
    #[serde(default)]
    pub artifacts_hashed: u32,
    /// Distinct dependency keys in the aggregated map.
    pub dependencies_hashed: u32,
    pub assertions_checked: u32,
    /// Keys whose digest differed between configurations (first-writer-wins was applied).
    #[serde(default)]
    pub digest_conflicts: u32,
}

/// The failure that stopped a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Failure {
    pub code: String,
    pub message: String,
}

/// `depwitness.report.v1` receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub data: VerificationData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}
