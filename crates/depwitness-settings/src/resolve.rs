use crate::model::{SCHEMA_CONFIG_V1, WitnessConfigV1};
use depwitness_domain::policy::{ExclusionSet, WitnessPolicy};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Extra comma-separated exclusion lists, appended to the configured ones.
    pub exclude: Vec<String>,
    pub fail_on_conflict: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: WitnessPolicy,
    pub assertions: Vec<String>,
}

pub fn resolve_config(
    cfg: WitnessConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let mut exclusions: ExclusionSet = cfg
        .exclude
        .as_ref()
        .map(|e| e.entries().into_iter().collect())
        .unwrap_or_default();
    for list in &overrides.exclude {
        exclusions.extend_from_list(list);
    }

    let fail_on_conflict = overrides
        .fail_on_conflict
        .or(cfg.fail_on_conflict)
        .unwrap_or(false);

    // Assertions are parsed at verification time; only surrounding whitespace is dropped here.
    let assertions = cfg
        .verify
        .iter()
        .map(|a| a.trim().to_string())
        .collect();

    Ok(ResolvedConfig {
        policy: WitnessPolicy {
            exclusions,
            fail_on_conflict,
        },
        assertions,
    })
}
