//! The `graph` use case: describe every configuration for human inspection.

use crate::input::{load_project, WitnessInput};
use anyhow::Context;
use depwitness_render::RenderableConfiguration;
use depwitness_repo::FileDigester;

/// Render the per-configuration report. The config file is not consulted; the report
/// ignores exclusions.
pub fn run_graph(input: WitnessInput<'_>) -> anyhow::Result<String> {
    let project = load_project(&input)?;
    let described = depwitness_domain::describe_configurations(&project, &FileDigester)
        .context("describe configurations")?;

    let configurations: Vec<RenderableConfiguration> = described
        .into_iter()
        .map(|(name, info)| RenderableConfiguration {
            name: name.to_string(),
            superconfigurations: info.superconfigurations,
            dependencies: info.dependencies,
        })
        .collect();

    Ok(depwitness_render::render_graph_report(&configurations))
}
