//! The `generate` use case: compute assertions for the current resolution.

use crate::input::{load_inputs, WitnessInput};
use anyhow::Context;
use depwitness_repo::FileDigester;
use toml_edit::{Array, DocumentMut};

/// Output from the generate use case.
#[derive(Clone, Debug)]
pub struct GenerateOutput {
    /// `group:name:version:file:digest` lines in canonical key order.
    pub assertions: Vec<String>,
    /// The paste-ready `dependencyVerification` block.
    pub block: String,
}

/// Aggregate the project (honoring exclusions) and render every dependency as an assertion.
pub fn run_generate(input: WitnessInput<'_>) -> anyhow::Result<GenerateOutput> {
    let (project, resolved) = load_inputs(&input)?;
    let assertions =
        depwitness_domain::emit_assertions(&project, &resolved.policy, &FileDigester)
            .context("generate assertions")?;
    tracing::info!(
        project = %project.name,
        assertions = assertions.len(),
        "generated dependency assertions"
    );
    let block = depwitness_render::render_assertion_block(&assertions);
    Ok(GenerateOutput { assertions, block })
}

/// Replace the `verify` array of a config document, keeping every other key, comment, and
/// its formatting.
pub fn update_config_assertions(config_text: &str, assertions: &[String]) -> anyhow::Result<String> {
    let mut doc: DocumentMut = config_text.parse().context("parse config for update")?;

    let mut array = Array::new();
    for assertion in assertions {
        array.push(assertion.as_str());
    }
    for value in array.iter_mut() {
        value.decor_mut().set_prefix("\n    ");
    }
    if !array.is_empty() {
        array.set_trailing_comma(true);
        array.set_trailing("\n");
    }

    doc["verify"] = toml_edit::value(array);
    Ok(doc.to_string())
}
