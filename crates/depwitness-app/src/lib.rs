//! Use case orchestration for depwitness.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings, and render layers. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod generate;
mod graph;
mod input;
mod output;
mod verify;

pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use generate::{run_generate, update_config_assertions, GenerateOutput};
pub use graph::run_graph;
pub use input::{load_inputs, WitnessInput};
pub use output::{
    parse_report_json, runtime_error_report, serialize_report, write_report, write_text,
};
pub use verify::{run_verify, verdict_exit_code, VerifyOutput};
