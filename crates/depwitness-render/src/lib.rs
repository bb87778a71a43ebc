//! Rendering utilities for terminal and paste-ready text output.

#![forbid(unsafe_code)]

mod block;
mod graph;
mod model;

pub use block::render_assertion_block;
pub use graph::render_graph_report;
pub use model::RenderableConfiguration;
