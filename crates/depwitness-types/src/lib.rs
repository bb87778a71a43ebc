//! Stable DTOs and IDs used across the depwitness workspace.
//!
//! This crate is intentionally boring:
//! - the dependency identity key and its canonical ordering
//! - structured `project:configuration` names
//! - data types for the emitted verification receipt
//! - stable string codes and the explain registry

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod key;
pub mod receipt;
pub mod scope;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use key::{ContentDigest, DependencyKey, ModuleCoordinate};
pub use receipt::{
    Failure, ToolMeta, Verdict, VerificationData, VerificationReport, SCHEMA_REPORT_V1,
};
pub use scope::ScopedName;
