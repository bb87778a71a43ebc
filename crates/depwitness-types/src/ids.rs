//! Stable identifiers for failure codes.
//!
//! `code` is a short snake_case discriminator carried by receipts and accepted by `explain`.

pub const CODE_MALFORMED_PATH: &str = "malformed_path";
pub const CODE_MALFORMED_ASSERTION: &str = "malformed_assertion";
pub const CODE_MISSING_DEPENDENCY: &str = "missing_dependency";
pub const CODE_CHECKSUM_MISMATCH: &str = "checksum_mismatch";
pub const CODE_UNREADABLE_FILE: &str = "unreadable_file";
pub const CODE_CONFLICTING_DIGEST: &str = "conflicting_digest";

// Tool-level
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
