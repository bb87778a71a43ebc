use camino::Utf8PathBuf;
use depwitness_types::{ids, ContentDigest, DependencyKey};

/// Every failure the verification core can raise. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    #[error("artifact path does not follow group/name/version/checksum/file: {path}")]
    MalformedPath { path: Utf8PathBuf },

    #[error("invalid dependency assertion (expected group:name:version:file:digest): {assertion}")]
    MalformedAssertion { assertion: String },

    #[error("no dependency found for {short} ({assertion})")]
    MissingDependency { assertion: String, short: String },

    #[error("checksum mismatch for {key}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        key: DependencyKey,
        expected: String,
        actual: ContentDigest,
    },

    #[error("unable to read artifact {path}: {source}")]
    UnreadableFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conflicting digests for {key}: {first} vs {second}")]
    ConflictingDigest {
        key: DependencyKey,
        first: ContentDigest,
        second: ContentDigest,
    },
}

impl WitnessError {
    /// Stable code for receipts and `explain`.
    pub fn code(&self) -> &'static str {
        match self {
            WitnessError::MalformedPath { .. } => ids::CODE_MALFORMED_PATH,
            WitnessError::MalformedAssertion { .. } => ids::CODE_MALFORMED_ASSERTION,
            WitnessError::MissingDependency { .. } => ids::CODE_MISSING_DEPENDENCY,
            WitnessError::ChecksumMismatch { .. } => ids::CODE_CHECKSUM_MISMATCH,
            WitnessError::UnreadableFile { .. } => ids::CODE_UNREADABLE_FILE,
            WitnessError::ConflictingDigest { .. } => ids::CODE_CONFLICTING_DIGEST,
        }
    }
}
