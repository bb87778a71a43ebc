//! Explain registry for failure codes.
//!
//! Maps codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a failure code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the failure.
    pub title: &'static str,
    /// What the failure means and why the run stopped.
    pub description: &'static str,
    /// How to resolve it.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that triggers the failure.
    pub before: &'static str,
    /// Configuration that passes.
    pub after: &'static str,
}

/// Look up an explanation by code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CODE_MALFORMED_PATH => Some(explain_malformed_path()),
        ids::CODE_MALFORMED_ASSERTION => Some(explain_malformed_assertion()),
        ids::CODE_MISSING_DEPENDENCY => Some(explain_missing_dependency()),
        ids::CODE_CHECKSUM_MISMATCH => Some(explain_checksum_mismatch()),
        ids::CODE_UNREADABLE_FILE => Some(explain_unreadable_file()),
        ids::CODE_CONFLICTING_DIGEST => Some(explain_conflicting_digest()),
        _ => None,
    }
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MALFORMED_PATH,
        ids::CODE_MALFORMED_ASSERTION,
        ids::CODE_MISSING_DEPENDENCY,
        ids::CODE_CHECKSUM_MISMATCH,
        ids::CODE_UNREADABLE_FILE,
        ids::CODE_CONFLICTING_DIGEST,
    ]
}

fn explain_malformed_path() -> Explanation {
    Explanation {
        title: "Malformed Artifact Path",
        description: "\
A resolved artifact does not live under the expected cache layout
`.../group/name/version/checksum/file`, or one of its group, name, version, or file
segments contains `:`, so its identity cannot be derived or written as an assertion.

Artifacts that were not resolved through the dependency cache (copied in by hand,
produced by another task) cannot be pinned and are rejected rather than skipped.",
        remediation: "\
Resolve the dependency through the build's module cache, or exclude the configuration
that pulls the artifact in if it is intentionally outside verification.",
        examples: ExamplePair {
            before: r#"artifacts = [{ path = "libs/lib-1.0.jar", ... }]"#,
            after: r#"artifacts = [{ path = "caches/com.example/lib/1.0/5f2c.../lib-1.0.jar", ... }]"#,
        },
    }
}

fn explain_malformed_assertion() -> Explanation {
    Explanation {
        title: "Malformed Assertion",
        description: "\
An entry in `verify` does not split into exactly five colon-separated fields
`group:name:version:file:digest`. A malformed entry never matches or mismatches silently.",
        remediation: "\
Regenerate the list with `depwitness generate --write`, or fix the entry by hand.",
        examples: ExamplePair {
            before: r#"verify = ["com.example:lib:1.0:5f2c..."]"#,
            after: r#"verify = ["com.example:lib:1.0:lib-1.0.jar:5f2c..."]"#,
        },
    }
}

fn explain_missing_dependency() -> Explanation {
    Explanation {
        title: "No Dependency Found",
        description: "\
An assertion names a dependency artifact that no verified configuration resolves.

The dependency was removed, renamed, upgraded, or the assertion contains a typo.",
        remediation: "\
If the dependency change was intentional, regenerate assertions with
`depwitness generate --write` and review the diff. Otherwise fix the assertion.",
        examples: ExamplePair {
            before: r#"verify = ["com.example:lib:1.0:lib-1.0.jar:5f2c..."]  # build now resolves 1.1"#,
            after: r#"verify = ["com.example:lib:1.1:lib-1.1.jar:9a41..."]"#,
        },
    }
}

fn explain_checksum_mismatch() -> Explanation {
    Explanation {
        title: "Checksum Mismatch",
        description: "\
The SHA-256 digest of a resolved artifact differs from the pinned digest.

This is the tampering signal: the same group:name:version:file now has different bytes.
A mirror served different content, the local cache is corrupt, or the artifact was replaced.",
        remediation: "\
Do not update the assertion until the new content is understood. Clear the local cache
entry and resolve again; if the digest still differs, compare against the upstream
publication before accepting it.",
        examples: ExamplePair {
            before: r#"verify = ["com.example:lib:1.0:lib-1.0.jar:0000..."]"#,
            after: r#"verify = ["com.example:lib:1.0:lib-1.0.jar:5f2c..."]"#,
        },
    }
}

fn explain_unreadable_file() -> Explanation {
    Explanation {
        title: "Unreadable Artifact",
        description: "\
A resolved artifact file could not be read while computing its digest.",
        remediation: "\
Check that the file exists and is readable, and that the snapshot's paths resolve against
the right cache root (`--cache-root`).",
        examples: ExamplePair {
            before: "depwitness verify  # snapshot paths relative to another machine",
            after: "depwitness --cache-root ~/.gradle/caches/modules-2/files-2.1 verify",
        },
    }
}

fn explain_conflicting_digest() -> Explanation {
    Explanation {
        title: "Conflicting Digest",
        description: "\
Two configurations resolve the same dependency key to files with different contents.

Only the first configuration's digest is kept; this failure is raised when
`fail_on_conflict = true`.",
        remediation: "\
Find which configuration resolves the divergent file (run `depwitness graph`) and repair
its cache entry, or disable `fail_on_conflict` to keep first-writer-wins behaviour.",
        examples: ExamplePair {
            before: "fail_on_conflict = true",
            after: "fail_on_conflict = false",
        },
    }
}
