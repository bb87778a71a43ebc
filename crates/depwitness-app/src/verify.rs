//! The `verify` use case: check pinned digests and produce a receipt.

use crate::input::{load_inputs, WitnessInput};
use depwitness_domain::WitnessError;
use depwitness_repo::FileDigester;
use depwitness_types::{
    Failure, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerificationData, VerificationReport,
};
use time::OffsetDateTime;

/// Output from the verify use case.
#[derive(Debug)]
pub struct VerifyOutput {
    /// The receipt describing the run.
    pub report: VerificationReport,
    /// The failure that stopped verification, if any.
    pub error: Option<WitnessError>,
}

/// Run the verify use case: load inputs, aggregate the project, check every assertion in
/// order.
///
/// Loading and configuration problems are returned as `Err`; verification failures are
/// recorded in the receipt.
pub fn run_verify(input: WitnessInput<'_>) -> anyhow::Result<VerifyOutput> {
    let started_at = OffsetDateTime::now_utc();
    let (project, resolved) = load_inputs(&input)?;

    let mut data = VerificationData {
        project: project.name.clone(),
        ..VerificationData::default()
    };

    let outcome = depwitness_domain::build_hash_map(
        &project,
        &resolved.policy.exclusions,
        &FileDigester,
    )
    .and_then(|build| {
        data.configurations_scanned = build.stats.configurations_scanned;
        data.configurations_excluded = build.stats.configurations_excluded;
        data.configurations_unresolvable = build.stats.configurations_unresolvable;
        data.artifacts_hashed = build.stats.artifacts_hashed;
        data.dependencies_hashed = build.map.len() as u32;
        data.digest_conflicts = build.conflicts.len() as u32;
        depwitness_domain::check_assertions(&build, &resolved.assertions, &resolved.policy)
    });

    let (verdict, failure, error) = match outcome {
        Ok(checked) => {
            data.assertions_checked = checked;
            (Verdict::Pass, None, None)
        }
        Err(err) => {
            tracing::debug!(code = err.code(), "dependency verification failed");
            let failure = Failure {
                code: err.code().to_string(),
                message: err.to_string(),
            };
            (Verdict::Fail, Some(failure), Some(err))
        }
    };

    let report = VerificationReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data,
        failure,
    };

    Ok(VerifyOutput { report, error })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "depwitness".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
