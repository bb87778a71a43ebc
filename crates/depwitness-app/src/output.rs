//! Receipt serialization and file output helpers.

use anyhow::Context;
use camino::Utf8Path;
use depwitness_types::{
    ids, Failure, SCHEMA_REPORT_V1, Verdict, VerificationData, VerificationReport,
};
use time::OffsetDateTime;

use crate::verify::tool_meta;

pub fn serialize_report(report: &VerificationReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize verification report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<VerificationReport> {
    let report: VerificationReport =
        serde_json::from_str(text).context("parse verification report")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!(
            "unknown report schema: {} (expected {SCHEMA_REPORT_V1})",
            report.schema
        );
    }
    Ok(report)
}

/// A failing receipt for runs that never reached verification.
pub fn runtime_error_report(message: &str) -> VerificationReport {
    let now = OffsetDateTime::now_utc();
    VerificationReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        data: VerificationData::default(),
        failure: Some(Failure {
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
        }),
    }
}

pub fn write_report(path: &Utf8Path, report: &VerificationReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {path}"))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {path}"))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
