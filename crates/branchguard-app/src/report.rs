use anyhow::Context;
use branchguard_types::{AuditReport, SCHEMA_AUDIT_V1};

pub fn serialize_report(report: &AuditReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize audit report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_AUDIT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_AUDIT_V1})");
    }

    serde_json::from_value(value).context("parse branchguard audit report")
}

/// One line per captured error: `{scope}\t{code}\t{message}`. `None` when the run was clean.
pub fn render_error_log(report: &AuditReport) -> Option<String> {
    let errors = report.all_errors();
    if errors.is_empty() {
        return None;
    }
    let mut out = String::new();
    for err in errors {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            single_line(&err.scope),
            err.code,
            single_line(&err.message)
        ));
    }
    Some(out)
}

/// Fields must not contain the line or field separators.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n', '\t'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 0 = clean run, 2 = report written but some requests failed.
pub fn exit_code(report: &AuditReport) -> i32 {
    if report.has_errors() { 2 } else { 0 }
}
