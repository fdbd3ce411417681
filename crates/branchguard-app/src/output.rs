//! Writing report artifacts to disk.

use crate::document::build_document;
use crate::report::{render_error_log, serialize_report};
use anyhow::Context;
use branchguard_render::render_markdown;
use branchguard_settings::OutputFormat;
use branchguard_types::AuditReport;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

/// Write `report` to `path` in `format`, replacing any existing file.
pub fn write_output(report: &AuditReport, format: OutputFormat, path: &Utf8Path) -> anyhow::Result<()> {
    ensure_parent(path)?;
    match format {
        OutputFormat::Pdf => build_document(report)
            .save(path.as_std_path())
            .with_context(|| format!("write pdf report: {path}"))?,
        OutputFormat::Markdown => write_text(path, &render_markdown(&build_document(report)))?,
        OutputFormat::Json => {
            let data = serialize_report(report)?;
            std::fs::write(path, data).with_context(|| format!("write json report: {path}"))?;
        }
    }
    info!(path = %path, format = format.extension(), "report written");
    Ok(())
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

/// Write the error log if the run captured any errors. Returns whether a file was written.
pub fn write_error_log(report: &AuditReport, path: &Utf8Path) -> anyhow::Result<bool> {
    match render_error_log(report) {
        Some(log) => {
            write_text(path, &log).context("write error log")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// `{output stem}.errors.log`, next to the output file.
pub fn default_error_log_path(output: &Utf8Path) -> Utf8PathBuf {
    let stem = output.file_stem().unwrap_or("branchguard");
    output.with_file_name(format!("{stem}.errors.log"))
}

fn ensure_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{run_audit, AuditInput};
    use branchguard_domain::fake::FakeSource;
    use branchguard_domain::ErrorPolicy;

    fn tmp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 path")
    }

    fn report(source: &FakeSource) -> AuditReport {
        run_audit(
            source,
            AuditInput {
                organization: "acme",
                on_error: ErrorPolicy::Continue,
            },
        )
        .expect("audit")
    }

    #[test]
    fn default_error_log_sits_next_to_output() {
        assert_eq!(
            default_error_log_path(Utf8Path::new("out/report.pdf")),
            Utf8PathBuf::from("out/report.errors.log")
        );
        assert_eq!(
            default_error_log_path(Utf8Path::new("report.pdf")),
            Utf8PathBuf::from("report.errors.log")
        );
    }

    #[test]
    fn writes_each_format_and_creates_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let r = report(&FakeSource::new().project("core"));

        let pdf = tmp_path(&tmp, "nested/report.pdf");
        write_output(&r, OutputFormat::Pdf, &pdf).expect("pdf");
        assert!(std::fs::read(&pdf).expect("read").starts_with(b"%PDF-"));

        let md = tmp_path(&tmp, "report.md");
        write_output(&r, OutputFormat::Markdown, &md).expect("md");
        assert!(std::fs::read_to_string(&md).expect("read").contains("## Project: core"));

        let json = tmp_path(&tmp, "report.json");
        write_output(&r, OutputFormat::Json, &json).expect("json");
        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&json).expect("read")).expect("json");
        assert_eq!(value["projects"][0]["name"], "core");
    }

    #[test]
    fn error_log_only_written_when_needed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let log = tmp_path(&tmp, "report.errors.log");

        let clean = report(&FakeSource::new());
        assert!(!write_error_log(&clean, &log).expect("write"));
        assert!(!log.exists());

        let failing = report(&FakeSource::new().fail_projects(500));
        assert!(write_error_log(&failing, &log).expect("write"));
        let text = std::fs::read_to_string(&log).expect("read");
        assert!(text.starts_with("projects\tapi_status\t"));
    }
}
