//! Use case orchestration for branchguard.
//!
//! This crate provides the application layer: it connects the Azure DevOps client to the
//! audit traversal, turns the result into a document, and writes the requested output.
//!
//! The CLI crate depends on this; it only handles argument parsing and exit codes.

#![forbid(unsafe_code)]

mod audit;
mod document;
mod output;
mod report;

pub use audit::{connect, run_audit, AuditInput};
pub use document::{build_document, REPORT_HEADER};
pub use output::{default_error_log_path, write_error_log, write_output, write_text};
pub use report::{exit_code, parse_report_json, render_error_log, serialize_report};
