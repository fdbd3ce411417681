//! Turn an audit report into a printable document.

use branchguard_render::Document;
use branchguard_types::{AuditError, AuditReport, BranchPolicies, RepositoryAudit};

pub const REPORT_HEADER: &str = "Azure DevOps Branch Policy Report";

/// Lay the report out as sections, in traversal order.
///
/// Per repository: title, then the locked, no-policy, policy-summary and error bodies, each
/// only when non-empty.
pub fn build_document(report: &AuditReport) -> Document {
    let mut doc = Document::new(REPORT_HEADER);

    if !report.errors.is_empty() {
        doc.add_section_body(errors_body(&report.errors));
    }

    for project in &report.projects {
        doc.add_section_title(format!("Project: {}", project.name));
        if !project.errors.is_empty() {
            doc.add_section_body(errors_body(&project.errors));
        }
        for repo in &project.repositories {
            add_repository(&mut doc, repo);
        }
    }

    doc
}

fn add_repository(doc: &mut Document, repo: &RepositoryAudit) {
    doc.add_section_title(format!("Repository: {}", repo.name));

    if !repo.locked_branches.is_empty() {
        doc.add_section_body(listing("Locked Branches:", &repo.locked_branches));
    }
    if !repo.no_policy_branches.is_empty() {
        doc.add_section_body(listing(
            "Branches with No Policies:",
            &repo.no_policy_branches,
        ));
    }
    if !repo.policy_summary.is_empty() {
        doc.add_section_body(policy_summary_body(&repo.policy_summary));
    }
    if !repo.errors.is_empty() {
        doc.add_section_body(errors_body(&repo.errors));
    }
}

fn listing(heading: &str, names: &[String]) -> String {
    let mut out = heading.to_string();
    for name in names {
        out.push('\n');
        out.push_str(name);
    }
    out
}

fn policy_summary_body(summary: &[BranchPolicies]) -> String {
    let mut out = "Branch Policies:".to_string();
    for entry in summary {
        out.push_str(&format!(
            "\n  * {}: {}",
            entry.branch,
            entry.policies.join(" - ")
        ));
    }
    out
}

fn errors_body(errors: &[AuditError]) -> String {
    let mut out = "Errors:".to_string();
    for err in errors {
        out.push_str(&format!("\n  ! {}: {}", err.scope, err.message));
    }
    out
}
