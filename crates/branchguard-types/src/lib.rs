//! Stable DTOs and IDs used across the branchguard workspace.
//!
//! This crate is intentionally boring:
//! - wire types for the Azure DevOps resources we read
//! - data types for the emitted audit report
//! - stable string IDs for error codes
//! - the API error type shared by the client and the aggregator

#![forbid(unsafe_code)]

pub mod devops;
pub mod error;
pub mod ids;
pub mod report;

pub use devops::{Branch, Collection, PolicyConfiguration, PolicyType, Project, Repository};
pub use error::ApiError;
pub use report::{
    AuditError, AuditReport, BranchPolicies, ProjectAudit, RepositoryAudit, ToolMeta,
    SCHEMA_AUDIT_V1,
};
