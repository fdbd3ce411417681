//! Wire types for the Azure DevOps REST resources branchguard reads.
//!
//! Only the fields the audit uses are modelled; everything else in the payload is ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint: `{ "count": n, "value": [...] }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    /// Missing `value` is treated as an empty collection.
    #[serde(default)]
    pub value: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Repository {
    pub name: String,
    pub id: String,
}

/// A git ref under `refs/heads/`. `name` is the full ref name as returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Branch {
    pub name: String,
    #[serde(rename = "isLocked", default)]
    pub is_locked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfiguration {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyType {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl PolicyConfiguration {
    pub fn display_name(&self) -> &str {
        &self.policy_type.display_name
    }
}
