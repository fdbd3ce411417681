use branchguard_types::{Branch, BranchPolicies, PolicyConfiguration, RepositoryAudit};

/// Record one branch in the repository's buckets.
///
/// `policies` is `None` when the policy request failed: the lock state is still recorded but
/// the branch goes into neither the no-policy list nor the summary.
pub fn classify_branch(
    audit: &mut RepositoryAudit,
    branch: &Branch,
    policies: Option<&[PolicyConfiguration]>,
) {
    if branch.is_locked {
        audit.locked_branches.push(branch.name.clone());
    }

    let Some(policies) = policies else {
        return;
    };

    if policies.is_empty() {
        audit.no_policy_branches.push(branch.name.clone());
    } else {
        audit.policy_summary.push(BranchPolicies {
            branch: branch.name.clone(),
            policies: policies
                .iter()
                .map(|p| p.display_name().to_string())
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchguard_types::PolicyType;

    fn branch(name: &str, is_locked: bool) -> Branch {
        Branch {
            name: name.to_string(),
            is_locked,
        }
    }

    fn policy(name: &str) -> PolicyConfiguration {
        PolicyConfiguration {
            policy_type: PolicyType {
                display_name: name.to_string(),
            },
        }
    }

    #[test]
    fn locked_branch_without_policies_lands_in_both_buckets() {
        let mut audit = RepositoryAudit::new("svc", "r1");
        classify_branch(&mut audit, &branch("main", true), Some(&[]));
        assert_eq!(audit.locked_branches, vec!["main"]);
        assert_eq!(audit.no_policy_branches, vec!["main"]);
        assert!(audit.policy_summary.is_empty());
    }

    #[test]
    fn policies_keep_service_order() {
        let mut audit = RepositoryAudit::new("svc", "r1");
        let policies = [policy("Build"), policy("Require reviewers"), policy("Build")];
        classify_branch(&mut audit, &branch("dev", false), Some(&policies));
        assert!(audit.locked_branches.is_empty());
        assert!(audit.no_policy_branches.is_empty());
        assert_eq!(
            audit.policies_for("dev"),
            Some(&["Build".to_string(), "Require reviewers".to_string(), "Build".to_string()][..])
        );
    }

    #[test]
    fn unknown_policies_only_record_lock_state() {
        let mut audit = RepositoryAudit::new("svc", "r1");
        classify_branch(&mut audit, &branch("main", true), None);
        classify_branch(&mut audit, &branch("dev", false), None);
        assert_eq!(audit.locked_branches, vec!["main"]);
        assert!(audit.no_policy_branches.is_empty());
        assert!(audit.policy_summary.is_empty());
    }
}
