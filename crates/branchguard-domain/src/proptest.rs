//! Property-based tests for classification and traversal.
//!
//! These tests use proptest to verify invariants around:
//! - bucket membership and ordering
//! - independence of the lock flag from the policy buckets
//! - determinism of a full audit run

use crate::classify::classify_branch;
use crate::engine::audit;
use crate::fake::FakeSource;
use crate::policy::ErrorPolicy;
use ::proptest::prelude::*;
use branchguard_types::{Branch, PolicyConfiguration, PolicyType, RepositoryAudit};

// ============================================================================
// Strategies
// ============================================================================

fn arb_policy_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Minimum number of reviewers".to_string()),
        Just("Build".to_string()),
        Just("Comment requirements".to_string()),
        Just("Work item linking".to_string()),
        prop::string::string_regex("[A-Z][a-z ]{0,20}").unwrap(),
    ]
}

/// Branches with unique names, each with a lock flag and a (possibly empty) policy list.
fn arb_branches() -> impl Strategy<Value = Vec<(String, bool, Vec<String>)>> {
    prop::collection::btree_set("[a-z]{1,8}", 0..12).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().map(|n| format!("refs/heads/{n}")).collect();
        let n = names.len();
        (
            Just(names),
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(prop::collection::vec(arb_policy_name(), 0..4), n),
        )
            .prop_map(|(names, locks, policies)| {
                names
                    .into_iter()
                    .zip(locks)
                    .zip(policies)
                    .map(|((name, locked), policies)| (name, locked, policies))
                    .collect()
            })
    })
}

fn classify_all(branches: &[(String, bool, Vec<String>)]) -> RepositoryAudit {
    let mut repo = RepositoryAudit::new("svc", "r1");
    for (name, locked, policies) in branches {
        let policies: Vec<PolicyConfiguration> = policies
            .iter()
            .map(|p| PolicyConfiguration {
                policy_type: PolicyType {
                    display_name: p.clone(),
                },
            })
            .collect();
        let branch = Branch {
            name: name.clone(),
            is_locked: *locked,
        };
        classify_branch(&mut repo, &branch, Some(&policies));
    }
    repo
}

fn source_for(branches: &[(String, bool, Vec<String>)]) -> FakeSource {
    let mut source = FakeSource::new()
        .project("core")
        .repository("core", "svc", "r1");
    for (name, locked, policies) in branches {
        source = source.branch("core", "r1", name, *locked);
        for p in policies {
            source = source.policy("core", "r1", name, p);
        }
    }
    source
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn locked_bucket_is_exactly_locked_branches_in_order(branches in arb_branches()) {
        let repo = classify_all(&branches);
        let expected: Vec<String> = branches
            .iter()
            .filter(|(_, locked, _)| *locked)
            .map(|(name, _, _)| name.clone())
            .collect();
        prop_assert_eq!(repo.locked_branches, expected);
    }

    #[test]
    fn every_branch_is_in_exactly_one_policy_bucket(branches in arb_branches()) {
        let repo = classify_all(&branches);
        for (name, _, policies) in &branches {
            let in_no_policy = repo.no_policy_branches.contains(name);
            let summary = repo.policies_for(name);
            if policies.is_empty() {
                prop_assert!(in_no_policy);
                prop_assert!(summary.is_none());
            } else {
                prop_assert!(!in_no_policy);
                prop_assert_eq!(summary, Some(policies.as_slice()));
            }
        }
        prop_assert_eq!(
            repo.no_policy_branches.len() + repo.policy_summary.len(),
            branches.len()
        );
    }

    #[test]
    fn summary_follows_branch_listing_order(branches in arb_branches()) {
        let repo = classify_all(&branches);
        let expected: Vec<&String> = branches
            .iter()
            .filter(|(_, _, p)| !p.is_empty())
            .map(|(name, _, _)| name)
            .collect();
        let actual: Vec<&String> = repo.policy_summary.iter().map(|e| &e.branch).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn audit_is_idempotent(branches in arb_branches()) {
        let source = source_for(&branches);
        let first = audit(&source, ErrorPolicy::Continue).unwrap();
        let second = audit(&source, ErrorPolicy::Continue).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first.projects[0].repositories[0], &classify_all(&branches));
    }
}
