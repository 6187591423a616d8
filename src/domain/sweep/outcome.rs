//! Per-membership accounting, kept pure so it can be tested without a live API

use crate::domain::directory::{GroupId, Membership, RemovalStatus};
use crate::domain::DirectoryError;

/// Result of one removal attempt after retries are spent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// The membership had already vanished; the desired end state holds
    AlreadyRemoved,
    Failed { reason: String },
}

impl RemovalOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Map the API-level removal result to an outcome. Errors never escape the
/// loop; they become a recorded failure for the operator to follow up on.
pub fn outcome_from(result: Result<RemovalStatus, DirectoryError>) -> RemovalOutcome {
    match result {
        Ok(RemovalStatus::Removed) => RemovalOutcome::Removed,
        Ok(RemovalStatus::AlreadyRemoved) => RemovalOutcome::AlreadyRemoved,
        Err(error) => RemovalOutcome::Failed {
            reason: error.to_string(),
        },
    }
}

/// One failed removal, retained for the summary block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRemoval {
    pub group_id: GroupId,
    pub group_name: String,
    pub reason: String,
}

/// Aggregate result of one run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    processed: usize,
    removed: usize,
    already_removed: usize,
    failures: Vec<FailedRemoval>,
}

impl RunSummary {
    pub fn record(&mut self, membership: &Membership, outcome: &RemovalOutcome) {
        self.processed += 1;

        match outcome {
            RemovalOutcome::Removed => self.removed += 1,
            RemovalOutcome::AlreadyRemoved => self.already_removed += 1,
            RemovalOutcome::Failed { reason } => self.failures.push(FailedRemoval {
                group_id: membership.group_id().clone(),
                group_name: membership.group_name().to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Total memberships considered
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Successful removals, counting already-vanished memberships
    pub fn succeeded(&self) -> usize {
        self.removed + self.already_removed
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[FailedRemoval] {
        &self.failures
    }

    pub fn all_removed(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(id: &str, name: &str) -> Membership {
        Membership::new(GroupId::new(id), name)
    }

    #[test]
    fn test_outcome_from_removed() {
        assert_eq!(
            outcome_from(Ok(RemovalStatus::Removed)),
            RemovalOutcome::Removed
        );
    }

    #[test]
    fn member_not_found_counts_as_already_removed() {
        // Deliberate divergence from implementations that report this as a
        // failure: the membership is gone, which is the goal of the run.
        let outcome = outcome_from(Ok(RemovalStatus::AlreadyRemoved));
        assert_eq!(outcome, RemovalOutcome::AlreadyRemoved);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_outcome_from_error_is_failed() {
        let outcome = outcome_from(Err(DirectoryError::permission_denied("denied")));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(&membership("g1", "One"), &RemovalOutcome::Removed);
        summary.record(&membership("g2", "Two"), &RemovalOutcome::AlreadyRemoved);
        summary.record(
            &membership("g3", "Three"),
            &RemovalOutcome::Failed {
                reason: "denied".to_string(),
            },
        );

        assert_eq!(summary.processed(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_removed());
        assert_eq!(summary.failures()[0].group_id.as_str(), "g3");
    }

    #[test]
    fn test_empty_summary_is_all_removed() {
        let summary = RunSummary::default();
        assert_eq!(summary.processed(), 0);
        assert_eq!(summary.failed(), 0);
        assert!(summary.all_removed());
    }
}
