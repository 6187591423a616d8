use std::time::Duration;

use tracing::{error, info, warn};

use super::outcome::{outcome_from, RemovalOutcome, RunSummary};
use crate::domain::directory::{Directory, PrincipalName};
use crate::domain::retry::RetryPolicy;
use crate::domain::DirectoryError;

/// Knobs for one sweep run
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Retry policy applied to each individual request
    pub retry: RetryPolicy,
    /// Minimum delay between removal requests, independent of retries
    pub pace: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pace: Duration::from_millis(500),
        }
    }
}

/// Runs the resolve → enumerate → revoke pipeline against an injected
/// directory, producing a per-membership accounted summary.
#[derive(Debug)]
pub struct Sweeper {
    config: SweepConfig,
}

impl Sweeper {
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Remove `principal` from every group they belong to.
    ///
    /// Fatal errors (user not found, ambiguous principal, exhausted transient
    /// retries during resolution or enumeration) abort the run after tearing
    /// the session down. Per-membership failures never abort the loop.
    pub async fn run(
        &self,
        directory: &dyn Directory,
        principal: &PrincipalName,
    ) -> Result<RunSummary, DirectoryError> {
        let summary = match self.sweep(directory, principal).await {
            Ok(summary) => Ok(summary),
            Err(fatal) => {
                error!("Run aborted: {}", fatal);
                Err(fatal)
            }
        };

        if let Err(close_error) = directory.close().await {
            warn!("Session teardown failed: {}", close_error);
        }

        summary
    }

    async fn sweep(
        &self,
        directory: &dyn Directory,
        principal: &PrincipalName,
    ) -> Result<RunSummary, DirectoryError> {
        let retry = &self.config.retry;

        let user = retry
            .run("user lookup", || directory.resolve_user(principal))
            .await?;
        info!(
            "Resolved '{}' to {} ({})",
            principal,
            user.id(),
            user.display_name()
        );

        let memberships = retry
            .run("membership listing", || {
                directory.list_group_memberships(user.id())
            })
            .await?;
        info!("{} group membership(s) to remove", memberships.len());

        let mut summary = RunSummary::default();

        // Snapshot taken above is authoritative: memberships added after this
        // point are out of scope, strictly sequential and in enumeration order.
        for (index, membership) in memberships.iter().enumerate() {
            let result = retry
                .run("membership removal", || {
                    directory.remove_member(membership.group_id(), user.id())
                })
                .await;

            let outcome = outcome_from(result);
            match &outcome {
                RemovalOutcome::Removed => {
                    info!(
                        "Removed from '{}' ({})",
                        membership.group_name(),
                        membership.group_id()
                    );
                }
                RemovalOutcome::AlreadyRemoved => {
                    info!(
                        "Already removed from '{}' ({})",
                        membership.group_name(),
                        membership.group_id()
                    );
                }
                RemovalOutcome::Failed { reason } => {
                    warn!(
                        "Failed to remove from '{}' ({}): {}",
                        membership.group_name(),
                        membership.group_id(),
                        reason
                    );
                }
            }
            summary.record(membership, &outcome);

            if index + 1 < memberships.len() && !self.config.pace.is_zero() {
                tokio::time::sleep(self.config.pace).await;
            }
        }

        log_summary(&summary);
        Ok(summary)
    }
}

fn log_summary(summary: &RunSummary) {
    info!(
        "Summary: {} processed, {} removed, {} failed",
        summary.processed(),
        summary.succeeded(),
        summary.failed()
    );

    for failure in summary.failures() {
        warn!(
            "Follow up required for group '{}' ({}): {}",
            failure.group_name, failure.group_id, failure.reason
        );
    }
}
