//! Teardown orchestration
//!
//! A run resolves the target VPC, then alternates between best-effort sweeps
//! of everything that blocks VPC deletion and a deletion probe, sleeping a
//! fixed interval between tries. The EKS cluster, when enabled, goes last,
//! once the VPC is gone.

mod cluster;
mod prober;
mod resolve;

pub use cluster::teardown_cluster;
pub use prober::{ProbeOutcome, probe_vpc};
pub use resolve::{Resolved, find_cluster, find_vpc_by_name, resolve_target};

use crate::aws::CloudClients;
use crate::aws::types::Cluster;
use crate::config::TeardownConfig;
use crate::error::TeardownError;
use crate::resources::{SweepContext, sweep_pass};
use crate::wait::sleep_or_cancel;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use vpc_teardown_common::ResourceKind;

/// Drives one teardown run against a set of AWS clients
pub struct Teardown<C> {
    clients: C,
}

impl<C: CloudClients> Teardown<C> {
    pub fn new(clients: C) -> Self {
        Self { clients }
    }

    /// Tear down the configured VPC (and cluster).
    ///
    /// Returns `Ok` once the VPC is gone (and, inside the retry loop, the
    /// cluster too), or after the single pass of a dry run.
    pub async fn run(
        &self,
        config: &TeardownConfig,
        cancel: &CancellationToken,
    ) -> Result<(), TeardownError> {
        let resolved = resolve_target(
            self.clients.ec2(),
            self.clients.eks(),
            config.vpc_id.as_deref(),
            config.cluster_name.as_deref(),
        )
        .await?;
        let vpc_id = resolved.vpc_id.ok_or(TeardownError::VpcIdNotSet)?;
        let cluster = resolved
            .cluster
            .filter(|_| config.resources.contains(ResourceKind::Clusters));

        info!(
            vpc_id = %vpc_id,
            cluster = ?cluster.as_ref().map(|c| c.name.as_str()),
            resources = %config.resources,
            tries = config.tries,
            dry_run = config.dry_run,
            "Starting teardown"
        );

        if probe_vpc(self.clients.ec2(), &vpc_id, config.dry_run)
            .await?
            .is_deleted()
        {
            if let Some(cluster) = &cluster {
                // The VPC is gone, which is what the run is for.
                if let Err(e) = self.delete_cluster(cluster, config.dry_run).await {
                    error!(cluster = %cluster.name, error = ?e, "Cluster teardown failed");
                }
            }
            return Ok(());
        }

        let ctx = SweepContext {
            vpc_id: &vpc_id,
            dry_run: config.dry_run,
            autoscaling_filter: config.autoscaling_filter.as_ref(),
            cancel,
        };

        for attempt in 0..config.tries {
            if attempt > 0 {
                sleep_or_cancel(config.retry_interval, cancel).await?;
            }
            info!(vpc_id = %vpc_id, attempt = attempt + 1, tries = config.tries, "Sweeping VPC");

            let failures = sweep_pass(&self.clients, &config.resources, &ctx).await?;
            if !failures.is_empty() {
                warn!(vpc_id = %vpc_id, attempt = attempt + 1, "{failures}");
            }

            if probe_vpc(self.clients.ec2(), &vpc_id, config.dry_run)
                .await?
                .is_deleted()
            {
                let Some(cluster) = &cluster else {
                    info!(vpc_id = %vpc_id, "Teardown complete");
                    return Ok(());
                };
                match self.delete_cluster(cluster, config.dry_run).await {
                    Ok(()) => {
                        info!(vpc_id = %vpc_id, cluster = %cluster.name, "Teardown complete");
                        return Ok(());
                    }
                    Err(e) => {
                        warn!(
                            cluster = %cluster.name,
                            error = ?e,
                            "Cluster teardown failed, node groups may still be draining"
                        );
                        continue;
                    }
                }
            }

            if config.dry_run {
                info!(vpc_id = %vpc_id, "[dry-run] pass complete, nothing was deleted");
                return Ok(());
            }
        }

        error!(vpc_id = %vpc_id, tries = config.tries, "VPC still has dependencies after all tries");
        Err(TeardownError::Exhausted { tries: config.tries })
    }

    async fn delete_cluster(&self, cluster: &Cluster, dry_run: bool) -> anyhow::Result<()> {
        teardown_cluster(self.clients.eks(), cluster, dry_run).await
    }
}
