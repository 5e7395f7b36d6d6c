//! Resource deletion modules
//!
//! One module per resource type that can block VPC deletion. Every module
//! lists its items scoped to the target VPC, re-checks each item's VPC
//! association, drops the items it must never delete (default security
//! group, default ACL, main route table, ...) and deletes the rest one by
//! one. A failed item is recorded in [`DeletionErrors`] and the sweep moves
//! on; only listing failures and cancellation stop a pass.

mod autoscaling_groups;
mod elastic_ips;
mod internet_gateways;
mod load_balancers;
mod nat_gateways;
mod network_acls;
mod network_interfaces;
mod reservations;
mod route_tables;
mod security_groups;
mod subnets;
mod vpc_endpoints;
mod vpc_peering_connections;
mod vpn_gateways;

pub use autoscaling_groups::AutoScalingGroups;
pub use elastic_ips::ElasticIps;
pub use internet_gateways::InternetGateways;
pub use load_balancers::LoadBalancers;
pub use nat_gateways::NatGateways;
pub use network_acls::NetworkAcls;
pub use network_interfaces::NetworkInterfaces;
pub use reservations::Reservations;
pub use route_tables::RouteTables;
pub use security_groups::SecurityGroups;
pub use subnets::Subnets;
pub use vpc_endpoints::VpcEndpoints;
pub use vpc_peering_connections::VpcPeeringConnections;
pub use vpn_gateways::VpnGateways;

use crate::aws::error::is_not_found;
use crate::aws::types::AutoScalingFilter;
use crate::aws::CloudClients;
use crate::error::TeardownError;
use anyhow::Context;
use std::fmt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vpc_teardown_common::{ResourceKind, ResourceSet};

/// What a sweep needs to know about the run
#[derive(Debug, Clone, Copy)]
pub struct SweepContext<'a> {
    pub vpc_id: &'a str,
    pub dry_run: bool,
    pub autoscaling_filter: Option<&'a AutoScalingFilter>,
    pub cancel: &'a CancellationToken,
}

impl SweepContext<'_> {
    fn check_cancelled(&self) -> Result<(), TeardownError> {
        if self.cancel.is_cancelled() {
            return Err(TeardownError::Cancelled);
        }
        Ok(())
    }
}

/// A resource type that can be swept out of a VPC
#[allow(async_fn_in_trait)] // Internal use only
pub trait VpcResource {
    type Item;

    const KIND: ResourceKind;

    /// Provider id used in logs and error reports
    fn id(item: &Self::Item) -> &str;

    /// Whether the item is associated with `vpc_id`.
    ///
    /// Checked on every listed item even though listings are already scoped
    /// to the VPC.
    fn belongs_to(item: &Self::Item, vpc_id: &str) -> bool;

    /// Items that are never deletion candidates
    fn is_excluded(_item: &Self::Item) -> bool {
        false
    }

    /// Fetch every item for the VPC
    async fn list(&self, ctx: &SweepContext<'_>) -> anyhow::Result<Vec<Self::Item>>;

    /// Delete one candidate, including any detach/revoke pre-steps
    async fn delete_item(&self, item: &Self::Item, vpc_id: &str) -> Result<(), DeletionError>;
}

/// One failed deletion step
#[derive(Debug, Error)]
#[error("{kind} {resource_id}: {operation} failed: {cause:#}")]
pub struct DeletionError {
    pub kind: ResourceKind,
    pub operation: &'static str,
    pub resource_id: String,
    pub cause: anyhow::Error,
}

impl DeletionError {
    pub fn new(
        kind: ResourceKind,
        operation: &'static str,
        resource_id: impl Into<String>,
        cause: anyhow::Error,
    ) -> Self {
        Self {
            kind,
            operation,
            resource_id: resource_id.into(),
            cause,
        }
    }
}

/// Failures collected over a best-effort sweep, in the order they happened
#[derive(Debug, Default)]
pub struct DeletionErrors(Vec<DeletionError>);

impl DeletionErrors {
    pub fn push(&mut self, error: DeletionError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: DeletionErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeletionError> {
        self.0.iter()
    }

    /// Failures recorded for one resource type
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &DeletionError> {
        self.0.iter().filter(move |e| e.kind == kind)
    }
}

impl fmt::Display for DeletionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} deletion(s) failed", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

/// Sweep one resource type out of the VPC.
///
/// Returns the per-item failures; listing failures and cancellation are
/// returned as errors and abort the pass.
pub async fn sweep<R: VpcResource>(
    resource: &R,
    ctx: &SweepContext<'_>,
) -> Result<DeletionErrors, TeardownError> {
    let kind = R::KIND;
    ctx.check_cancelled()?;

    let items = resource
        .list(ctx)
        .await
        .with_context(|| format!("Failed to list {kind} in {}", ctx.vpc_id))?;

    let listed = items.len();
    let candidates: Vec<R::Item> = items
        .into_iter()
        .filter(|item| R::belongs_to(item, ctx.vpc_id) && !R::is_excluded(item))
        .collect();
    let ids: Vec<&str> = candidates.iter().map(R::id).collect();

    info!(
        vpc_id = %ctx.vpc_id,
        resource = %kind,
        listed,
        ids = ?ids,
        "Found deletion candidates"
    );

    let mut errors = DeletionErrors::default();
    for item in &candidates {
        ctx.check_cancelled()?;
        let id = R::id(item);

        if ctx.dry_run {
            info!(resource = %kind, id = %id, "[dry-run] would delete");
            continue;
        }

        match resource.delete_item(item, ctx.vpc_id).await {
            Ok(()) => info!(resource = %kind, id = %id, "Deleted"),
            Err(e) if is_not_found(&e.cause) => {
                debug!(resource = %kind, id = %id, "Already deleted");
            }
            Err(e) => {
                warn!(
                    resource = %kind,
                    id = %id,
                    operation = e.operation,
                    error = ?e.cause,
                    "Failed to delete"
                );
                errors.push(e);
            }
        }
    }

    Ok(errors)
}

/// Run every enabled module once against the VPC, in sweep order.
///
/// `Clusters` is not a sweep module; the orchestrator handles it.
pub async fn sweep_pass<C: CloudClients>(
    clients: &C,
    resources: &ResourceSet,
    ctx: &SweepContext<'_>,
) -> Result<DeletionErrors, TeardownError> {
    let mut errors = DeletionErrors::default();

    for kind in resources.sweep_order() {
        let failed = match kind {
            ResourceKind::AutoScalingGroups => {
                sweep(
                    &AutoScalingGroups::new(clients.autoscaling(), clients.ec2()),
                    ctx,
                )
                .await?
            }
            ResourceKind::LoadBalancers => sweep(&LoadBalancers::new(clients.elb()), ctx).await?,
            ResourceKind::Reservations => sweep(&Reservations::new(clients.ec2()), ctx).await?,
            ResourceKind::NatGateways => sweep(&NatGateways::new(clients.ec2()), ctx).await?,
            ResourceKind::VpcEndpoints => sweep(&VpcEndpoints::new(clients.ec2()), ctx).await?,
            ResourceKind::VpcPeeringConnections => {
                sweep(&VpcPeeringConnections::new(clients.ec2()), ctx).await?
            }
            ResourceKind::ElasticIps => sweep(&ElasticIps::new(clients.ec2()), ctx).await?,
            ResourceKind::InternetGateways => {
                sweep(&InternetGateways::new(clients.ec2()), ctx).await?
            }
            ResourceKind::VpnGateways => sweep(&VpnGateways::new(clients.ec2()), ctx).await?,
            ResourceKind::NetworkInterfaces => {
                sweep(&NetworkInterfaces::new(clients.ec2()), ctx).await?
            }
            ResourceKind::SecurityGroups => sweep(&SecurityGroups::new(clients.ec2()), ctx).await?,
            ResourceKind::RouteTables => sweep(&RouteTables::new(clients.ec2()), ctx).await?,
            ResourceKind::Subnets => sweep(&Subnets::new(clients.ec2()), ctx).await?,
            ResourceKind::NetworkAcls => sweep(&NetworkAcls::new(clients.ec2()), ctx).await?,
            ResourceKind::Clusters => continue,
        };

        if !failed.is_empty() {
            warn!(
                resource = %kind,
                failures = failed.len(),
                "Best-effort deletion left failures, continuing with next resource type"
            );
        }
        errors.extend(failed);
    }

    Ok(errors)
}
