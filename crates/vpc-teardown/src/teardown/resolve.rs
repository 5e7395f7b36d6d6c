//! Target VPC resolution
//!
//! Given a cluster name and no VPC id, the VPC is taken from the cluster's
//! configuration, or failing that from the VPCs tagged `Name=<cluster>`.

use crate::aws::pagination::collect_all;
use crate::aws::types::Cluster;
use crate::aws::{Ec2Operations, EksOperations, ignore_not_found};
use crate::error::TeardownError;
use anyhow::Context;
use tracing::{info, warn};

/// What resolution found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub vpc_id: Option<String>,
    pub cluster: Option<Cluster>,
}

/// Look up the cluster, tolerating its absence.
pub async fn find_cluster<K: EksOperations>(
    eks: &K,
    name: &str,
) -> Result<Option<Cluster>, TeardownError> {
    let cluster = ignore_not_found(eks.describe_cluster(name).await)
        .with_context(|| format!("Failed to describe cluster {name}"))?;
    if cluster.is_none() {
        warn!(cluster = %name, "Cluster not found, it may already be deleted");
    }
    Ok(cluster)
}

/// The single VPC tagged `Name=<name>`, if any
pub async fn find_vpc_by_name<E: Ec2Operations>(
    ec2: &E,
    name: &str,
) -> Result<Option<String>, TeardownError> {
    let vpcs = collect_all(move |token| ec2.find_vpcs_by_name(name, token))
        .await
        .with_context(|| format!("Failed to find VPCs named {name}"))?;

    match vpcs.as_slice() {
        [] => Ok(None),
        [vpc] => Ok(Some(vpc.vpc_id.clone())),
        _ => Err(TeardownError::AmbiguousVpc {
            name: name.to_string(),
            vpc_ids: vpcs.iter().map(|v| v.vpc_id.clone()).collect(),
        }),
    }
}

/// Resolve the cluster and the target VPC.
///
/// An explicit `vpc_id` always wins. The cluster is looked up whenever a
/// name is given so that cluster teardown can use it later.
pub async fn resolve_target<E: Ec2Operations, K: EksOperations>(
    ec2: &E,
    eks: &K,
    vpc_id: Option<&str>,
    cluster_name: Option<&str>,
) -> Result<Resolved, TeardownError> {
    let mut resolved = Resolved {
        vpc_id: vpc_id.map(str::to_string),
        cluster: None,
    };

    let Some(name) = cluster_name else {
        return Ok(resolved);
    };

    resolved.cluster = find_cluster(eks, name).await?;

    if resolved.vpc_id.is_none() {
        if let Some(vpc) = resolved.cluster.as_ref().and_then(|c| c.vpc_id.clone()) {
            info!(cluster = %name, vpc_id = %vpc, "Using VPC of cluster");
            resolved.vpc_id = Some(vpc);
        }
    }

    if resolved.vpc_id.is_none() {
        resolved.vpc_id = find_vpc_by_name(ec2, name).await?;
        if let Some(vpc) = &resolved.vpc_id {
            info!(name = %name, vpc_id = %vpc, "Using VPC found by Name tag");
        }
    }

    Ok(resolved)
}
