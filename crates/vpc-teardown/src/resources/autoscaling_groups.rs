//! Auto Scaling groups found through the ownership tag filter
//!
//! Groups carry no VPC id. A group belongs to the VPC when one of the
//! subnets in its `VPCZoneIdentifier` is in the VPC.

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::AutoScalingGroup;
use crate::aws::{AutoScalingOperations, Ec2Operations};
use anyhow::Result;
use std::collections::HashSet;
use tracing::info;
use vpc_teardown_common::ResourceKind;

/// A group together with the VPC its subnets resolved to
#[derive(Debug, Clone)]
pub struct VpcAutoScalingGroup {
    pub group: AutoScalingGroup,
    pub vpc_id: Option<String>,
}

pub struct AutoScalingGroups<'a, A, E> {
    autoscaling: &'a A,
    ec2: &'a E,
}

impl<'a, A: AutoScalingOperations, E: Ec2Operations> AutoScalingGroups<'a, A, E> {
    pub fn new(autoscaling: &'a A, ec2: &'a E) -> Self {
        Self { autoscaling, ec2 }
    }
}

impl<A: AutoScalingOperations, E: Ec2Operations> VpcResource for AutoScalingGroups<'_, A, E> {
    type Item = VpcAutoScalingGroup;

    const KIND: ResourceKind = ResourceKind::AutoScalingGroups;

    fn id(item: &VpcAutoScalingGroup) -> &str {
        &item.group.name
    }

    fn belongs_to(item: &VpcAutoScalingGroup, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<VpcAutoScalingGroup>> {
        let Some(filter) = ctx.autoscaling_filter else {
            info!("No autoscaling tag filter set, skipping Auto Scaling groups");
            return Ok(Vec::new());
        };

        let autoscaling = self.autoscaling;
        let groups = collect_all(move |token| {
            autoscaling.describe_auto_scaling_groups(filter, token)
        })
        .await?;
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        let subnets: HashSet<String> = collect_all(move |token| ec2.describe_subnets(vpc_id, token))
            .await?
            .into_iter()
            .filter(|s| s.vpc_id.as_deref() == Some(vpc_id))
            .map(|s| s.subnet_id)
            .collect();

        Ok(groups
            .into_iter()
            .map(|group| {
                let in_vpc = group.subnet_ids.iter().any(|id| subnets.contains(id));
                VpcAutoScalingGroup {
                    group,
                    vpc_id: in_vpc.then(|| vpc_id.to_string()),
                }
            })
            .collect())
    }

    async fn delete_item(
        &self,
        item: &VpcAutoScalingGroup,
        _vpc_id: &str,
    ) -> Result<(), DeletionError> {
        self.autoscaling
            .delete_auto_scaling_group(&item.group.name)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteAutoScalingGroup", &item.group.name, e))
    }
}
