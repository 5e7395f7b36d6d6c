//! Instances running in the VPC

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::Instance;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct Reservations<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> Reservations<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for Reservations<'_, E> {
    type Item = Instance;

    const KIND: ResourceKind = ResourceKind::Reservations;

    fn id(item: &Instance) -> &str {
        &item.instance_id
    }

    fn belongs_to(item: &Instance, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    fn is_excluded(item: &Instance) -> bool {
        item.is_terminating()
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<Instance>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_instances(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &Instance, _vpc_id: &str) -> Result<(), DeletionError> {
        self.ec2
            .terminate_instance(&item.instance_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "TerminateInstances", &item.instance_id, e))
    }
}
