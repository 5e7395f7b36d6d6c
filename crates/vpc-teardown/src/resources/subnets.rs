use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::Subnet;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct Subnets<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> Subnets<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for Subnets<'_, E> {
    type Item = Subnet;

    const KIND: ResourceKind = ResourceKind::Subnets;

    fn id(item: &Subnet) -> &str {
        &item.subnet_id
    }

    fn belongs_to(item: &Subnet, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<Subnet>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_subnets(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &Subnet, _vpc_id: &str) -> Result<(), DeletionError> {
        self.ec2
            .delete_subnet(&item.subnet_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteSubnet", &item.subnet_id, e))
    }
}
