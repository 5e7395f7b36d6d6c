use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::pagination::collect_all;
use crate::aws::types::InternetGateway;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct InternetGateways<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> InternetGateways<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for InternetGateways<'_, E> {
    type Item = InternetGateway;

    const KIND: ResourceKind = ResourceKind::InternetGateways;

    fn id(item: &InternetGateway) -> &str {
        &item.internet_gateway_id
    }

    fn belongs_to(item: &InternetGateway, vpc_id: &str) -> bool {
        item.attached_vpc_ids.iter().any(|id| id == vpc_id)
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<InternetGateway>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_internet_gateways(vpc_id, token)).await
    }

    /// Detach from the VPC, then delete; a failed detach skips the delete
    async fn delete_item(&self, item: &InternetGateway, vpc_id: &str) -> Result<(), DeletionError> {
        let id = &item.internet_gateway_id;
        ignore_not_found(self.ec2.detach_internet_gateway(id, vpc_id).await)
            .map_err(|e| DeletionError::new(Self::KIND, "DetachInternetGateway", id, e))?;
        self.ec2
            .delete_internet_gateway(id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteInternetGateway", id, e))
    }
}
