use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::pagination::collect_all;
use crate::aws::types::NetworkInterface;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct NetworkInterfaces<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> NetworkInterfaces<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for NetworkInterfaces<'_, E> {
    type Item = NetworkInterface;

    const KIND: ResourceKind = ResourceKind::NetworkInterfaces;

    fn id(item: &NetworkInterface) -> &str {
        &item.network_interface_id
    }

    fn belongs_to(item: &NetworkInterface, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    /// Interfaces owned by AWS services (load balancers, NAT, endpoints) are
    /// removed together with their owner
    fn is_excluded(item: &NetworkInterface) -> bool {
        item.requester_managed
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<NetworkInterface>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_network_interfaces(vpc_id, token)).await
    }

    async fn delete_item(
        &self,
        item: &NetworkInterface,
        _vpc_id: &str,
    ) -> Result<(), DeletionError> {
        let id = &item.network_interface_id;
        if let Some(attachment_id) = &item.attachment_id {
            ignore_not_found(self.ec2.detach_network_interface(attachment_id).await)
                .map_err(|e| DeletionError::new(Self::KIND, "DetachNetworkInterface", id, e))?;
        }
        self.ec2
            .delete_network_interface(id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteNetworkInterface", id, e))
    }
}
