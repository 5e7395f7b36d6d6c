use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::types::VpnGateway;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct VpnGateways<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> VpnGateways<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for VpnGateways<'_, E> {
    type Item = VpnGateway;

    const KIND: ResourceKind = ResourceKind::VpnGateways;

    fn id(item: &VpnGateway) -> &str {
        &item.vpn_gateway_id
    }

    fn belongs_to(item: &VpnGateway, vpc_id: &str) -> bool {
        item.attached_vpc_ids.iter().any(|id| id == vpc_id)
    }

    fn is_excluded(item: &VpnGateway) -> bool {
        item.is_deleted()
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<VpnGateway>> {
        self.ec2.describe_vpn_gateways(ctx.vpc_id).await
    }

    /// Detach from the VPC, then delete; a failed detach skips the delete
    async fn delete_item(&self, item: &VpnGateway, vpc_id: &str) -> Result<(), DeletionError> {
        let id = &item.vpn_gateway_id;
        ignore_not_found(self.ec2.detach_vpn_gateway(id, vpc_id).await)
            .map_err(|e| DeletionError::new(Self::KIND, "DetachVpnGateway", id, e))?;
        self.ec2
            .delete_vpn_gateway(id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteVpnGateway", id, e))
    }
}
