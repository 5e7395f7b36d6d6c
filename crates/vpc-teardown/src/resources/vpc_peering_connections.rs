//! Peering connections where the VPC is either accepter or requester

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::{PeeringRole, VpcPeeringConnection};
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct VpcPeeringConnections<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> VpcPeeringConnections<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for VpcPeeringConnections<'_, E> {
    type Item = VpcPeeringConnection;

    const KIND: ResourceKind = ResourceKind::VpcPeeringConnections;

    fn id(item: &VpcPeeringConnection) -> &str {
        &item.vpc_peering_connection_id
    }

    fn belongs_to(item: &VpcPeeringConnection, vpc_id: &str) -> bool {
        item.involves(vpc_id)
    }

    /// Union of the accepter-side and requester-side listings
    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<VpcPeeringConnection>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        let mut connections: Vec<VpcPeeringConnection> = Vec::new();

        for role in PeeringRole::ALL {
            let listed = collect_all(move |token| {
                ec2.describe_vpc_peering_connections(role, vpc_id, token)
            })
            .await?;

            for connection in listed {
                let seen = connections
                    .iter()
                    .any(|c| c.vpc_peering_connection_id == connection.vpc_peering_connection_id);
                if !seen {
                    connections.push(connection);
                }
            }
        }

        Ok(connections)
    }

    async fn delete_item(
        &self,
        item: &VpcPeeringConnection,
        _vpc_id: &str,
    ) -> Result<(), DeletionError> {
        self.ec2
            .delete_vpc_peering_connection(&item.vpc_peering_connection_id)
            .await
            .map_err(|e| {
                DeletionError::new(
                    Self::KIND,
                    "DeleteVpcPeeringConnection",
                    &item.vpc_peering_connection_id,
                    e,
                )
            })
    }
}
