use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::pagination::collect_all;
use crate::aws::types::RouteTable;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct RouteTables<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> RouteTables<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for RouteTables<'_, E> {
    type Item = RouteTable;

    const KIND: ResourceKind = ResourceKind::RouteTables;

    fn id(item: &RouteTable) -> &str {
        &item.route_table_id
    }

    fn belongs_to(item: &RouteTable, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    /// The main route table goes away with the VPC
    fn is_excluded(item: &RouteTable) -> bool {
        item.is_main
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<RouteTable>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_route_tables(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &RouteTable, _vpc_id: &str) -> Result<(), DeletionError> {
        let id = &item.route_table_id;
        for association_id in &item.association_ids {
            ignore_not_found(self.ec2.disassociate_route_table(association_id).await)
                .map_err(|e| DeletionError::new(Self::KIND, "DisassociateRouteTable", id, e))?;
        }
        self.ec2
            .delete_route_table(id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteRouteTable", id, e))
    }
}
