//! Elastic IPs bound to network interfaces in the VPC
//!
//! Addresses carry no VPC id of their own. They are attributed to the VPC
//! through the network interface they are associated with.

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::pagination::collect_all;
use crate::aws::types::Address;
use crate::aws::Ec2Operations;
use anyhow::Result;
use std::collections::HashSet;
use vpc_teardown_common::ResourceKind;

/// An address together with the VPC of its network interface
#[derive(Debug, Clone)]
pub struct VpcAddress {
    pub address: Address,
    pub vpc_id: Option<String>,
}

pub struct ElasticIps<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> ElasticIps<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for ElasticIps<'_, E> {
    type Item = VpcAddress;

    const KIND: ResourceKind = ResourceKind::ElasticIps;

    fn id(item: &VpcAddress) -> &str {
        &item.address.allocation_id
    }

    fn belongs_to(item: &VpcAddress, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<VpcAddress>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        let interfaces: HashSet<String> =
            collect_all(move |token| ec2.describe_network_interfaces(vpc_id, token))
                .await?
                .into_iter()
                .filter(|eni| eni.vpc_id.as_deref() == Some(vpc_id))
                .map(|eni| eni.network_interface_id)
                .collect();

        let addresses = self.ec2.describe_addresses().await?;
        Ok(addresses
            .into_iter()
            .map(|address| {
                let in_vpc = address
                    .network_interface_id
                    .as_ref()
                    .is_some_and(|eni| interfaces.contains(eni));
                VpcAddress {
                    address,
                    vpc_id: in_vpc.then(|| vpc_id.to_string()),
                }
            })
            .collect())
    }

    /// Disassociate, then release; a failed disassociate skips the release
    async fn delete_item(&self, item: &VpcAddress, _vpc_id: &str) -> Result<(), DeletionError> {
        let allocation_id = &item.address.allocation_id;
        if let Some(association_id) = &item.address.association_id {
            ignore_not_found(self.ec2.disassociate_address(association_id).await).map_err(
                |e| DeletionError::new(Self::KIND, "DisassociateAddress", allocation_id, e),
            )?;
        }
        self.ec2
            .release_address(allocation_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "ReleaseAddress", allocation_id, e))
    }
}
