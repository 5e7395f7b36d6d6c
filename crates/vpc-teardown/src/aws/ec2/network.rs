//! VPC, subnet, ACL, route table, gateway, address and interface calls

use super::{Ec2Client, named_filter, owned, tag_value, vpc_filter};
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::{
    Address, InternetGateway, NatGateway, NetworkAcl, NetworkInterface, RouteTable, Subnet, Vpc,
    VpnGateway,
};
use anyhow::Result;
use aws_sdk_ec2::types::AttachmentStatus;
use vpc_teardown_common::tags::TAG_NAME;

impl Ec2Client {
    /// Find VPCs whose `Name` tag equals `name`
    pub async fn find_vpcs_by_name(
        &self,
        name: &str,
        next_token: Option<String>,
    ) -> Result<Page<Vpc>> {
        let output = self
            .client
            .describe_vpcs()
            .filters(named_filter(&format!("tag:{TAG_NAME}"), name))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeVpcs", e))?;

        let items = output
            .vpcs()
            .iter()
            .filter_map(|vpc| {
                Some(Vpc {
                    vpc_id: vpc.vpc_id()?.to_string(),
                    name: tag_value(vpc.tags(), TAG_NAME),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        self.client
            .delete_vpc()
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteVpc", e))?;
        Ok(())
    }

    pub async fn describe_subnets(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Subnet>> {
        let output = self
            .client
            .describe_subnets()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeSubnets", e))?;

        let items = output
            .subnets()
            .iter()
            .filter_map(|subnet| {
                Some(Subnet {
                    subnet_id: subnet.subnet_id()?.to_string(),
                    vpc_id: owned(subnet.vpc_id()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.client
            .delete_subnet()
            .subnet_id(subnet_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteSubnet", e))?;
        Ok(())
    }

    pub async fn describe_network_acls(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkAcl>> {
        let output = self
            .client
            .describe_network_acls()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeNetworkAcls", e))?;

        let items = output
            .network_acls()
            .iter()
            .filter_map(|acl| {
                Some(NetworkAcl {
                    network_acl_id: acl.network_acl_id()?.to_string(),
                    vpc_id: owned(acl.vpc_id()),
                    is_default: acl.is_default().unwrap_or(false),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()> {
        self.client
            .delete_network_acl()
            .network_acl_id(network_acl_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteNetworkAcl", e))?;
        Ok(())
    }

    pub async fn describe_route_tables(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<RouteTable>> {
        let output = self
            .client
            .describe_route_tables()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeRouteTables", e))?;

        let items = output
            .route_tables()
            .iter()
            .filter_map(|table| {
                let associations = table.associations();
                Some(RouteTable {
                    route_table_id: table.route_table_id()?.to_string(),
                    vpc_id: owned(table.vpc_id()),
                    is_main: associations.iter().any(|a| a.main() == Some(true)),
                    association_ids: associations
                        .iter()
                        .filter(|a| a.main() != Some(true))
                        .filter_map(|a| owned(a.route_table_association_id()))
                        .collect(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn disassociate_route_table(&self, association_id: &str) -> Result<()> {
        self.client
            .disassociate_route_table()
            .association_id(association_id)
            .send()
            .await
            .map_err(|e| sdk_error("DisassociateRouteTable", e))?;
        Ok(())
    }

    pub async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteRouteTable", e))?;
        Ok(())
    }

    pub async fn describe_internet_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<InternetGateway>> {
        let output = self
            .client
            .describe_internet_gateways()
            .filters(named_filter("attachment.vpc-id", vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeInternetGateways", e))?;

        let items = output
            .internet_gateways()
            .iter()
            .filter_map(|igw| {
                Some(InternetGateway {
                    internet_gateway_id: igw.internet_gateway_id()?.to_string(),
                    attached_vpc_ids: igw
                        .attachments()
                        .iter()
                        .filter_map(|a| owned(a.vpc_id()))
                        .collect(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<()> {
        self.client
            .detach_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| sdk_error("DetachInternetGateway", e))?;
        Ok(())
    }

    pub async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<()> {
        self.client
            .delete_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteInternetGateway", e))?;
        Ok(())
    }

    pub async fn describe_nat_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NatGateway>> {
        // DescribeNatGateways names its filter list `Filter`, not `Filters`
        let output = self
            .client
            .describe_nat_gateways()
            .filter(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeNatGateways", e))?;

        let items = output
            .nat_gateways()
            .iter()
            .filter_map(|nat| {
                Some(NatGateway {
                    nat_gateway_id: nat.nat_gateway_id()?.to_string(),
                    vpc_id: owned(nat.vpc_id()),
                    state: nat.state().map(|s| s.as_str().to_string()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<()> {
        self.client
            .delete_nat_gateway()
            .nat_gateway_id(nat_gateway_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteNatGateway", e))?;
        Ok(())
    }

    /// List every VPC-domain Elastic IP in the region.
    ///
    /// Addresses carry no VPC id; callers match them to a VPC through their
    /// network interface.
    pub async fn describe_addresses(&self) -> Result<Vec<Address>> {
        let output = self
            .client
            .describe_addresses()
            .filters(named_filter("domain", "vpc"))
            .send()
            .await
            .map_err(|e| sdk_error("DescribeAddresses", e))?;

        Ok(output
            .addresses()
            .iter()
            .filter_map(|address| {
                Some(Address {
                    allocation_id: address.allocation_id()?.to_string(),
                    association_id: owned(address.association_id()),
                    network_interface_id: owned(address.network_interface_id()),
                    public_ip: owned(address.public_ip()),
                })
            })
            .collect())
    }

    pub async fn disassociate_address(&self, association_id: &str) -> Result<()> {
        self.client
            .disassociate_address()
            .association_id(association_id)
            .send()
            .await
            .map_err(|e| sdk_error("DisassociateAddress", e))?;
        Ok(())
    }

    pub async fn release_address(&self, allocation_id: &str) -> Result<()> {
        self.client
            .release_address()
            .allocation_id(allocation_id)
            .send()
            .await
            .map_err(|e| sdk_error("ReleaseAddress", e))?;
        Ok(())
    }

    pub async fn describe_network_interfaces(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkInterface>> {
        let output = self
            .client
            .describe_network_interfaces()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeNetworkInterfaces", e))?;

        let items = output
            .network_interfaces()
            .iter()
            .filter_map(|eni| {
                Some(NetworkInterface {
                    network_interface_id: eni.network_interface_id()?.to_string(),
                    vpc_id: owned(eni.vpc_id()),
                    requester_managed: eni.requester_managed().unwrap_or(false),
                    attachment_id: eni.attachment().and_then(|a| owned(a.attachment_id())),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn detach_network_interface(&self, attachment_id: &str) -> Result<()> {
        self.client
            .detach_network_interface()
            .attachment_id(attachment_id)
            .force(true)
            .send()
            .await
            .map_err(|e| sdk_error("DetachNetworkInterface", e))?;
        Ok(())
    }

    pub async fn delete_network_interface(&self, network_interface_id: &str) -> Result<()> {
        self.client
            .delete_network_interface()
            .network_interface_id(network_interface_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteNetworkInterface", e))?;
        Ok(())
    }

    /// VPN gateways attached to the VPC (DescribeVpnGateways is not paginated)
    pub async fn describe_vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>> {
        let output = self
            .client
            .describe_vpn_gateways()
            .filters(named_filter("attachment.vpc-id", vpc_id))
            .send()
            .await
            .map_err(|e| sdk_error("DescribeVpnGateways", e))?;

        Ok(output
            .vpn_gateways()
            .iter()
            .filter_map(|vgw| {
                Some(VpnGateway {
                    vpn_gateway_id: vgw.vpn_gateway_id()?.to_string(),
                    attached_vpc_ids: vgw
                        .vpc_attachments()
                        .iter()
                        .filter(|a| a.state() != Some(&AttachmentStatus::Detached))
                        .filter_map(|a| owned(a.vpc_id()))
                        .collect(),
                    state: vgw.state().map(|s| s.as_str().to_string()),
                })
            })
            .collect())
    }

    pub async fn detach_vpn_gateway(&self, vpn_gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.client
            .detach_vpn_gateway()
            .vpn_gateway_id(vpn_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| sdk_error("DetachVpnGateway", e))?;
        Ok(())
    }

    pub async fn delete_vpn_gateway(&self, vpn_gateway_id: &str) -> Result<()> {
        self.client
            .delete_vpn_gateway()
            .vpn_gateway_id(vpn_gateway_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteVpnGateway", e))?;
        Ok(())
    }
}
