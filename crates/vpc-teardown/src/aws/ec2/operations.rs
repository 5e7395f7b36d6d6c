//! EC2 operations trait for testing

use super::Ec2Client;
use crate::aws::pagination::Page;
use crate::aws::types::{
    Address, Instance, InternetGateway, NatGateway, NetworkAcl, NetworkInterface, PeeringRole,
    RouteTable, SecurityGroup, SecurityGroupRule, Subnet, Vpc, VpcEndpoint, VpcPeeringConnection,
    VpnGateway,
};
use anyhow::Result;

/// Trait for EC2 operations that can be mocked in tests.
///
/// List operations return one [`Page`] per call; pass the previous page's
/// token back in to continue.
///
/// Note: continuation tokens are `Option<String>` instead of `Option<&str>`
/// to work around mockall lifetime limitations.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// Find VPCs tagged `Name=<name>`
    async fn find_vpcs_by_name(&self, name: &str, next_token: Option<String>)
    -> Result<Page<Vpc>>;

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()>;

    async fn describe_subnets(&self, vpc_id: &str, next_token: Option<String>)
    -> Result<Page<Subnet>>;

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()>;

    async fn describe_security_groups(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroup>>;

    async fn describe_security_group_rules(
        &self,
        group_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroupRule>>;

    /// Revoke rules by id; `egress` selects the direction
    async fn revoke_security_group_rules(
        &self,
        group_id: &str,
        egress: bool,
        rule_ids: Vec<String>,
    ) -> Result<()>;

    async fn delete_security_group(&self, group_id: &str) -> Result<()>;

    async fn describe_network_acls(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkAcl>>;

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()>;

    async fn describe_vpc_endpoints(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcEndpoint>>;

    async fn delete_vpc_endpoint(&self, vpc_endpoint_id: &str) -> Result<()>;

    /// List peering connections where the VPC is on the given side
    async fn describe_vpc_peering_connections(
        &self,
        role: PeeringRole,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcPeeringConnection>>;

    async fn delete_vpc_peering_connection(&self, vpc_peering_connection_id: &str) -> Result<()>;

    async fn describe_internet_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<InternetGateway>>;

    async fn detach_internet_gateway(&self, internet_gateway_id: &str, vpc_id: &str)
    -> Result<()>;

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<()>;

    async fn describe_nat_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NatGateway>>;

    async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<()>;

    /// All VPC-domain Elastic IPs in the region
    async fn describe_addresses(&self) -> Result<Vec<Address>>;

    async fn disassociate_address(&self, association_id: &str) -> Result<()>;

    async fn release_address(&self, allocation_id: &str) -> Result<()>;

    async fn describe_route_tables(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<RouteTable>>;

    async fn disassociate_route_table(&self, association_id: &str) -> Result<()>;

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()>;

    async fn describe_network_interfaces(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkInterface>>;

    async fn detach_network_interface(&self, attachment_id: &str) -> Result<()>;

    async fn delete_network_interface(&self, network_interface_id: &str) -> Result<()>;

    async fn describe_vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>>;

    async fn detach_vpn_gateway(&self, vpn_gateway_id: &str, vpc_id: &str) -> Result<()>;

    async fn delete_vpn_gateway(&self, vpn_gateway_id: &str) -> Result<()>;

    async fn describe_instances(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Instance>>;

    async fn terminate_instance(&self, instance_id: &str) -> Result<()>;
}

impl Ec2Operations for Ec2Client {
    async fn find_vpcs_by_name(&self, name: &str, next_token: Option<String>) -> Result<Page<Vpc>> {
        Ec2Client::find_vpcs_by_name(self, name, next_token).await
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        Ec2Client::delete_vpc(self, vpc_id).await
    }

    async fn describe_subnets(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Subnet>> {
        Ec2Client::describe_subnets(self, vpc_id, next_token).await
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        Ec2Client::delete_subnet(self, subnet_id).await
    }

    async fn describe_security_groups(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroup>> {
        Ec2Client::describe_security_groups(self, vpc_id, next_token).await
    }

    async fn describe_security_group_rules(
        &self,
        group_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroupRule>> {
        Ec2Client::describe_security_group_rules(self, group_id, next_token).await
    }

    async fn revoke_security_group_rules(
        &self,
        group_id: &str,
        egress: bool,
        rule_ids: Vec<String>,
    ) -> Result<()> {
        Ec2Client::revoke_security_group_rules(self, group_id, egress, rule_ids).await
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<()> {
        Ec2Client::delete_security_group(self, group_id).await
    }

    async fn describe_network_acls(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkAcl>> {
        Ec2Client::describe_network_acls(self, vpc_id, next_token).await
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()> {
        Ec2Client::delete_network_acl(self, network_acl_id).await
    }

    async fn describe_vpc_endpoints(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcEndpoint>> {
        Ec2Client::describe_vpc_endpoints(self, vpc_id, next_token).await
    }

    async fn delete_vpc_endpoint(&self, vpc_endpoint_id: &str) -> Result<()> {
        Ec2Client::delete_vpc_endpoint(self, vpc_endpoint_id).await
    }

    async fn describe_vpc_peering_connections(
        &self,
        role: PeeringRole,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcPeeringConnection>> {
        Ec2Client::describe_vpc_peering_connections(self, role, vpc_id, next_token).await
    }

    async fn delete_vpc_peering_connection(&self, vpc_peering_connection_id: &str) -> Result<()> {
        Ec2Client::delete_vpc_peering_connection(self, vpc_peering_connection_id).await
    }

    async fn describe_internet_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<InternetGateway>> {
        Ec2Client::describe_internet_gateways(self, vpc_id, next_token).await
    }

    async fn detach_internet_gateway(&self, internet_gateway_id: &str, vpc_id: &str) -> Result<()> {
        Ec2Client::detach_internet_gateway(self, internet_gateway_id, vpc_id).await
    }

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<()> {
        Ec2Client::delete_internet_gateway(self, internet_gateway_id).await
    }

    async fn describe_nat_gateways(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NatGateway>> {
        Ec2Client::describe_nat_gateways(self, vpc_id, next_token).await
    }

    async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<()> {
        Ec2Client::delete_nat_gateway(self, nat_gateway_id).await
    }

    async fn describe_addresses(&self) -> Result<Vec<Address>> {
        Ec2Client::describe_addresses(self).await
    }

    async fn disassociate_address(&self, association_id: &str) -> Result<()> {
        Ec2Client::disassociate_address(self, association_id).await
    }

    async fn release_address(&self, allocation_id: &str) -> Result<()> {
        Ec2Client::release_address(self, allocation_id).await
    }

    async fn describe_route_tables(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<RouteTable>> {
        Ec2Client::describe_route_tables(self, vpc_id, next_token).await
    }

    async fn disassociate_route_table(&self, association_id: &str) -> Result<()> {
        Ec2Client::disassociate_route_table(self, association_id).await
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        Ec2Client::delete_route_table(self, route_table_id).await
    }

    async fn describe_network_interfaces(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NetworkInterface>> {
        Ec2Client::describe_network_interfaces(self, vpc_id, next_token).await
    }

    async fn detach_network_interface(&self, attachment_id: &str) -> Result<()> {
        Ec2Client::detach_network_interface(self, attachment_id).await
    }

    async fn delete_network_interface(&self, network_interface_id: &str) -> Result<()> {
        Ec2Client::delete_network_interface(self, network_interface_id).await
    }

    async fn describe_vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>> {
        Ec2Client::describe_vpn_gateways(self, vpc_id).await
    }

    async fn detach_vpn_gateway(&self, vpn_gateway_id: &str, vpc_id: &str) -> Result<()> {
        Ec2Client::detach_vpn_gateway(self, vpn_gateway_id, vpc_id).await
    }

    async fn delete_vpn_gateway(&self, vpn_gateway_id: &str) -> Result<()> {
        Ec2Client::delete_vpn_gateway(self, vpn_gateway_id).await
    }

    async fn describe_instances(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Instance>> {
        Ec2Client::describe_instances(self, vpc_id, next_token).await
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<()> {
        Ec2Client::terminate_instance(self, instance_id).await
    }
}
