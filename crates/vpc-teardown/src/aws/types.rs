//! Provider-neutral views of the resources a teardown touches
//!
//! Each view is read fresh from AWS on every pass and carries only what the
//! teardown needs: the resource id, its VPC association, and the fields that
//! decide whether it is a deletion candidate.

/// VPC found by tag lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vpc {
    pub vpc_id: String,
    pub name: Option<String>,
}

/// EKS cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub subnet_id: String,
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: Option<String>,
    pub vpc_id: Option<String>,
}

impl SecurityGroup {
    /// The VPC's default group cannot be deleted
    pub fn is_default(&self) -> bool {
        self.group_name.as_deref() == Some("default")
    }
}

/// Ingress or egress rule of a security group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupRule {
    pub rule_id: String,
    pub group_id: String,
    pub is_egress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAcl {
    pub network_acl_id: String,
    pub vpc_id: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcEndpoint {
    pub vpc_endpoint_id: String,
    pub vpc_id: Option<String>,
    /// Value of the `Name` tag, for logs
    pub name: Option<String>,
}

impl VpcEndpoint {
    /// `id:name` label used in logs
    pub fn label(&self) -> String {
        format!(
            "{}:{}",
            self.vpc_endpoint_id,
            self.name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcPeeringConnection {
    pub vpc_peering_connection_id: String,
    pub accepter_vpc_id: Option<String>,
    pub requester_vpc_id: Option<String>,
}

impl VpcPeeringConnection {
    /// True when the VPC is either side of the connection
    pub fn involves(&self, vpc_id: &str) -> bool {
        self.accepter_vpc_id.as_deref() == Some(vpc_id)
            || self.requester_vpc_id.as_deref() == Some(vpc_id)
    }
}

/// Which side of a peering connection a listing filter matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeeringRole {
    Accepter,
    Requester,
}

impl PeeringRole {
    pub const ALL: [PeeringRole; 2] = [PeeringRole::Accepter, PeeringRole::Requester];

    /// EC2 filter name selecting connections where the VPC plays this role
    pub fn filter_name(self) -> &'static str {
        match self {
            PeeringRole::Accepter => "accepter-vpc-info.vpc-id",
            PeeringRole::Requester => "requester-vpc-info.vpc-id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternetGateway {
    pub internet_gateway_id: String,
    pub attached_vpc_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatGateway {
    pub nat_gateway_id: String,
    pub vpc_id: Option<String>,
    pub state: Option<String>,
}

impl NatGateway {
    /// Deletion already requested or finished
    pub fn is_deleting(&self) -> bool {
        matches!(self.state.as_deref(), Some("deleting" | "deleted"))
    }
}

/// Elastic IP address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub allocation_id: String,
    pub association_id: Option<String>,
    pub network_interface_id: Option<String>,
    pub public_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub route_table_id: String,
    pub vpc_id: Option<String>,
    pub is_main: bool,
    /// Explicit (non-main) association ids
    pub association_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub vpc_id: Option<String>,
    pub requester_managed: bool,
    pub attachment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnGateway {
    pub vpn_gateway_id: String,
    /// VPCs the gateway is attached (or attaching) to
    pub attached_vpc_ids: Vec<String>,
    pub state: Option<String>,
}

impl VpnGateway {
    pub fn is_deleted(&self) -> bool {
        matches!(self.state.as_deref(), Some("deleting" | "deleted"))
    }
}

/// EC2 instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: String,
    pub vpc_id: Option<String>,
    pub state: Option<String>,
}

impl Instance {
    /// Already terminated or on its way there
    pub fn is_terminating(&self) -> bool {
        matches!(self.state.as_deref(), Some("shutting-down" | "terminated"))
    }
}

/// ELBv2 load balancer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancer {
    pub load_balancer_arn: String,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScalingGroup {
    pub name: String,
    pub subnet_ids: Vec<String>,
}

impl AutoScalingGroup {
    /// Split the comma-separated `VPCZoneIdentifier` into subnet ids
    pub fn parse_subnet_ids(vpc_zone_identifier: Option<&str>) -> Vec<String> {
        vpc_zone_identifier
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Two-clause tag filter used to discover autoscaling groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScalingFilter {
    pub tag_key: String,
    pub tag_value: String,
}
