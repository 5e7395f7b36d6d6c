//! Test fixtures and mock client bundle

use crate::aws::autoscaling::MockAutoScalingOperations;
use crate::aws::eks::MockEksOperations;
use crate::aws::elb::MockElbOperations;
use crate::aws::pagination::Page;
use crate::aws::types::{
    Address, AutoScalingFilter, AutoScalingGroup, Instance, InternetGateway, LoadBalancer,
    NatGateway, NetworkAcl, NetworkInterface, RouteTable, SecurityGroup, Subnet, VpcEndpoint,
    VpcPeeringConnection, VpnGateway,
};
use crate::aws::{CloudClients, MockEc2Operations, classify_aws_error};
use crate::resources::SweepContext;
use tokio_util::sync::CancellationToken;
use vpc_teardown_common::defaults::DEFAULT_AUTOSCALING_TAG_VALUE;
use vpc_teardown_common::tags::cluster_ownership_tag;

/// Mocked stand-ins for every AWS service client
pub struct MockClients {
    pub ec2: MockEc2Operations,
    pub eks: MockEksOperations,
    pub autoscaling: MockAutoScalingOperations,
    pub elb: MockElbOperations,
}

impl MockClients {
    pub fn new() -> Self {
        Self {
            ec2: MockEc2Operations::new(),
            eks: MockEksOperations::new(),
            autoscaling: MockAutoScalingOperations::new(),
            elb: MockElbOperations::new(),
        }
    }

    /// Mocks whose listings return one deletable item of every resource type
    /// in `vpc_id`, and no expectations for any mutating call.
    pub fn listing_everything(vpc_id: &str) -> Self {
        let mut clients = Self::new();
        let vpc = vpc_id.to_string();

        let v = vpc.clone();
        clients.ec2.expect_describe_subnets().returning(move |_, _| {
            Ok(Page::last(vec![Subnet {
                subnet_id: "subnet-1".to_string(),
                vpc_id: Some(v.clone()),
            }]))
        });
        let v = vpc.clone();
        clients
            .ec2
            .expect_describe_security_groups()
            .returning(move |_, _| {
                Ok(Page::last(vec![SecurityGroup {
                    group_id: "sg-1".to_string(),
                    group_name: Some("app".to_string()),
                    vpc_id: Some(v.clone()),
                }]))
            });
        let v = vpc.clone();
        clients.ec2.expect_describe_network_acls().returning(move |_, _| {
            Ok(Page::last(vec![NetworkAcl {
                network_acl_id: "acl-1".to_string(),
                vpc_id: Some(v.clone()),
                is_default: false,
            }]))
        });
        let v = vpc.clone();
        clients.ec2.expect_describe_vpc_endpoints().returning(move |_, _| {
            Ok(Page::last(vec![VpcEndpoint {
                vpc_endpoint_id: "vpce-1".to_string(),
                vpc_id: Some(v.clone()),
                name: None,
            }]))
        });
        let v = vpc.clone();
        clients
            .ec2
            .expect_describe_vpc_peering_connections()
            .returning(move |_, _, _| {
                Ok(Page::last(vec![VpcPeeringConnection {
                    vpc_peering_connection_id: "pcx-1".to_string(),
                    accepter_vpc_id: Some(v.clone()),
                    requester_vpc_id: Some("vpc-peer".to_string()),
                }]))
            });
        let v = vpc.clone();
        clients
            .ec2
            .expect_describe_internet_gateways()
            .returning(move |_, _| {
                Ok(Page::last(vec![InternetGateway {
                    internet_gateway_id: "igw-1".to_string(),
                    attached_vpc_ids: vec![v.clone()],
                }]))
            });
        let v = vpc.clone();
        clients.ec2.expect_describe_nat_gateways().returning(move |_, _| {
            Ok(Page::last(vec![NatGateway {
                nat_gateway_id: "nat-1".to_string(),
                vpc_id: Some(v.clone()),
                state: Some("available".to_string()),
            }]))
        });
        clients.ec2.expect_describe_addresses().returning(|| {
            Ok(vec![Address {
                allocation_id: "eipalloc-1".to_string(),
                association_id: Some("eipassoc-1".to_string()),
                network_interface_id: Some("eni-1".to_string()),
                public_ip: Some("198.51.100.7".to_string()),
            }])
        });
        let v = vpc.clone();
        clients.ec2.expect_describe_route_tables().returning(move |_, _| {
            Ok(Page::last(vec![RouteTable {
                route_table_id: "rtb-1".to_string(),
                vpc_id: Some(v.clone()),
                is_main: false,
                association_ids: vec!["rtbassoc-1".to_string()],
            }]))
        });
        let v = vpc.clone();
        clients
            .ec2
            .expect_describe_network_interfaces()
            .returning(move |_, _| {
                Ok(Page::last(vec![NetworkInterface {
                    network_interface_id: "eni-1".to_string(),
                    vpc_id: Some(v.clone()),
                    requester_managed: false,
                    attachment_id: Some("eni-attach-1".to_string()),
                }]))
            });
        let v = vpc.clone();
        clients.ec2.expect_describe_vpn_gateways().returning(move |_| {
            Ok(vec![VpnGateway {
                vpn_gateway_id: "vgw-1".to_string(),
                attached_vpc_ids: vec![v.clone()],
                state: Some("available".to_string()),
            }])
        });
        let v = vpc.clone();
        clients.ec2.expect_describe_instances().returning(move |_, _| {
            Ok(Page::last(vec![Instance {
                instance_id: "i-1".to_string(),
                vpc_id: Some(v.clone()),
                state: Some("running".to_string()),
            }]))
        });
        let v = vpc.clone();
        clients.elb.expect_describe_load_balancers().returning(move |_| {
            Ok(Page::last(vec![LoadBalancer {
                load_balancer_arn: "arn:aws:elasticloadbalancing:lb/app/web/1".to_string(),
                name: Some("web".to_string()),
                vpc_id: Some(v.clone()),
            }]))
        });
        clients
            .autoscaling
            .expect_describe_auto_scaling_groups()
            .returning(|_, _| {
                Ok(Page::last(vec![AutoScalingGroup {
                    name: "workers".to_string(),
                    subnet_ids: vec!["subnet-1".to_string()],
                }]))
            });

        clients
    }
}

impl Default for MockClients {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudClients for MockClients {
    type Ec2 = MockEc2Operations;
    type Eks = MockEksOperations;
    type AutoScaling = MockAutoScalingOperations;
    type Elb = MockElbOperations;

    fn ec2(&self) -> &MockEc2Operations {
        &self.ec2
    }

    fn eks(&self) -> &MockEksOperations {
        &self.eks
    }

    fn autoscaling(&self) -> &MockAutoScalingOperations {
        &self.autoscaling
    }

    fn elb(&self) -> &MockElbOperations {
        &self.elb
    }
}

/// Sweep context with no autoscaling filter
pub fn sweep_ctx<'a>(
    vpc_id: &'a str,
    dry_run: bool,
    cancel: &'a CancellationToken,
) -> SweepContext<'a> {
    SweepContext {
        vpc_id,
        dry_run,
        autoscaling_filter: None,
        cancel,
    }
}

/// Ownership filter a cluster-provisioning tool applies to `cluster`'s groups
pub fn owned_filter(cluster: &str) -> AutoScalingFilter {
    AutoScalingFilter {
        tag_key: cluster_ownership_tag(cluster),
        tag_value: DEFAULT_AUTOSCALING_TAG_VALUE.to_string(),
    }
}

/// An error as the client layer reports an AWS failure with `code`
pub fn aws_error(operation: &'static str, code: &str) -> anyhow::Error {
    anyhow::Error::new(classify_aws_error(Some(code), Some("from aws"))).context(operation)
}
