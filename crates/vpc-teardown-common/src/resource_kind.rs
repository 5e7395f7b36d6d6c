//! Resource types and sweep ordering
//!
//! Names match the values accepted by `--include` and `--exclude`. Sweep
//! priority keeps each pass in dependency order so that most resources are
//! already gone by the time the resources they depend on are attempted.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resource types that block deletion of a VPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    AutoScalingGroups,
    /// EKS cluster and its node groups (gates cluster teardown, not swept)
    Clusters,
    ElasticIps,
    InternetGateways,
    LoadBalancers,
    NatGateways,
    NetworkAcls,
    NetworkInterfaces,
    /// EC2 instances, grouped by reservation in the EC2 API
    Reservations,
    RouteTables,
    SecurityGroups,
    Subnets,
    VpcPeeringConnections,
    VpnGateways,
    VpcEndpoints,
}

/// Error returned when a resource-type name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource type {name:?} (expected one of: {})", ResourceKind::names().join(", "))]
pub struct ResourceKindParseError {
    pub name: String,
}

impl ResourceKind {
    /// Every recognized resource type, in CLI listing order
    pub const ALL: [ResourceKind; 15] = [
        ResourceKind::AutoScalingGroups,
        ResourceKind::Clusters,
        ResourceKind::ElasticIps,
        ResourceKind::InternetGateways,
        ResourceKind::LoadBalancers,
        ResourceKind::NatGateways,
        ResourceKind::NetworkAcls,
        ResourceKind::NetworkInterfaces,
        ResourceKind::Reservations,
        ResourceKind::RouteTables,
        ResourceKind::SecurityGroups,
        ResourceKind::Subnets,
        ResourceKind::VpcPeeringConnections,
        ResourceKind::VpnGateways,
        ResourceKind::VpcEndpoints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::AutoScalingGroups => "AutoScalingGroups",
            ResourceKind::Clusters => "Clusters",
            ResourceKind::ElasticIps => "ElasticIps",
            ResourceKind::InternetGateways => "InternetGateways",
            ResourceKind::LoadBalancers => "LoadBalancers",
            ResourceKind::NatGateways => "NatGateways",
            ResourceKind::NetworkAcls => "NetworkAcls",
            ResourceKind::NetworkInterfaces => "NetworkInterfaces",
            ResourceKind::Reservations => "Reservations",
            ResourceKind::RouteTables => "RouteTables",
            ResourceKind::SecurityGroups => "SecurityGroups",
            ResourceKind::Subnets => "Subnets",
            ResourceKind::VpcPeeringConnections => "VpcPeeringConnections",
            ResourceKind::VpnGateways => "VpnGateways",
            ResourceKind::VpcEndpoints => "VpcEndpoints",
        }
    }

    /// All recognized names, in CLI listing order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }

    /// Get sweep priority (lower number = attempted first in a pass)
    ///
    /// - 0: Autoscaling groups (otherwise they relaunch terminated instances)
    /// - 1: Load balancers (hold network interfaces in every subnet)
    /// - 2: Instances
    /// - 3: NAT gateways, VPC endpoints, peering connections
    /// - 4: Elastic IPs (released once NAT gateways let go of them)
    /// - 5: VPN and internet gateways
    /// - 6: Leftover network interfaces
    /// - 7: Security groups
    /// - 8: Route tables
    /// - 9: Subnets
    /// - 10: Network ACLs
    /// - 11: Clusters (handled after the VPC is gone)
    pub fn sweep_priority(self) -> u8 {
        match self {
            ResourceKind::AutoScalingGroups => 0,
            ResourceKind::LoadBalancers => 1,
            ResourceKind::Reservations => 2,
            ResourceKind::NatGateways => 3,
            ResourceKind::VpcEndpoints => 3,
            ResourceKind::VpcPeeringConnections => 3,
            ResourceKind::ElasticIps => 4,
            ResourceKind::VpnGateways => 5,
            ResourceKind::InternetGateways => 5,
            ResourceKind::NetworkInterfaces => 6,
            ResourceKind::SecurityGroups => 7,
            ResourceKind::RouteTables => 8,
            ResourceKind::Subnets => 9,
            ResourceKind::NetworkAcls => 10,
            ResourceKind::Clusters => 11,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| ResourceKindParseError {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_name() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_unknown_name_lists_valid_names() {
        let err = "Buckets".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err.name, "Buckets");
        let msg = err.to_string();
        assert!(msg.contains("SecurityGroups"));
        assert!(msg.contains("VpcEndpoints"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("subnets".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_instances_before_security_groups() {
        assert!(
            ResourceKind::Reservations.sweep_priority()
                < ResourceKind::SecurityGroups.sweep_priority(),
            "Instances must be terminated before their security groups"
        );
    }

    #[test]
    fn test_subnets_after_their_occupants() {
        for kind in [
            ResourceKind::Reservations,
            ResourceKind::NatGateways,
            ResourceKind::LoadBalancers,
            ResourceKind::NetworkInterfaces,
            ResourceKind::RouteTables,
        ] {
            assert!(
                kind.sweep_priority() < ResourceKind::Subnets.sweep_priority(),
                "{kind} must be swept before subnets"
            );
        }
    }

    #[test]
    fn test_clusters_last() {
        let max = ResourceKind::ALL
            .iter()
            .map(|k| k.sweep_priority())
            .max()
            .unwrap();
        assert_eq!(ResourceKind::Clusters.sweep_priority(), max);
    }
}
