//! AWS client modules for VPC teardown
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: VPCs and every network resource that blocks VPC deletion
//! - EKS: Cluster lookup and cluster/node group deletion
//! - Auto Scaling: Tag-filtered group discovery and forced deletion
//! - ELBv2: Load balancers placed in the VPC
//!
//! Each service is reached through a mockable operations trait; [`CloudClients`]
//! bundles one implementation of each so the teardown can run against either
//! real AWS or mocks.

pub mod autoscaling;
pub mod context;
pub mod ec2;
pub mod eks;
pub mod elb;
pub mod error;
pub mod pagination;
pub mod types;

pub use autoscaling::{AutoScalingClient, AutoScalingOperations};
pub use context::AwsContext;
pub use ec2::{Ec2Client, Ec2Operations};
pub use eks::{EksClient, EksOperations};
pub use elb::{ElbClient, ElbOperations};

// Error handling
pub use error::{AwsError, classify_anyhow_error, classify_aws_error, ignore_not_found};

pub use pagination::{Page, collect_all, paginate};

/// One client per AWS service the teardown talks to
pub trait CloudClients: Send + Sync {
    type Ec2: Ec2Operations;
    type Eks: EksOperations;
    type AutoScaling: AutoScalingOperations;
    type Elb: ElbOperations;

    fn ec2(&self) -> &Self::Ec2;
    fn eks(&self) -> &Self::Eks;
    fn autoscaling(&self) -> &Self::AutoScaling;
    fn elb(&self) -> &Self::Elb;
}

/// SDK-backed clients built from one [`AwsContext`]
pub struct AwsClients {
    ec2: Ec2Client,
    eks: EksClient,
    autoscaling: AutoScalingClient,
    elb: ElbClient,
}

impl AwsClients {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            ec2: Ec2Client::from_context(ctx),
            eks: EksClient::from_context(ctx),
            autoscaling: AutoScalingClient::from_context(ctx),
            elb: ElbClient::from_context(ctx),
        }
    }
}

impl CloudClients for AwsClients {
    type Ec2 = Ec2Client;
    type Eks = EksClient;
    type AutoScaling = AutoScalingClient;
    type Elb = ElbClient;

    fn ec2(&self) -> &Ec2Client {
        &self.ec2
    }

    fn eks(&self) -> &EksClient {
        &self.eks
    }

    fn autoscaling(&self) -> &AutoScalingClient {
        &self.autoscaling
    }

    fn elb(&self) -> &ElbClient {
        &self.elb
    }
}
