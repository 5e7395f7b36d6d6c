//! EKS cluster and node group calls

use crate::aws::context::AwsContext;
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::Cluster;
use anyhow::{Context, Result};
use aws_sdk_eks::Client;
use tracing::debug;

/// EKS client for resolving and deleting a cluster
pub struct EksClient {
    client: Client,
}

impl EksClient {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.eks_client(),
        }
    }

    /// Describe a cluster, returning its name and VPC
    pub async fn describe_cluster(&self, name: &str) -> Result<Cluster> {
        let output = self
            .client
            .describe_cluster()
            .name(name)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeCluster", e))?;

        let cluster = output
            .cluster()
            .context("DescribeCluster returned no cluster")?;

        Ok(Cluster {
            name: cluster.name().unwrap_or(name).to_string(),
            vpc_id: cluster
                .resources_vpc_config()
                .and_then(|c| c.vpc_id())
                .map(str::to_string),
        })
    }

    pub async fn list_nodegroups(
        &self,
        cluster_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        let output = self
            .client
            .list_nodegroups()
            .cluster_name(cluster_name)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("ListNodegroups", e))?;

        Ok(Page {
            items: output.nodegroups().to_vec(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    pub async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()> {
        debug!(cluster = %cluster_name, nodegroup = %nodegroup_name, "Deleting node group");
        self.client
            .delete_nodegroup()
            .cluster_name(cluster_name)
            .nodegroup_name(nodegroup_name)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteNodegroup", e))?;
        Ok(())
    }

    pub async fn delete_cluster(&self, name: &str) -> Result<()> {
        debug!(cluster = %name, "Deleting cluster");
        self.client
            .delete_cluster()
            .name(name)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteCluster", e))?;
        Ok(())
    }
}

/// Trait for EKS operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait EksOperations: Send + Sync {
    async fn describe_cluster(&self, name: &str) -> Result<Cluster>;

    async fn list_nodegroups(
        &self,
        cluster_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()>;

    async fn delete_cluster(&self, name: &str) -> Result<()>;
}

impl EksOperations for EksClient {
    async fn describe_cluster(&self, name: &str) -> Result<Cluster> {
        EksClient::describe_cluster(self, name).await
    }

    async fn list_nodegroups(
        &self,
        cluster_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        EksClient::list_nodegroups(self, cluster_name, next_token).await
    }

    async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()> {
        EksClient::delete_nodegroup(self, cluster_name, nodegroup_name).await
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        EksClient::delete_cluster(self, name).await
    }
}
