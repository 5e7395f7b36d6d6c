//! Application and Network Load Balancer calls (ELBv2)

use crate::aws::context::AwsContext;
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::LoadBalancer;
use anyhow::Result;
use aws_sdk_elasticloadbalancingv2::Client;

/// ELBv2 client
pub struct ElbClient {
    client: Client,
}

impl ElbClient {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.elbv2_client(),
        }
    }

    /// List load balancers in the region.
    ///
    /// ELBv2 cannot filter by VPC server-side; callers match on `vpc_id`.
    pub async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> Result<Page<LoadBalancer>> {
        let output = self
            .client
            .describe_load_balancers()
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeLoadBalancers", e))?;

        let items = output
            .load_balancers()
            .iter()
            .filter_map(|lb| {
                Some(LoadBalancer {
                    load_balancer_arn: lb.load_balancer_arn()?.to_string(),
                    name: lb.load_balancer_name().map(str::to_string),
                    vpc_id: lb.vpc_id().map(str::to_string),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_marker().map(str::to_string),
        })
    }

    pub async fn delete_load_balancer(&self, load_balancer_arn: &str) -> Result<()> {
        self.client
            .delete_load_balancer()
            .load_balancer_arn(load_balancer_arn)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteLoadBalancer", e))?;
        Ok(())
    }
}

/// Trait for ELBv2 operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait ElbOperations: Send + Sync {
    async fn describe_load_balancers(&self, marker: Option<String>) -> Result<Page<LoadBalancer>>;

    async fn delete_load_balancer(&self, load_balancer_arn: &str) -> Result<()>;
}

impl ElbOperations for ElbClient {
    async fn describe_load_balancers(&self, marker: Option<String>) -> Result<Page<LoadBalancer>> {
        ElbClient::describe_load_balancers(self, marker).await
    }

    async fn delete_load_balancer(&self, load_balancer_arn: &str) -> Result<()> {
        ElbClient::delete_load_balancer(self, load_balancer_arn).await
    }
}
