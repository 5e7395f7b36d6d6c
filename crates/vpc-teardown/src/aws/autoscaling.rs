//! Auto Scaling group calls

use crate::aws::context::AwsContext;
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::{AutoScalingFilter, AutoScalingGroup};
use anyhow::Result;
use aws_sdk_autoscaling::{Client, types::Filter};

/// The `tag-key` and `tag-value` clauses matching groups tagged by `filter`
fn tag_filters(filter: &AutoScalingFilter) -> Vec<Filter> {
    vec![
        Filter::builder()
            .name("tag-key")
            .values(&filter.tag_key)
            .build(),
        Filter::builder()
            .name("tag-value")
            .values(&filter.tag_value)
            .build(),
    ]
}

/// Auto Scaling client
pub struct AutoScalingClient {
    client: Client,
}

impl AutoScalingClient {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.autoscaling_client(),
        }
    }

    /// List groups carrying the filter's tag key and value
    pub async fn describe_auto_scaling_groups(
        &self,
        filter: &AutoScalingFilter,
        next_token: Option<String>,
    ) -> Result<Page<AutoScalingGroup>> {
        let output = self
            .client
            .describe_auto_scaling_groups()
            .set_filters(Some(tag_filters(filter)))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeAutoScalingGroups", e))?;

        let items = output
            .auto_scaling_groups()
            .iter()
            .filter_map(|group| {
                Some(AutoScalingGroup {
                    name: group.auto_scaling_group_name()?.to_string(),
                    subnet_ids: AutoScalingGroup::parse_subnet_ids(group.vpc_zone_identifier()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    /// Force-delete a group, terminating its instances
    pub async fn delete_auto_scaling_group(&self, name: &str) -> Result<()> {
        self.client
            .delete_auto_scaling_group()
            .auto_scaling_group_name(name)
            .force_delete(true)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteAutoScalingGroup", e))?;
        Ok(())
    }
}

/// Trait for Auto Scaling operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait AutoScalingOperations: Send + Sync {
    async fn describe_auto_scaling_groups(
        &self,
        filter: &AutoScalingFilter,
        next_token: Option<String>,
    ) -> Result<Page<AutoScalingGroup>>;

    async fn delete_auto_scaling_group(&self, name: &str) -> Result<()>;
}

impl AutoScalingOperations for AutoScalingClient {
    async fn describe_auto_scaling_groups(
        &self,
        filter: &AutoScalingFilter,
        next_token: Option<String>,
    ) -> Result<Page<AutoScalingGroup>> {
        AutoScalingClient::describe_auto_scaling_groups(self, filter, next_token).await
    }

    async fn delete_auto_scaling_group(&self, name: &str) -> Result<()> {
        AutoScalingClient::delete_auto_scaling_group(self, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filters_have_key_and_value_clauses() {
        let filter = AutoScalingFilter {
            tag_key: "k8s.io/cluster/demo".to_string(),
            tag_value: "owned".to_string(),
        };

        let filters = tag_filters(&filter);
        let clauses: Vec<(Option<&str>, &[String])> =
            filters.iter().map(|f| (f.name(), f.values())).collect();

        assert_eq!(
            clauses,
            vec![
                (Some("tag-key"), &["k8s.io/cluster/demo".to_string()][..]),
                (Some("tag-value"), &["owned".to_string()][..]),
            ]
        );
    }
}
