//! Instance calls used by the reservations sweep

use super::{Ec2Client, owned, vpc_filter};
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::Instance;
use anyhow::Result;
use tracing::debug;

impl Ec2Client {
    /// List instances launched into the VPC, flattened across reservations
    pub async fn describe_instances(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Instance>> {
        let output = self
            .client
            .describe_instances()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeInstances", e))?;

        let items = output
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .filter_map(|instance| {
                Some(Instance {
                    instance_id: instance.instance_id()?.to_string(),
                    vpc_id: owned(instance.vpc_id()),
                    state: instance
                        .state()
                        .and_then(|s| s.name())
                        .map(|n| n.as_str().to_string()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn terminate_instance(&self, instance_id: &str) -> Result<()> {
        debug!(instance_id = %instance_id, "Terminating instance");
        self.client
            .terminate_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| sdk_error("TerminateInstances", e))?;
        Ok(())
    }
}
