//! VPC endpoint and peering connection calls

use super::{Ec2Client, named_filter, owned, tag_value, vpc_filter};
use crate::aws::error::{classify_aws_error, sdk_error};
use crate::aws::pagination::Page;
use crate::aws::types::{PeeringRole, VpcEndpoint, VpcPeeringConnection};
use anyhow::Result;
use vpc_teardown_common::tags::TAG_NAME;

impl Ec2Client {
    pub async fn describe_vpc_endpoints(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcEndpoint>> {
        let output = self
            .client
            .describe_vpc_endpoints()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeVpcEndpoints", e))?;

        let items = output
            .vpc_endpoints()
            .iter()
            .filter_map(|endpoint| {
                Some(VpcEndpoint {
                    vpc_endpoint_id: endpoint.vpc_endpoint_id()?.to_string(),
                    vpc_id: owned(endpoint.vpc_id()),
                    name: tag_value(endpoint.tags(), TAG_NAME),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    /// Delete one endpoint.
    ///
    /// DeleteVpcEndpoints reports per-item failures in the response body
    /// rather than as an error, so those are lifted into the error path.
    pub async fn delete_vpc_endpoint(&self, vpc_endpoint_id: &str) -> Result<()> {
        let output = self
            .client
            .delete_vpc_endpoints()
            .vpc_endpoint_ids(vpc_endpoint_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteVpcEndpoints", e))?;

        if let Some(failure) = output.unsuccessful().first() {
            let error = failure.error();
            let classified = classify_aws_error(
                error.and_then(|e| e.code()),
                error.and_then(|e| e.message()),
            );
            return Err(anyhow::Error::new(classified).context("DeleteVpcEndpoints"));
        }
        Ok(())
    }

    /// List peering connections where the VPC plays `role`
    pub async fn describe_vpc_peering_connections(
        &self,
        role: PeeringRole,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<VpcPeeringConnection>> {
        let output = self
            .client
            .describe_vpc_peering_connections()
            .filters(named_filter(role.filter_name(), vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeVpcPeeringConnections", e))?;

        let items = output
            .vpc_peering_connections()
            .iter()
            .filter_map(|pcx| {
                Some(VpcPeeringConnection {
                    vpc_peering_connection_id: pcx.vpc_peering_connection_id()?.to_string(),
                    accepter_vpc_id: pcx.accepter_vpc_info().and_then(|i| owned(i.vpc_id())),
                    requester_vpc_id: pcx.requester_vpc_info().and_then(|i| owned(i.vpc_id())),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    pub async fn delete_vpc_peering_connection(
        &self,
        vpc_peering_connection_id: &str,
    ) -> Result<()> {
        self.client
            .delete_vpc_peering_connection()
            .vpc_peering_connection_id(vpc_peering_connection_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteVpcPeeringConnection", e))?;
        Ok(())
    }
}
