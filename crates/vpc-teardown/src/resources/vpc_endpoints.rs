use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::VpcEndpoint;
use crate::aws::Ec2Operations;
use anyhow::Result;
use tracing::info;
use vpc_teardown_common::ResourceKind;

pub struct VpcEndpoints<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> VpcEndpoints<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for VpcEndpoints<'_, E> {
    type Item = VpcEndpoint;

    const KIND: ResourceKind = ResourceKind::VpcEndpoints;

    fn id(item: &VpcEndpoint) -> &str {
        &item.vpc_endpoint_id
    }

    fn belongs_to(item: &VpcEndpoint, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<VpcEndpoint>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        let endpoints = collect_all(move |token| ec2.describe_vpc_endpoints(vpc_id, token)).await?;
        if !endpoints.is_empty() {
            let labels: Vec<String> = endpoints.iter().map(VpcEndpoint::label).collect();
            info!(vpc_id = %vpc_id, endpoints = ?labels, "Listed VPC endpoints");
        }
        Ok(endpoints)
    }

    async fn delete_item(&self, item: &VpcEndpoint, _vpc_id: &str) -> Result<(), DeletionError> {
        self.ec2
            .delete_vpc_endpoint(&item.vpc_endpoint_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteVpcEndpoints", &item.vpc_endpoint_id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::MockEc2Operations;
    use crate::aws::pagination::Page;
    use crate::resources::sweep;
    use crate::testing::sweep_ctx;
    use mockall::predicate::eq;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_endpoint_in_other_vpc_is_skipped() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_vpc_endpoints().returning(|_, _| {
            Ok(Page::last(vec![
                VpcEndpoint {
                    vpc_endpoint_id: "vpce-1".to_string(),
                    vpc_id: Some("vpc-1".to_string()),
                    name: Some("s3".to_string()),
                },
                VpcEndpoint {
                    vpc_endpoint_id: "vpce-stale".to_string(),
                    vpc_id: Some("vpc-9".to_string()),
                    name: None,
                },
            ]))
        });
        ec2.expect_delete_vpc_endpoint()
            .with(eq("vpce-1"))
            .times(1)
            .returning(|_| Ok(()));

        let cancel = CancellationToken::new();
        let errors = sweep(&VpcEndpoints::new(&ec2), &sweep_ctx("vpc-1", false, &cancel))
            .await
            .unwrap();
        assert!(errors.is_empty());
    }
}
