//! ELBv2 load balancers placed in the VPC

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::paginate;
use crate::aws::types::LoadBalancer;
use crate::aws::ElbOperations;
use anyhow::Result;
use futures::TryStreamExt;
use vpc_teardown_common::ResourceKind;

pub struct LoadBalancers<'a, L> {
    elb: &'a L,
}

impl<'a, L: ElbOperations> LoadBalancers<'a, L> {
    pub fn new(elb: &'a L) -> Self {
        Self { elb }
    }
}

impl<L: ElbOperations> VpcResource for LoadBalancers<'_, L> {
    type Item = LoadBalancer;

    const KIND: ResourceKind = ResourceKind::LoadBalancers;

    fn id(item: &LoadBalancer) -> &str {
        &item.load_balancer_arn
    }

    fn belongs_to(item: &LoadBalancer, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    /// ELBv2 has no server-side VPC filter, so the region-wide listing is
    /// narrowed while streaming
    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<LoadBalancer>> {
        let (elb, vpc_id) = (self.elb, ctx.vpc_id);
        paginate(move |marker| elb.describe_load_balancers(marker))
            .try_filter(|lb| futures::future::ready(lb.vpc_id.as_deref() == Some(vpc_id)))
            .try_collect()
            .await
    }

    async fn delete_item(&self, item: &LoadBalancer, _vpc_id: &str) -> Result<(), DeletionError> {
        self.elb
            .delete_load_balancer(&item.load_balancer_arn)
            .await
            .map_err(|e| {
                DeletionError::new(Self::KIND, "DeleteLoadBalancer", &item.load_balancer_arn, e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::elb::MockElbOperations;
    use crate::aws::pagination::Page;
    use crate::resources::sweep;
    use crate::testing::sweep_ctx;
    use mockall::predicate::eq;
    use tokio_util::sync::CancellationToken;

    fn lb(name: &str, vpc: &str) -> LoadBalancer {
        LoadBalancer {
            load_balancer_arn: format!(
                "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/{name}/1"
            ),
            name: Some(name.to_string()),
            vpc_id: Some(vpc.to_string()),
        }
    }

    #[tokio::test]
    async fn test_only_vpc_load_balancers_deleted_across_pages() {
        let mut elb = MockElbOperations::new();
        elb.expect_describe_load_balancers()
            .with(eq(None::<String>))
            .returning(|_| Ok(Page::more(vec![lb("web", "vpc-1"), lb("other", "vpc-2")], "m1")));
        elb.expect_describe_load_balancers()
            .with(eq(Some("m1".to_string())))
            .returning(|_| Ok(Page::last(vec![lb("api", "vpc-1")])));
        elb.expect_delete_load_balancer()
            .withf(|arn| arn.contains("/web/") || arn.contains("/api/"))
            .times(2)
            .returning(|_| Ok(()));

        let cancel = CancellationToken::new();
        let errors = sweep(&LoadBalancers::new(&elb), &sweep_ctx("vpc-1", false, &cancel))
            .await
            .unwrap();
        assert!(errors.is_empty());
    }
}
