use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::NatGateway;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct NatGateways<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> NatGateways<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for NatGateways<'_, E> {
    type Item = NatGateway;

    const KIND: ResourceKind = ResourceKind::NatGateways;

    fn id(item: &NatGateway) -> &str {
        &item.nat_gateway_id
    }

    fn belongs_to(item: &NatGateway, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    /// Deleted gateways stay listed for a while
    fn is_excluded(item: &NatGateway) -> bool {
        item.is_deleting()
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<NatGateway>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_nat_gateways(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &NatGateway, _vpc_id: &str) -> Result<(), DeletionError> {
        self.ec2
            .delete_nat_gateway(&item.nat_gateway_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteNatGateway", &item.nat_gateway_id, e))
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

    fn nat(id: &str, state: &str) -> NatGateway {
        NatGateway {
            nat_gateway_id: id.to_string(),
            vpc_id: Some("vpc-1".to_string()),
            state: Some(state.to_string()),
        }
    }

    #[tokio::test]
    async fn test_deleting_gateways_are_skipped() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_nat_gateways().returning(|_, _| {
            Ok(Page::last(vec![
                nat("nat-live", "available"),
                nat("nat-going", "deleting"),
                nat("nat-gone", "deleted"),
            ]))
        });
        ec2.expect_delete_nat_gateway()
            .with(eq("nat-live"))
            .times(1)
            .returning(|_| Ok(()));

        let cancel = CancellationToken::new();
        let errors = sweep(&NatGateways::new(&ec2), &sweep_ctx("vpc-1", false, &cancel))
            .await
            .unwrap();
        assert!(errors.is_empty());
    }
}
