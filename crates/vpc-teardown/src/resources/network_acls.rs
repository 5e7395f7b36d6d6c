use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::pagination::collect_all;
use crate::aws::types::NetworkAcl;
use crate::aws::Ec2Operations;
use anyhow::Result;
use vpc_teardown_common::ResourceKind;

pub struct NetworkAcls<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> NetworkAcls<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }
}

impl<E: Ec2Operations> VpcResource for NetworkAcls<'_, E> {
    type Item = NetworkAcl;

    const KIND: ResourceKind = ResourceKind::NetworkAcls;

    fn id(item: &NetworkAcl) -> &str {
        &item.network_acl_id
    }

    fn belongs_to(item: &NetworkAcl, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    /// The default ACL goes away with the VPC
    fn is_excluded(item: &NetworkAcl) -> bool {
        item.is_default
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<NetworkAcl>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_network_acls(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &NetworkAcl, _vpc_id: &str) -> Result<(), DeletionError> {
        self.ec2
            .delete_network_acl(&item.network_acl_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteNetworkAcl", &item.network_acl_id, e))
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
    async fn test_default_acl_is_never_deleted() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_network_acls().returning(|_, _| {
            Ok(Page::last(vec![
                NetworkAcl {
                    network_acl_id: "acl-default".to_string(),
                    vpc_id: Some("vpc-1".to_string()),
                    is_default: true,
                },
                NetworkAcl {
                    network_acl_id: "acl-custom".to_string(),
                    vpc_id: Some("vpc-1".to_string()),
                    is_default: false,
                },
            ]))
        });
        ec2.expect_delete_network_acl()
            .with(eq("acl-custom"))
            .times(1)
            .returning(|_| Ok(()));

        let cancel = CancellationToken::new();
        let errors = sweep(&NetworkAcls::new(&ec2), &sweep_ctx("vpc-1", false, &cancel))
            .await
            .unwrap();
        assert!(errors.is_empty());
    }
}
