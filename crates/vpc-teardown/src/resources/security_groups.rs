//! Security groups, with their rules revoked first
//!
//! AWS refuses to delete a group while rules in it still reference other
//! groups, so each group's ingress and egress rules are revoked before the
//! delete. When that fails the group is left alone for this pass.

use super::{DeletionError, SweepContext, VpcResource};
use crate::aws::error::ignore_not_found;
use crate::aws::pagination::collect_all;
use crate::aws::types::{SecurityGroup, SecurityGroupRule};
use crate::aws::Ec2Operations;
use anyhow::Result;
use tracing::debug;
use vpc_teardown_common::ResourceKind;

pub struct SecurityGroups<'a, E> {
    ec2: &'a E,
}

impl<'a, E: Ec2Operations> SecurityGroups<'a, E> {
    pub fn new(ec2: &'a E) -> Self {
        Self { ec2 }
    }

    async fn revoke_rules(&self, group: &SecurityGroup) -> Result<(), DeletionError> {
        let (ec2, group_id) = (self.ec2, group.group_id.as_str());
        let rules = collect_all(move |token| ec2.describe_security_group_rules(group_id, token))
            .await
            .map_err(|e| {
                DeletionError::new(Self::KIND, "DescribeSecurityGroupRules", group_id, e)
            })?;

        let (egress, ingress): (Vec<SecurityGroupRule>, Vec<SecurityGroupRule>) =
            rules.into_iter().partition(|r| r.is_egress);

        for (is_egress, rules) in [(false, ingress), (true, egress)] {
            if rules.is_empty() {
                continue;
            }
            let operation = if is_egress {
                "RevokeSecurityGroupEgress"
            } else {
                "RevokeSecurityGroupIngress"
            };
            let rule_ids: Vec<String> = rules.into_iter().map(|r| r.rule_id).collect();
            debug!(security_group_id = %group_id, rule_ids = ?rule_ids, operation, "Revoking rules");

            // A rule that vanished in the meantime needs no revoking
            ignore_not_found(
                self.ec2
                    .revoke_security_group_rules(group_id, is_egress, rule_ids)
                    .await,
            )
            .map_err(|e| DeletionError::new(Self::KIND, operation, group_id, e))?;
        }
        Ok(())
    }
}

impl<E: Ec2Operations> VpcResource for SecurityGroups<'_, E> {
    type Item = SecurityGroup;

    const KIND: ResourceKind = ResourceKind::SecurityGroups;

    fn id(item: &SecurityGroup) -> &str {
        &item.group_id
    }

    fn belongs_to(item: &SecurityGroup, vpc_id: &str) -> bool {
        item.vpc_id.as_deref() == Some(vpc_id)
    }

    fn is_excluded(item: &SecurityGroup) -> bool {
        item.is_default()
    }

    async fn list(&self, ctx: &SweepContext<'_>) -> Result<Vec<SecurityGroup>> {
        let (ec2, vpc_id) = (self.ec2, ctx.vpc_id);
        collect_all(move |token| ec2.describe_security_groups(vpc_id, token)).await
    }

    async fn delete_item(&self, item: &SecurityGroup, _vpc_id: &str) -> Result<(), DeletionError> {
        self.revoke_rules(item).await?;
        self.ec2
            .delete_security_group(&item.group_id)
            .await
            .map_err(|e| DeletionError::new(Self::KIND, "DeleteSecurityGroup", &item.group_id, e))
    }
}
