//! Security group and security group rule calls

use super::{Ec2Client, named_filter, owned, vpc_filter};
use crate::aws::error::sdk_error;
use crate::aws::pagination::Page;
use crate::aws::types::{SecurityGroup, SecurityGroupRule};
use anyhow::Result;
use tracing::debug;

impl Ec2Client {
    pub async fn describe_security_groups(
        &self,
        vpc_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroup>> {
        let output = self
            .client
            .describe_security_groups()
            .filters(vpc_filter(vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeSecurityGroups", e))?;

        let items = output
            .security_groups()
            .iter()
            .filter_map(|sg| {
                Some(SecurityGroup {
                    group_id: sg.group_id()?.to_string(),
                    group_name: owned(sg.group_name()),
                    vpc_id: owned(sg.vpc_id()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    /// List the ingress and egress rules of one security group
    pub async fn describe_security_group_rules(
        &self,
        group_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<SecurityGroupRule>> {
        let output = self
            .client
            .describe_security_group_rules()
            .filters(named_filter("group-id", group_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeSecurityGroupRules", e))?;

        let items = output
            .security_group_rules()
            .iter()
            .filter_map(|rule| {
                Some(SecurityGroupRule {
                    rule_id: rule.security_group_rule_id()?.to_string(),
                    group_id: rule.group_id().unwrap_or(group_id).to_string(),
                    is_egress: rule.is_egress().unwrap_or(false),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: owned(output.next_token()),
        })
    }

    /// Revoke rules by id, all of one direction
    pub async fn revoke_security_group_rules(
        &self,
        group_id: &str,
        egress: bool,
        rule_ids: Vec<String>,
    ) -> Result<()> {
        if rule_ids.is_empty() {
            return Ok(());
        }

        debug!(
            security_group_id = %group_id,
            egress,
            count = rule_ids.len(),
            "Revoking security group rules"
        );

        if egress {
            self.client
                .revoke_security_group_egress()
                .group_id(group_id)
                .set_security_group_rule_ids(Some(rule_ids))
                .send()
                .await
                .map_err(|e| sdk_error("RevokeSecurityGroupEgress", e))?;
        } else {
            self.client
                .revoke_security_group_ingress()
                .group_id(group_id)
                .set_security_group_rule_ids(Some(rule_ids))
                .send()
                .await
                .map_err(|e| sdk_error("RevokeSecurityGroupIngress", e))?;
        }
        Ok(())
    }

    pub async fn delete_security_group(&self, group_id: &str) -> Result<()> {
        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteSecurityGroup", e))?;
        Ok(())
    }
}
