//! VPC deletion probe
//!
//! Deleting the VPC is the only way to learn whether it is empty. The
//! outcome is mapped onto three states: gone, still has dependents, or an
//! error the run cannot recover from.

use crate::aws::{AwsError, Ec2Operations, classify_anyhow_error};
use crate::error::TeardownError;
use tracing::{info, warn};

/// Result of one deletion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The VPC no longer exists (deleted now or already absent)
    Deleted,
    /// AWS refused because dependents remain
    NotEmpty,
}

impl ProbeOutcome {
    pub fn is_deleted(self) -> bool {
        self == ProbeOutcome::Deleted
    }
}

/// Try to delete the VPC.
///
/// In dry-run mode no call is made and the VPC always reads as not empty.
pub async fn probe_vpc<E: Ec2Operations>(
    ec2: &E,
    vpc_id: &str,
    dry_run: bool,
) -> Result<ProbeOutcome, TeardownError> {
    if dry_run {
        info!(vpc_id = %vpc_id, "[dry-run] would delete VPC");
        return Ok(ProbeOutcome::NotEmpty);
    }

    let err = match ec2.delete_vpc(vpc_id).await {
        Ok(()) => {
            info!(vpc_id = %vpc_id, "Deleted VPC");
            return Ok(ProbeOutcome::Deleted);
        }
        Err(e) => e,
    };

    match classify_anyhow_error(&err) {
        Some(AwsError::NotFound { .. }) => {
            info!(vpc_id = %vpc_id, "VPC already deleted");
            Ok(ProbeOutcome::Deleted)
        }
        Some(AwsError::DependencyViolation { message, .. }) => {
            warn!(vpc_id = %vpc_id, reason = %message, "VPC still has dependencies");
            Ok(ProbeOutcome::NotEmpty)
        }
        _ => Err(err.context(format!("Failed to delete VPC {vpc_id}")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{MockEc2Operations, classify_aws_error};
    use mockall::predicate::eq;

    fn aws_err(code: &str) -> anyhow::Error {
        anyhow::Error::new(classify_aws_error(Some(code), Some("from aws"))).context("DeleteVpc")
    }

    #[tokio::test]
    async fn test_success_is_deleted() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_delete_vpc()
            .with(eq("vpc-1"))
            .times(1)
            .returning(|_| Ok(()));

        let outcome = probe_vpc(&ec2, "vpc-1", false).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_already_absent_is_deleted() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_delete_vpc()
            .returning(|_| Err(aws_err("InvalidVpcID.NotFound")));

        let outcome = probe_vpc(&ec2, "vpc-1", false).await.unwrap();
        assert!(outcome.is_deleted());
    }

    #[tokio::test]
    async fn test_dependency_violation_is_not_empty() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_delete_vpc()
            .returning(|_| Err(aws_err("DependencyViolation")));

        let outcome = probe_vpc(&ec2, "vpc-1", false).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::NotEmpty);
    }

    #[tokio::test]
    async fn test_other_errors_are_fatal() {
        for code in ["UnauthorizedOperation", "RequestLimitExceeded", "InternalError"] {
            let mut ec2 = MockEc2Operations::new();
            ec2.expect_delete_vpc().returning(move |_| Err(aws_err(code)));

            let err = probe_vpc(&ec2, "vpc-1", false).await.unwrap_err();
            assert!(matches!(err, TeardownError::Provider(_)), "code {code}");
            assert!(err.to_string().contains("vpc-1"));
        }
    }

    #[tokio::test]
    async fn test_unclassified_error_is_fatal() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_delete_vpc()
            .returning(|_| Err(anyhow::anyhow!("connection reset")));

        assert!(probe_vpc(&ec2, "vpc-1", false).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_issues_no_call() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_delete_vpc().never();

        let outcome = probe_vpc(&ec2, "vpc-1", true).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::NotEmpty);
    }
}
