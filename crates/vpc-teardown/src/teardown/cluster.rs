//! EKS cluster teardown
//!
//! Node groups are deleted one after another, then the cluster. The first
//! failing call ends the attempt; AWS keeps rejecting the cluster delete
//! while node groups are still draining, and the orchestrator retries on its
//! next try.

use crate::aws::EksOperations;
use crate::aws::pagination::collect_all;
use crate::aws::types::Cluster;
use anyhow::{Context, Result};
use tracing::info;

pub async fn teardown_cluster<K: EksOperations>(
    eks: &K,
    cluster: &Cluster,
    dry_run: bool,
) -> Result<()> {
    let name = cluster.name.as_str();
    let nodegroups = collect_all(move |token| eks.list_nodegroups(name, token))
        .await
        .with_context(|| format!("Failed to list node groups of cluster {name}"))?;

    info!(cluster = %name, nodegroups = ?nodegroups, "Found node groups");

    if dry_run {
        for nodegroup in &nodegroups {
            info!(cluster = %name, nodegroup = %nodegroup, "[dry-run] would delete node group");
        }
        info!(cluster = %name, "[dry-run] would delete cluster");
        return Ok(());
    }

    for nodegroup in &nodegroups {
        eks.delete_nodegroup(name, nodegroup)
            .await
            .with_context(|| format!("Failed to delete node group {nodegroup} of cluster {name}"))?;
        info!(cluster = %name, nodegroup = %nodegroup, "Deleted node group");
    }

    eks.delete_cluster(name)
        .await
        .with_context(|| format!("Failed to delete cluster {name}"))?;
    info!(cluster = %name, "Deleted cluster");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::eks::MockEksOperations;
    use crate::aws::pagination::Page;
    use mockall::predicate::{always, eq};
    use mockall::Sequence;

    fn cluster() -> Cluster {
        Cluster {
            name: "demo".to_string(),
            vpc_id: Some("vpc-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_nodegroups_deleted_before_cluster() {
        let mut eks = MockEksOperations::new();
        let mut seq = Sequence::new();
        eks.expect_list_nodegroups()
            .with(eq("demo"), eq(None::<String>))
            .returning(|_, _| Ok(Page::more(vec!["ng-1".to_string()], "t1")));
        eks.expect_list_nodegroups()
            .with(eq("demo"), eq(Some("t1".to_string())))
            .returning(|_, _| Ok(Page::last(vec!["ng-2".to_string()])));
        eks.expect_delete_nodegroup()
            .with(eq("demo"), eq("ng-1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        eks.expect_delete_nodegroup()
            .with(eq("demo"), eq("ng-2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        eks.expect_delete_cluster()
            .with(eq("demo"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        teardown_cluster(&eks, &cluster(), false).await.unwrap();
    }

    #[tokio::test]
    async fn test_first_nodegroup_failure_aborts() {
        let mut eks = MockEksOperations::new();
        eks.expect_list_nodegroups().returning(|_, _| {
            Ok(Page::last(vec!["ng-1".to_string(), "ng-2".to_string()]))
        });
        eks.expect_delete_nodegroup()
            .with(always(), eq("ng-1"))
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("ResourceInUseException")));
        eks.expect_delete_nodegroup()
            .with(always(), eq("ng-2"))
            .never();
        eks.expect_delete_cluster().never();

        let err = teardown_cluster(&eks, &cluster(), false).await.unwrap_err();
        assert!(err.to_string().contains("ng-1"));
    }

    #[tokio::test]
    async fn test_cluster_delete_failure_is_surfaced() {
        let mut eks = MockEksOperations::new();
        eks.expect_list_nodegroups()
            .returning(|_, _| Ok(Page::last(vec![])));
        eks.expect_delete_cluster()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("node groups still draining")));

        let err = teardown_cluster(&eks, &cluster(), false).await.unwrap_err();
        assert!(err.to_string().contains("Failed to delete cluster demo"));
    }

    #[tokio::test]
    async fn test_dry_run_only_lists() {
        let mut eks = MockEksOperations::new();
        eks.expect_list_nodegroups()
            .times(1)
            .returning(|_, _| Ok(Page::last(vec!["ng-1".to_string()])));
        eks.expect_delete_nodegroup().never();
        eks.expect_delete_cluster().never();

        teardown_cluster(&eks, &cluster(), true).await.unwrap();
    }
}
