//! AWS integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_integration -- --ignored
//! ```
//!
//! Everything here runs in dry-run mode and never deletes anything.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vpc_teardown::aws::{AwsClients, AwsContext, CloudClients, collect_all};
use vpc_teardown::{Teardown, TeardownConfig};
use vpc_teardown_common::ResourceSet;

/// Region for tests: AWS_REGION, then AWS_DEFAULT_REGION, then us-east-2
fn test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-2".to_string())
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn context_uses_requested_region() {
    let region = test_region();
    let ctx = AwsContext::new(Some(&region)).await;
    assert_eq!(ctx.region(), Some(region.as_str()));
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn unknown_vpc_name_matches_nothing() {
    let ctx = AwsContext::new(Some(&test_region())).await;
    let clients = AwsClients::from_context(&ctx);
    let ec2 = clients.ec2();

    let vpcs = collect_all(|token| ec2.find_vpcs_by_name("vpc-teardown-test-no-such-vpc", token))
        .await
        .expect("DescribeVpcs should succeed");
    assert!(vpcs.is_empty());
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn dry_run_against_unknown_vpc_lists_nothing() {
    let ctx = AwsContext::new(Some(&test_region())).await;
    let teardown = Teardown::new(AwsClients::from_context(&ctx));

    let config = TeardownConfig {
        region: Some(test_region()),
        vpc_id: Some("vpc-00000000000000000".to_string()),
        cluster_name: None,
        resources: ResourceSet::all(),
        autoscaling_filter: None,
        tries: 1,
        retry_interval: Duration::from_secs(1),
        dry_run: true,
    };

    teardown
        .run(&config, &CancellationToken::new())
        .await
        .expect("dry run should succeed");
}
