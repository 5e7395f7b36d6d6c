//! Tag conventions used for discovery
//!
//! | Tag Key | Used for |
//! |---------|----------|
//! | `Name` | Finding the VPC of a cluster by the cluster's name |
//! | `k8s.io/cluster/<name>` | Finding autoscaling groups owned by a cluster |

/// Tag key holding a resource's display name
pub const TAG_NAME: &str = "Name";

/// Prefix of the ownership tag applied by cluster provisioning tools
pub const CLUSTER_OWNERSHIP_TAG_PREFIX: &str = "k8s.io/cluster/";

/// Ownership tag key for a cluster (`k8s.io/cluster/<cluster_name>`)
pub fn cluster_ownership_tag(cluster_name: &str) -> String {
    format!("{CLUSTER_OWNERSHIP_TAG_PREFIX}{cluster_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_ownership_tag() {
        assert_eq!(cluster_ownership_tag("prod"), "k8s.io/cluster/prod");
    }
}
