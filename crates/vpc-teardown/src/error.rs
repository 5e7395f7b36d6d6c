//! Run-level errors

use thiserror::Error;

/// Outcomes that end a teardown run without success
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("VPC id is not set: pass --vpc-id or a --cluster-name that resolves to a VPC")]
    VpcIdNotSet,

    #[error(
        "found {} VPCs tagged Name={name}, refusing to guess: {}",
        .vpc_ids.len(),
        .vpc_ids.join(", ")
    )]
    AmbiguousVpc { name: String, vpc_ids: Vec<String> },

    #[error("cancelled")]
    Cancelled,

    /// Every try ran without the VPC going away
    #[error("failed")]
    Exhausted { tries: u32 },

    /// Listing, resolution or probe failure from AWS
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}
