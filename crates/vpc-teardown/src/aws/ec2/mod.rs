//! EC2 client for VPC teardown
//!
//! The SDK calls live in inherent methods grouped by resource family; the
//! [`Ec2Operations`] trait exposes them to the teardown logic so it can be
//! tested against mocks.

mod endpoint;
mod instance;
mod network;
mod operations;
mod security_group;

pub use operations::Ec2Operations;

#[cfg(test)]
pub use operations::MockEc2Operations;

use crate::aws::context::AwsContext;
use aws_sdk_ec2::{
    Client,
    types::{Filter, Tag},
};

/// EC2 client for listing and deleting VPC resources
pub struct Ec2Client {
    client: Client,
}

impl Ec2Client {
    /// Create an EC2 client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}

/// `vpc-id` filter scoping a listing to one VPC
fn vpc_filter(vpc_id: &str) -> Filter {
    named_filter("vpc-id", vpc_id)
}

fn named_filter(name: &str, value: &str) -> Filter {
    Filter::builder().name(name).values(value).build()
}

/// Value of the tag with `key`, if present
fn tag_value(tags: &[Tag], key: &str) -> Option<String> {
    tags.iter()
        .find(|t| t.key() == Some(key))
        .and_then(|t| t.value())
        .map(str::to_string)
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
