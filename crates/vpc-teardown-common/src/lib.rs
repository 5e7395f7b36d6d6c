//! vpc-teardown-common - Shared types for vpc-teardown
//!
//! This crate holds the resource-type vocabulary and default values used by
//! the teardown engine and its CLI, without any AWS SDK dependencies.
//!
//! ## Modules
//!
//! - [`defaults`]: Default flag values
//! - [`resource_kind`]: Recognized resource types and their sweep order
//! - [`resource_set`]: Include/exclude resolution of the active type set
//! - [`tags`]: Tag keys used to discover VPCs and autoscaling groups

pub mod defaults;
pub mod resource_kind;
pub mod resource_set;
pub mod tags;

pub use resource_kind::{ResourceKind, ResourceKindParseError};
pub use resource_set::ResourceSet;
