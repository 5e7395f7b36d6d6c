//! vpc-teardown - delete an AWS VPC and everything that keeps it alive
//!
//! AWS refuses to delete a VPC while anything still lives in it, and offers
//! no dependency graph to work from. This crate sweeps the VPC type by type
//! (load balancers, instances, gateways, interfaces, security groups,
//! subnets and the rest), re-attempts the VPC deletion after each sweep, and
//! retries on a fixed interval until AWS accepts it. An EKS cluster and its
//! node groups can be removed along with the VPC.

pub mod aws;
pub mod config;
pub mod error;
pub mod resources;
pub mod teardown;
pub mod wait;

#[cfg(test)]
mod testing;

pub use config::{Args, TeardownConfig};
pub use error::TeardownError;
pub use teardown::Teardown;
