//! Command-line arguments and the teardown configuration built from them
//!
//! The configuration is assembled and validated once, before any AWS call,
//! and is not modified afterwards.

use crate::aws::types::AutoScalingFilter;
use clap::Parser;
use std::time::Duration;
use thiserror::Error;
use vpc_teardown_common::defaults::{
    DEFAULT_AUTOSCALING_TAG_VALUE, DEFAULT_RETRY_INTERVAL_STR, DEFAULT_TRIES,
};
use vpc_teardown_common::tags::cluster_ownership_tag;
use vpc_teardown_common::{ResourceKind, ResourceSet};

#[derive(Parser, Debug, Clone)]
#[command(name = "vpc-teardown")]
#[command(about = "Delete an AWS VPC, everything blocking its deletion, and an optional EKS cluster")]
#[command(version)]
pub struct Args {
    /// VPC to delete (resolved from --cluster-name when omitted)
    #[arg(long)]
    pub vpc_id: Option<String>,

    /// EKS cluster to delete along with its node groups
    #[arg(long)]
    pub cluster_name: Option<String>,

    /// AWS region (default: resolved from the environment and profile)
    #[arg(long)]
    pub region: Option<String>,

    /// Resource types to delete, repeatable or comma-separated (default: all)
    #[arg(long, value_name = "TYPE", value_delimiter = ',')]
    pub include: Vec<ResourceKind>,

    /// Resource types to leave alone, repeatable or comma-separated
    #[arg(long, value_name = "TYPE", value_delimiter = ',')]
    pub exclude: Vec<ResourceKind>,

    /// Tag key identifying Auto Scaling groups to delete
    /// (default: k8s.io/cluster/<cluster-name> when the value is "owned")
    #[arg(long)]
    pub autoscaling_tag_key: Option<String>,

    /// Tag value identifying Auto Scaling groups to delete
    #[arg(long, default_value = DEFAULT_AUTOSCALING_TAG_VALUE)]
    pub autoscaling_tag_value: String,

    /// Number of sweep-and-delete attempts
    #[arg(long, default_value_t = DEFAULT_TRIES, value_parser = clap::value_parser!(u32).range(1..))]
    pub tries: u32,

    /// Pause between attempts (e.g. 30s, 1m, 1m30s)
    #[arg(long, default_value = DEFAULT_RETRY_INTERVAL_STR, value_parser = parse_duration)]
    pub retry_interval: Duration,

    /// Only list and log what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated, immutable teardown settings
#[derive(Debug, Clone)]
pub struct TeardownConfig {
    pub region: Option<String>,
    pub vpc_id: Option<String>,
    pub cluster_name: Option<String>,
    pub resources: ResourceSet,
    pub autoscaling_filter: Option<AutoScalingFilter>,
    pub tries: u32,
    pub retry_interval: Duration,
    pub dry_run: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--tries must be at least 1")]
    ZeroTries,
}

impl TryFrom<Args> for TeardownConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.tries == 0 {
            return Err(ConfigError::ZeroTries);
        }

        let resources = ResourceSet::resolve(&args.include, &args.exclude);
        let vpc_id = non_empty(args.vpc_id);
        let cluster_name = non_empty(args.cluster_name);
        let autoscaling_filter = resolve_autoscaling_filter(
            args.autoscaling_tag_key.as_deref(),
            &args.autoscaling_tag_value,
            cluster_name.as_deref(),
        );

        Ok(Self {
            region: non_empty(args.region),
            vpc_id,
            cluster_name,
            resources,
            autoscaling_filter,
            tries: args.tries,
            retry_interval: args.retry_interval,
            dry_run: args.dry_run,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Work out the Auto Scaling tag filter.
///
/// With no key, the default "owned" value and a known cluster, the key
/// defaults to the cluster ownership tag. A filter exists only when both key
/// and value are non-empty.
pub fn resolve_autoscaling_filter(
    tag_key: Option<&str>,
    tag_value: &str,
    cluster_name: Option<&str>,
) -> Option<AutoScalingFilter> {
    let tag_key = match tag_key.filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None if tag_value == DEFAULT_AUTOSCALING_TAG_VALUE => {
            cluster_ownership_tag(cluster_name.filter(|c| !c.is_empty())?)
        }
        None => return None,
    };

    if tag_value.is_empty() {
        return None;
    }

    Some(AutoScalingFilter {
        tag_key,
        tag_value: tag_value.to_string(),
    })
}

/// Parse a duration such as `1m`, `30s`, `1m30s`, `1.5h` or `500ms`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
/// Fractions are exact down to the nanosecond; finer digits are truncated.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let invalid = |why: &str| format!("invalid duration {input:?}: {why}");

    let mut total_nanos: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (whole, fraction) = match rest[..number_len].split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (&rest[..number_len], ""),
        };
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(invalid("expected a number"));
        }
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit: u128 = match &rest[..unit_len] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "" => return Err(invalid("missing unit")),
            unit => return Err(invalid(&format!("unknown unit {unit:?}"))),
        };
        rest = &rest[unit_len..];

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("out of range"))?
        };
        // digits past the 18th are below a nanosecond for every unit
        let fraction = &fraction[..fraction.len().min(18)];
        let fraction_nanos = if fraction.is_empty() {
            0
        } else {
            let numerator: u128 = fraction.parse().map_err(|_| invalid("bad number"))?;
            numerator * nanos_per_unit / 10u128.pow(fraction.len() as u32)
        };

        total_nanos = whole
            .checked_mul(nanos_per_unit)
            .and_then(|n| n.checked_add(fraction_nanos))
            .and_then(|n| n.checked_add(total_nanos))
            .ok_or_else(|| invalid("out of range"))?;
    }

    let nanos = u64::try_from(total_nanos).map_err(|_| invalid("out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpc_teardown_common::defaults::DEFAULT_RETRY_INTERVAL;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("vpc-teardown").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = TeardownConfig::try_from(parse(&["--vpc-id", "vpc-1"])).unwrap();
        assert_eq!(config.vpc_id.as_deref(), Some("vpc-1"));
        assert_eq!(config.tries, 3);
        assert_eq!(config.retry_interval, DEFAULT_RETRY_INTERVAL);
        assert_eq!(config.resources, ResourceSet::all());
        assert!(!config.dry_run);
        assert!(config.autoscaling_filter.is_none());
        assert!(config.region.is_none());
    }

    #[test]
    fn test_include_accepts_commas_and_repeats() {
        let args = parse(&[
            "--include",
            "Subnets,SecurityGroups",
            "--include",
            "NetworkAcls",
            "--exclude",
            "SecurityGroups",
        ]);
        let config = TeardownConfig::try_from(args).unwrap();
        let expected: ResourceSet = [ResourceKind::Subnets, ResourceKind::NetworkAcls]
            .into_iter()
            .collect();
        assert_eq!(config.resources, expected);
    }

    #[test]
    fn test_unknown_resource_type_rejected() {
        let result = Args::try_parse_from(["vpc-teardown", "--include", "Buckets"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Buckets"));
    }

    #[test]
    fn test_zero_tries_rejected() {
        assert!(Args::try_parse_from(["vpc-teardown", "--tries", "0"]).is_err());

        let mut args = parse(&[]);
        args.tries = 0;
        assert_eq!(
            TeardownConfig::try_from(args).unwrap_err(),
            ConfigError::ZeroTries
        );
    }

    #[test]
    fn test_excluding_everything_leaves_only_the_probe() {
        let args = parse(&["--include", "Subnets", "--exclude", "Subnets"]);
        let config = TeardownConfig::try_from(args).unwrap();
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_retry_interval_flag() {
        let config = TeardownConfig::try_from(parse(&["--retry-interval", "1m30s"])).unwrap();
        assert_eq!(config.retry_interval, Duration::from_secs(90));
    }

    #[test]
    fn test_autoscaling_filter_defaults_to_cluster_tag() {
        let config = TeardownConfig::try_from(parse(&["--cluster-name", "demo"])).unwrap();
        let filter = config.autoscaling_filter.unwrap();
        assert_eq!(filter.tag_key, "k8s.io/cluster/demo");
        assert_eq!(filter.tag_value, "owned");
    }

    #[test]
    fn test_autoscaling_filter_resolution() {
        // explicit key wins
        let filter = resolve_autoscaling_filter(Some("team"), "infra", Some("demo")).unwrap();
        assert_eq!(filter.tag_key, "team");
        assert_eq!(filter.tag_value, "infra");

        // no key, non-default value: nothing to default from
        assert!(resolve_autoscaling_filter(None, "shared", Some("demo")).is_none());

        // no key, no cluster
        assert!(resolve_autoscaling_filter(None, "owned", None).is_none());

        // empty value disables the filter
        assert!(resolve_autoscaling_filter(Some("team"), "", Some("demo")).is_none());

        // empty key is treated as absent
        let filter = resolve_autoscaling_filter(Some(""), "owned", Some("demo")).unwrap();
        assert_eq!(filter.tag_key, "k8s.io/cluster/demo");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_parse_duration_fractions_are_exact() {
        assert_eq!(parse_duration("0.1s"), Ok(Duration::from_millis(100)));
        assert_eq!(parse_duration(".5m"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("1.000000001s"), Ok(Duration::new(1, 1)));
        assert_eq!(parse_duration("2.5ms"), Ok(Duration::from_micros(2500)));
        assert_eq!(parse_duration("1h0.5m"), Ok(Duration::from_secs(3630)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("60").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration(".s").is_err());
        assert!(parse_duration("1.2.3s").is_err());
        assert!(parse_duration("99999999999999999999h").is_err());
    }
}
