//! Default configuration values shared by the CLI and the teardown engine

use std::time::Duration;

/// Default number of sweep-and-probe attempts
pub const DEFAULT_TRIES: u32 = 3;

/// Default pause between attempts (1 minute)
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Default pause between attempts, in the form accepted by `--retry-interval`
pub const DEFAULT_RETRY_INTERVAL_STR: &str = "1m";

/// Default value matched against the autoscaling ownership tag
pub const DEFAULT_AUTOSCALING_TAG_VALUE: &str = "owned";
