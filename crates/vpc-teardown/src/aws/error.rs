//! AWS error classification
//!
//! Every SDK error is mapped onto the closed [`AwsError`] enumeration at the
//! client boundary using the error code from `ProvideErrorMetadata`, so the
//! teardown logic never matches on SDK error structures.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// AWS error categories the teardown logic reacts to
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (already deleted)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Resource still has dependents (retryable on a later pass)
    #[error("Resource has dependent objects: {message}")]
    DependencyViolation { code: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// Caller lacks permission for the operation
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Any other AWS SDK error
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if this is a dependency violation
    pub fn is_dependency_violation(&self) -> bool {
        matches!(self, AwsError::DependencyViolation { .. })
    }

    /// The AWS error code, when one was reported
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. } | AwsError::DependencyViolation { code, .. } => {
                Some(code)
            }
            AwsError::Sdk { code, .. } => code.as_deref(),
            AwsError::Throttled { .. } | AwsError::AccessDenied { .. } => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidGroup.NotFound",
    "InvalidNetworkAclID.NotFound",
    "InvalidVpcEndpointId.NotFound",
    "InvalidVpcPeeringConnectionID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "NatGatewayNotFound",
    "InvalidAllocationID.NotFound",
    "InvalidAssociationID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidNetworkInterfaceID.NotFound",
    "InvalidVpnGatewayID.NotFound",
    "InvalidInstanceID.NotFound",
    "InvalidSecurityGroupRuleId.NotFound",
    "ResourceNotFoundException",
    "LoadBalancerNotFound",
];

/// Known AWS error codes for dependency violations (resource still in use)
const DEPENDENCY_CODES: &[&str] = &[
    "DependencyViolation",
    "ResourceInUse",
    "ResourceInUseException",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "UnauthorizedOperation",
    "AccessDenied",
    "AccessDeniedException",
];

/// Classify an AWS error from its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if DEPENDENCY_CODES.contains(&c) => AwsError::DependencyViolation {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK operation error.
///
/// Errors without service metadata (timeouts, dispatch failures) become
/// [`AwsError::Sdk`] carrying the full error context as the message.
pub fn classify_sdk_error<E, R>(error: &SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match error.code() {
        Some(code) => classify_aws_error(Some(code), error.message()),
        None => AwsError::Sdk {
            code: None,
            message: DisplayErrorContext(error).to_string(),
        },
    }
}

/// Convert an SDK error into an `anyhow::Error` carrying its classification.
pub fn sdk_error<E, R>(operation: &'static str, error: SdkError<E, R>) -> anyhow::Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    anyhow::Error::new(classify_sdk_error(&error)).context(operation)
}

/// Find the [`AwsError`] classification inside an `anyhow::Error` chain.
pub fn classify_anyhow_error(error: &anyhow::Error) -> Option<&AwsError> {
    error.chain().find_map(|cause| cause.downcast_ref::<AwsError>())
}

/// Check whether an error chain carries a "not found" classification
pub fn is_not_found(error: &anyhow::Error) -> bool {
    classify_anyhow_error(error).is_some_and(AwsError::is_not_found)
}

/// Convert a "not found" error into `Ok(None)`, for idempotent deletes.
pub fn ignore_not_found<T>(result: anyhow::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(e),
    }
}
