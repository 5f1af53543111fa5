//! Error types for UDF hash provisioning.
//!
//! [`UdfHashError`] is the failure surfaced to the caller and mapped onto the
//! process exit status. [`RemovalFailure`] is deliberately not an error: it is
//! recorded while unwinding and never replaces the triggering failure.

use crate::config::ConfigError;
use crate::descriptor::DescriptorError;
use serde::Serialize;
use sonic_sai::api::SaiApiKind;
use sonic_sai::{RawSaiObjectId, SaiObjectType, SaiStatus};
use thiserror::Error;

/// Result type alias for provisioning operations.
pub type UdfHashResult<T> = Result<T, UdfHashError>;

/// Errors that end a provisioning run.
#[derive(Debug, Error)]
pub enum UdfHashError {
    /// `sai_api_initialize` failed; nothing was created.
    #[error("SAI API initialization failed: {status}")]
    ApiInitialization { status: SaiStatus },

    /// An API table could not be obtained; nothing was created.
    #[error("SAI API query failed for {api}: {status}")]
    ApiQuery { api: SaiApiKind, status: SaiStatus },

    /// Creating one of the provisioned objects failed.
    #[error("Failed to create {resource}: {status}")]
    ResourceCreation {
        resource: SaiObjectType,
        status: SaiStatus,
    },

    /// Setting the switch hash attribute failed.
    #[error("Failed to bind hash to switch: {status}")]
    Binding { status: SaiStatus },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration values cannot be expressed as SAI attributes.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

impl UdfHashError {
    /// The SAI status behind this error, if it came from the SAI layer.
    pub fn status(&self) -> Option<SaiStatus> {
        match self {
            UdfHashError::ApiInitialization { status }
            | UdfHashError::ApiQuery { status, .. }
            | UdfHashError::ResourceCreation { status, .. }
            | UdfHashError::Binding { status } => Some(*status),
            UdfHashError::Config(_) | UdfHashError::Descriptor(_) => None,
        }
    }
}

/// A removal that failed during unwind or teardown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    #[serde(serialize_with = "crate::report::serialize_object_type")]
    pub resource: SaiObjectType,
    #[serde(serialize_with = "crate::report::serialize_oid")]
    pub oid: RawSaiObjectId,
    #[serde(serialize_with = "crate::report::serialize_status")]
    pub status: SaiStatus,
}

impl std::fmt::Display for RemovalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "remove {} 0x{:x} failed: {}",
            self.resource, self.oid, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UdfHashError::ResourceCreation {
            resource: SaiObjectType::UdfMatch,
            status: SaiStatus::InvalidParameter,
        };
        assert_eq!(
            err.to_string(),
            "Failed to create udf_match: SAI_STATUS_INVALID_PARAMETER"
        );

        let err = UdfHashError::ApiQuery {
            api: SaiApiKind::Hash,
            status: SaiStatus::NotSupported,
        };
        assert_eq!(
            err.to_string(),
            "SAI API query failed for SAI_API_HASH: SAI_STATUS_NOT_SUPPORTED"
        );
    }

    #[test]
    fn test_status() {
        let err = UdfHashError::Binding {
            status: SaiStatus::Other(-4242),
        };
        assert_eq!(err.status(), Some(SaiStatus::Other(-4242)));

        let err = UdfHashError::Descriptor(DescriptorError::ZeroLength { field: "udf.length" });
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_removal_failure_display() {
        let failure = RemovalFailure {
            resource: SaiObjectType::UdfGroup,
            oid: 0x1f_0000_0000_0002,
            status: SaiStatus::ObjectInUse,
        };
        assert_eq!(
            failure.to_string(),
            "remove udf_group 0x1f000000000002 failed: SAI_STATUS_OBJECT_IN_USE"
        );
    }
}
