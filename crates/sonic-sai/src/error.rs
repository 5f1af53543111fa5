//! SAI error types and status handling.
//!
//! This module provides safe error handling for SAI operations, converting
//! raw SAI status codes into Rust's Result type.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Base of the `SAI_STATUS_INVALID_ATTRIBUTE_n` range (attribute index 0).
const INVALID_ATTRIBUTE_0: i32 = -0x0001_0000;

/// SAI status codes matching the SAI C API.
///
/// These values correspond to `sai_status_t` in the SAI header files. Codes
/// this crate does not know are preserved verbatim in [`SaiStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiStatus {
    Success,
    Failure,
    NotSupported,
    NoMemory,
    InsufficientResources,
    InvalidParameter,
    ItemAlreadyExists,
    ItemNotFound,
    BufferOverflow,
    InvalidPortNumber,
    InvalidPortMember,
    InvalidVlanId,
    Uninitialized,
    TableFull,
    MandatoryAttributeMissing,
    NotImplemented,
    AddrNotFound,
    ObjectInUse,
    InvalidObjectType,
    InvalidObjectId,
    InvalidNvStorage,
    NvStorageFull,
    SwUpgradeVersionMismatch,
    NotExecuted,
    /// `SAI_STATUS_INVALID_ATTRIBUTE_0`: an attribute the object type does not define.
    InvalidAttribute,
    Other(i32),
}

impl SaiStatus {
    /// Creates a SaiStatus from a raw i32 value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => SaiStatus::Success,
            -1 => SaiStatus::Failure,
            -2 => SaiStatus::NotSupported,
            -3 => SaiStatus::NoMemory,
            -4 => SaiStatus::InsufficientResources,
            -5 => SaiStatus::InvalidParameter,
            -6 => SaiStatus::ItemAlreadyExists,
            -7 => SaiStatus::ItemNotFound,
            -8 => SaiStatus::BufferOverflow,
            -9 => SaiStatus::InvalidPortNumber,
            -10 => SaiStatus::InvalidPortMember,
            -11 => SaiStatus::InvalidVlanId,
            -12 => SaiStatus::Uninitialized,
            -13 => SaiStatus::TableFull,
            -14 => SaiStatus::MandatoryAttributeMissing,
            -15 => SaiStatus::NotImplemented,
            -16 => SaiStatus::AddrNotFound,
            -17 => SaiStatus::ObjectInUse,
            -18 => SaiStatus::InvalidObjectType,
            -19 => SaiStatus::InvalidObjectId,
            -20 => SaiStatus::InvalidNvStorage,
            -21 => SaiStatus::NvStorageFull,
            -22 => SaiStatus::SwUpgradeVersionMismatch,
            -23 => SaiStatus::NotExecuted,
            INVALID_ATTRIBUTE_0 => SaiStatus::InvalidAttribute,
            other => SaiStatus::Other(other),
        }
    }

    /// Returns the raw `sai_status_t` value.
    pub fn as_raw(&self) -> i32 {
        match self {
            SaiStatus::Success => 0,
            SaiStatus::Failure => -1,
            SaiStatus::NotSupported => -2,
            SaiStatus::NoMemory => -3,
            SaiStatus::InsufficientResources => -4,
            SaiStatus::InvalidParameter => -5,
            SaiStatus::ItemAlreadyExists => -6,
            SaiStatus::ItemNotFound => -7,
            SaiStatus::BufferOverflow => -8,
            SaiStatus::InvalidPortNumber => -9,
            SaiStatus::InvalidPortMember => -10,
            SaiStatus::InvalidVlanId => -11,
            SaiStatus::Uninitialized => -12,
            SaiStatus::TableFull => -13,
            SaiStatus::MandatoryAttributeMissing => -14,
            SaiStatus::NotImplemented => -15,
            SaiStatus::AddrNotFound => -16,
            SaiStatus::ObjectInUse => -17,
            SaiStatus::InvalidObjectType => -18,
            SaiStatus::InvalidObjectId => -19,
            SaiStatus::InvalidNvStorage => -20,
            SaiStatus::NvStorageFull => -21,
            SaiStatus::SwUpgradeVersionMismatch => -22,
            SaiStatus::NotExecuted => -23,
            SaiStatus::InvalidAttribute => INVALID_ATTRIBUTE_0,
            SaiStatus::Other(raw) => *raw,
        }
    }

    /// Returns the short label for this status (`INVALID_PARAMETER`, ...).
    ///
    /// Unrecognized codes render as their decimal value.
    pub fn label(&self) -> Cow<'static, str> {
        let s = match self {
            SaiStatus::Success => "SUCCESS",
            SaiStatus::Failure => "FAILURE",
            SaiStatus::NotSupported => "NOT_SUPPORTED",
            SaiStatus::NoMemory => "NO_MEMORY",
            SaiStatus::InsufficientResources => "INSUFFICIENT_RESOURCES",
            SaiStatus::InvalidParameter => "INVALID_PARAMETER",
            SaiStatus::ItemAlreadyExists => "ITEM_ALREADY_EXISTS",
            SaiStatus::ItemNotFound => "ITEM_NOT_FOUND",
            SaiStatus::BufferOverflow => "BUFFER_OVERFLOW",
            SaiStatus::InvalidPortNumber => "INVALID_PORT_NUMBER",
            SaiStatus::InvalidPortMember => "INVALID_PORT_MEMBER",
            SaiStatus::InvalidVlanId => "INVALID_VLAN_ID",
            SaiStatus::Uninitialized => "UNINITIALIZED",
            SaiStatus::TableFull => "TABLE_FULL",
            SaiStatus::MandatoryAttributeMissing => "MANDATORY_ATTRIBUTE_MISSING",
            SaiStatus::NotImplemented => "NOT_IMPLEMENTED",
            SaiStatus::AddrNotFound => "ADDR_NOT_FOUND",
            SaiStatus::ObjectInUse => "OBJECT_IN_USE",
            SaiStatus::InvalidObjectType => "INVALID_OBJECT_TYPE",
            SaiStatus::InvalidObjectId => "INVALID_OBJECT_ID",
            SaiStatus::InvalidNvStorage => "INVALID_NV_STORAGE",
            SaiStatus::NvStorageFull => "NV_STORAGE_FULL",
            SaiStatus::SwUpgradeVersionMismatch => "SW_UPGRADE_VERSION_MISMATCH",
            SaiStatus::NotExecuted => "NOT_EXECUTED",
            SaiStatus::InvalidAttribute => "INVALID_ATTRIBUTE",
            SaiStatus::Other(raw) => return Cow::Owned(raw.to_string()),
        };
        Cow::Borrowed(s)
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == SaiStatus::Success
    }

    /// Returns true if the status indicates an error.
    pub fn is_error(&self) -> bool {
        *self != SaiStatus::Success
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> SaiResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SaiError::from_status(self))
        }
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaiStatus::Other(raw) => write!(f, "SAI_STATUS({})", raw),
            known => write!(f, "SAI_STATUS_{}", known.label()),
        }
    }
}

/// Error type for SAI operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaiError {
    /// SAI API returned an error status.
    #[error("SAI operation failed: {status}")]
    Status { status: SaiStatus },

    /// The requested feature is not supported by the SAI implementation.
    #[error("Feature not supported: {feature}")]
    NotSupported { feature: String },

    /// Invalid parameter passed to SAI API.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// SAI context is not initialized.
    #[error("SAI not initialized")]
    Uninitialized,

    /// Internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SaiError {
    /// Creates an error from a SAI status code.
    pub fn from_status(status: SaiStatus) -> Self {
        match status {
            SaiStatus::Success => SaiError::Internal {
                message: "from_status called with success status".to_string(),
            },
            status => SaiError::Status { status },
        }
    }

    /// Creates a not supported error with a feature description.
    pub fn not_supported(feature: impl Into<String>) -> Self {
        SaiError::NotSupported {
            feature: feature.into(),
        }
    }

    /// Creates an invalid parameter error with a message.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        SaiError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SaiError::Internal {
            message: message.into(),
        }
    }

    /// Returns the SAI status this error would surface as.
    ///
    /// Locally detected errors map onto the closest status code so callers
    /// can always report a numeric status.
    pub fn status(&self) -> SaiStatus {
        match self {
            SaiError::Status { status } => *status,
            SaiError::NotSupported { .. } => SaiStatus::NotSupported,
            SaiError::InvalidParameter { .. } => SaiStatus::InvalidParameter,
            SaiError::Uninitialized => SaiStatus::Uninitialized,
            SaiError::Internal { .. } => SaiStatus::Failure,
        }
    }
}

impl From<SaiStatus> for SaiError {
    fn from(status: SaiStatus) -> Self {
        SaiError::from_status(status)
    }
}

/// Result type for SAI operations.
pub type SaiResult<T> = Result<T, SaiError>;

/// Extension trait for converting raw SAI status codes.
pub trait SaiStatusExt {
    /// Converts a raw status code to a Result.
    fn to_result(self) -> SaiResult<()>;
}

impl SaiStatusExt for i32 {
    fn to_result(self) -> SaiResult<()> {
        SaiStatus::from_raw(self).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success() {
        assert!(SaiStatus::Success.is_success());
        assert!(!SaiStatus::Success.is_error());
        assert!(SaiStatus::Success.into_result().is_ok());
    }

    #[test]
    fn test_status_failure() {
        assert!(!SaiStatus::Failure.is_success());
        assert!(SaiStatus::Failure.is_error());
        assert!(SaiStatus::Failure.into_result().is_err());
    }

    #[test]
    fn test_status_from_raw_round_trips_unknown_codes() {
        assert_eq!(SaiStatus::from_raw(0), SaiStatus::Success);
        assert_eq!(SaiStatus::from_raw(-7), SaiStatus::ItemNotFound);
        assert_eq!(SaiStatus::from_raw(-999), SaiStatus::Other(-999));
        assert_eq!(SaiStatus::from_raw(-999).as_raw(), -999);
        assert_eq!(SaiStatus::ObjectInUse.as_raw(), -17);
        assert_eq!(SaiStatus::from_raw(-0x10000), SaiStatus::InvalidAttribute);
        assert_eq!(SaiStatus::InvalidAttribute.as_raw(), -0x10000);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SaiStatus::Success.label(), "SUCCESS");
        assert_eq!(SaiStatus::InvalidParameter.label(), "INVALID_PARAMETER");
        assert_eq!(SaiStatus::NotSupported.label(), "NOT_SUPPORTED");
        assert_eq!(SaiStatus::InvalidAttribute.label(), "INVALID_ATTRIBUTE");
        assert_eq!(SaiStatus::Other(-4242).label(), "-4242");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            SaiStatus::InvalidParameter.to_string(),
            "SAI_STATUS_INVALID_PARAMETER"
        );
        assert_eq!(SaiStatus::Other(-77).to_string(), "SAI_STATUS(-77)");
    }

    #[test]
    fn test_error_from_status_keeps_status() {
        let err = SaiError::from_status(SaiStatus::TableFull);
        assert_eq!(err, SaiError::Status { status: SaiStatus::TableFull });
        assert_eq!(err.status(), SaiStatus::TableFull);

        let err = SaiError::from_status(SaiStatus::Success);
        assert!(matches!(err, SaiError::Internal { .. }));
        assert_eq!(err.status(), SaiStatus::Failure);
    }

    #[test]
    fn test_local_errors_map_to_status() {
        assert_eq!(
            SaiError::invalid_parameter("null oid").status(),
            SaiStatus::InvalidParameter
        );
        assert_eq!(SaiError::Uninitialized.status(), SaiStatus::Uninitialized);
    }

    #[test]
    fn test_raw_status_to_result() {
        assert!(0_i32.to_result().is_ok());
        assert!((-7_i32).to_result().is_err());
    }
}
