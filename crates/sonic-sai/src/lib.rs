//! Safe Rust bindings for SAI (Switch Abstraction Interface).
//!
//! This crate provides type-safe wrappers around the SAI object model used to
//! program UDF-based hashing, preventing common errors like mixing object IDs
//! of different types and ensuring proper error handling.
//!
//! # Architecture
//!
//! - [`types`]: Core SAI types including type-safe object IDs
//! - [`error`]: Error types, status codes and their labels
//! - [`attr`]: Attribute identifiers and values
//! - [`api`]: The [`SaiApi`] backend trait and typed wrappers (UDF, hash, switch)
//! - [`vs`]: In-memory virtual switch implementing [`SaiApi`]
//!
//! # Example
//!
//! ```
//! use sonic_sai::api::{SaiApi, ServiceProfile, UdfApi};
//! use sonic_sai::attr::{SaiAttrId, SaiAttrValue, SaiAttribute};
//! use sonic_sai::vs::VirtualSwitch;
//! use sonic_sai::{SaiResult, SwitchOid, UdfMatchOid};
//!
//! fn match_ipv4(api: &impl SaiApi, switch_id: SwitchOid) -> SaiResult<UdfMatchOid> {
//!     let attrs = [SaiAttribute::new(
//!         SaiAttrId::UdfMatchL2Type,
//!         SaiAttrValue::U16Match { data: 0x0800, mask: 0xffff },
//!     )];
//!     UdfApi::new(api, switch_id).create_udf_match(&attrs)
//! }
//!
//! let vs = VirtualSwitch::new();
//! vs.api_initialize(&ServiceProfile::new()).unwrap();
//! let switch_id = SwitchOid::from_raw(vs.switch_id()).unwrap();
//! assert!(match_ipv4(&vs, switch_id).unwrap().is_valid());
//! ```

pub mod api;
pub mod attr;
pub mod error;
pub mod types;
pub mod vs;

// Re-export commonly used types
pub use types::{
    HashKind, HashOid, RawSaiObjectId, SaiObjectId, SaiObjectKind, SaiObjectType, SwitchKind,
    SwitchOid, UdfGroupKind, UdfGroupOid, UdfKind, UdfMatchKind, UdfMatchOid, UdfOid,
};

pub use error::{SaiError, SaiResult, SaiStatus};
