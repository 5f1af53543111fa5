//! Safe wrappers for SAI API functions.
//!
//! [`SaiApi`] is the boundary to a SAI implementation: a vendor library, the
//! sairedis client, or the in-memory [`crate::vs::VirtualSwitch`]. The typed
//! wrappers in the submodules sit on top of it and:
//!
//! - Use type-safe object IDs to prevent mixing different object types
//! - Reject null object IDs before they reach the backend
//! - Convert SAI status codes to Rust Results
//!
//! # Available API Modules
//!
//! - [`udf`]: UDF match, UDF group and UDF management
//! - [`hash`]: Hash object management
//! - [`switch`]: Switch-level attributes

pub mod hash;
pub mod switch;
pub mod udf;

pub use hash::HashApi;
pub use switch::SwitchApi;
pub use udf::UdfApi;

use crate::attr::SaiAttribute;
use crate::error::{SaiError, SaiResult};
use crate::types::{RawSaiObjectId, SaiObjectId, SaiObjectKind, SaiObjectType, SwitchOid};
use std::collections::BTreeMap;
use std::fmt;

/// SAI API tables that can be queried (`sai_api_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiApiKind {
    Switch,
    Hash,
    Udf,
}

impl fmt::Display for SaiApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaiApiKind::Switch => "SAI_API_SWITCH",
            SaiApiKind::Hash => "SAI_API_HASH",
            SaiApiKind::Udf => "SAI_API_UDF",
        };
        f.write_str(s)
    }
}

/// Key/value profile handed to `sai_api_initialize` through the service
/// method table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProfile {
    values: BTreeMap<String, String>,
}

impl ServiceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// `profile_get_value`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterates entries in key order, as `profile_get_next_value` would.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for ServiceProfile {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A SAI implementation.
///
/// All calls are synchronous and block for the driver round-trip. `create_object`
/// either returns a fresh, non-null OID or an error; it must not leave a
/// partially created object behind.
pub trait SaiApi {
    /// Initializes the SAI library (`sai_api_initialize`).
    fn api_initialize(&self, profile: &ServiceProfile) -> SaiResult<()>;

    /// Checks that an API table is available (`sai_api_query`).
    fn api_query(&self, api: SaiApiKind) -> SaiResult<()>;

    /// Creates an object of `object_type` under `switch_id`.
    fn create_object(
        &self,
        object_type: SaiObjectType,
        switch_id: SwitchOid,
        attrs: &[SaiAttribute],
    ) -> SaiResult<RawSaiObjectId>;

    /// Removes a previously created object.
    fn remove_object(&self, object_type: SaiObjectType, oid: RawSaiObjectId) -> SaiResult<()>;

    /// Sets one attribute on a live object.
    fn set_attribute(
        &self,
        object_type: SaiObjectType,
        oid: RawSaiObjectId,
        attr: &SaiAttribute,
    ) -> SaiResult<()>;
}

impl<A: SaiApi + ?Sized> SaiApi for &A {
    fn api_initialize(&self, profile: &ServiceProfile) -> SaiResult<()> {
        (**self).api_initialize(profile)
    }

    fn api_query(&self, api: SaiApiKind) -> SaiResult<()> {
        (**self).api_query(api)
    }

    fn create_object(
        &self,
        object_type: SaiObjectType,
        switch_id: SwitchOid,
        attrs: &[SaiAttribute],
    ) -> SaiResult<RawSaiObjectId> {
        (**self).create_object(object_type, switch_id, attrs)
    }

    fn remove_object(&self, object_type: SaiObjectType, oid: RawSaiObjectId) -> SaiResult<()> {
        (**self).remove_object(object_type, oid)
    }

    fn set_attribute(
        &self,
        object_type: SaiObjectType,
        oid: RawSaiObjectId,
        attr: &SaiAttribute,
    ) -> SaiResult<()> {
        (**self).set_attribute(object_type, oid, attr)
    }
}

/// Creates an object and wraps the returned OID in its typed form.
///
/// A backend that reports success with a null OID violates the [`SaiApi`]
/// contract; this is reported as an internal error.
pub(crate) fn create_typed<K, A>(
    api: &A,
    switch_id: SwitchOid,
    attrs: &[SaiAttribute],
) -> SaiResult<SaiObjectId<K>>
where
    K: SaiObjectKind,
    A: SaiApi + ?Sized,
{
    if switch_id.is_null() {
        return Err(SaiError::invalid_parameter("switch OID is null"));
    }
    check_attr_owner(K::OBJECT_TYPE, attrs)?;

    let raw = api.create_object(K::OBJECT_TYPE, switch_id, attrs)?;
    SaiObjectId::<K>::from_raw(raw).ok_or_else(|| {
        SaiError::internal(format!("create {} returned a null OID", K::OBJECT_TYPE))
    })
}

pub(crate) fn remove_typed<K, A>(api: &A, oid: SaiObjectId<K>) -> SaiResult<()>
where
    K: SaiObjectKind,
    A: SaiApi + ?Sized,
{
    if oid.is_null() {
        return Err(SaiError::invalid_parameter(format!(
            "{} OID is null",
            K::OBJECT_TYPE
        )));
    }
    api.remove_object(K::OBJECT_TYPE, oid.as_raw())
}

fn check_attr_owner(object_type: SaiObjectType, attrs: &[SaiAttribute]) -> SaiResult<()> {
    match attrs.iter().find(|a| a.id.object_type() != object_type) {
        Some(attr) => Err(SaiError::invalid_parameter(format!(
            "{} is not an attribute of {}",
            attr.id, object_type
        ))),
        None => Ok(()),
    }
}
