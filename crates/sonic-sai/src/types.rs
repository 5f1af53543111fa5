//! Type-safe SAI object ID wrappers.
//!
//! This module provides strongly-typed wrappers for SAI object IDs, preventing
//! accidental mixing of different object types (e.g., passing a UDF group OID
//! where a UDF match OID is expected).

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Raw SAI object ID type (matches sai_object_id_t in C).
pub type RawSaiObjectId = u64;

/// Runtime tag for the SAI object types this workspace provisions.
///
/// Values follow `sai_object_type_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SaiObjectType {
    Switch,
    Hash,
    Udf,
    UdfMatch,
    UdfGroup,
}

impl SaiObjectType {
    /// Returns the `sai_object_type_t` value.
    pub const fn as_raw(&self) -> u8 {
        match self {
            SaiObjectType::Switch => 33,
            SaiObjectType::Hash => 28,
            SaiObjectType::Udf => 29,
            SaiObjectType::UdfMatch => 30,
            SaiObjectType::UdfGroup => 31,
        }
    }

    /// Short lowercase name used in logs and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            SaiObjectType::Switch => "switch",
            SaiObjectType::Hash => "hash",
            SaiObjectType::Udf => "udf",
            SaiObjectType::UdfMatch => "udf_match",
            SaiObjectType::UdfGroup => "udf_group",
        }
    }
}

impl fmt::Display for SaiObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker trait for SAI object kinds.
///
/// Each SAI object type implements this trait to enable compile-time
/// type checking of object IDs.
pub trait SaiObjectKind: Send + Sync + 'static {
    /// The runtime object type tag.
    const OBJECT_TYPE: SaiObjectType;

    /// Returns the SAI object type name for debugging.
    fn type_name() -> &'static str;
}

/// A type-safe SAI object ID.
///
/// The phantom type parameter `T` indicates what kind of SAI object this
/// ID refers to.
///
/// # Examples
///
/// ```
/// use sonic_sai::{UdfGroupOid, UdfMatchOid};
///
/// let udf_match = UdfMatchOid::from_raw(0x1e000000000001).unwrap();
/// let udf_group = UdfGroupOid::from_raw(0x1f000000000001).unwrap();
///
/// // This would fail to compile:
/// // fn takes_match(m: UdfMatchOid) {}
/// // takes_match(udf_group);
/// # let _ = (udf_match, udf_group);
/// ```
#[derive(Clone, Copy)]
pub struct SaiObjectId<T: SaiObjectKind> {
    raw: RawSaiObjectId,
    _marker: PhantomData<T>,
}

impl<T: SaiObjectKind> SaiObjectId<T> {
    /// The null object ID (SAI_NULL_OBJECT_ID).
    pub const NULL: Self = Self {
        raw: 0,
        _marker: PhantomData,
    };

    /// Creates a new object ID from a raw value.
    ///
    /// Returns `None` if the raw value is 0 (null object ID).
    pub fn from_raw(raw: RawSaiObjectId) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self {
                raw,
                _marker: PhantomData,
            })
        }
    }

    /// Creates a new object ID from a raw value, including null.
    pub const fn from_raw_unchecked(raw: RawSaiObjectId) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Returns the raw object ID value.
    pub const fn as_raw(&self) -> RawSaiObjectId {
        self.raw
    }

    /// Returns the runtime object type of this ID.
    pub const fn object_type(&self) -> SaiObjectType {
        T::OBJECT_TYPE
    }

    /// Returns true if this is a null object ID.
    pub const fn is_null(&self) -> bool {
        self.raw == 0
    }

    /// Returns true if this is a valid (non-null) object ID.
    pub const fn is_valid(&self) -> bool {
        self.raw != 0
    }
}

impl<T: SaiObjectKind> fmt::Debug for SaiObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:016x})", T::type_name(), self.raw)
    }
}

impl<T: SaiObjectKind> fmt::Display for SaiObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.raw)
    }
}

impl<T: SaiObjectKind> PartialEq for SaiObjectId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: SaiObjectKind> Eq for SaiObjectId<T> {}

impl<T: SaiObjectKind> Hash for SaiObjectId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: SaiObjectKind> Default for SaiObjectId<T> {
    fn default() -> Self {
        Self::NULL
    }
}

// ============================================================================
// Object Kind Markers
// ============================================================================

macro_rules! define_object_kind {
    ($name:ident, $object_type:ident, $type_name:literal, $oid_alias:ident) => {
        #[doc = concat!("Marker type for SAI ", $type_name, " objects.")]
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl SaiObjectKind for $name {
            const OBJECT_TYPE: SaiObjectType = SaiObjectType::$object_type;

            fn type_name() -> &'static str {
                $type_name
            }
        }

        #[doc = concat!("Type alias for ", $type_name, " object IDs.")]
        pub type $oid_alias = SaiObjectId<$name>;
    };
}

define_object_kind!(SwitchKind, Switch, "Switch", SwitchOid);
define_object_kind!(UdfMatchKind, UdfMatch, "UdfMatch", UdfMatchOid);
define_object_kind!(UdfGroupKind, UdfGroup, "UdfGroup", UdfGroupOid);
define_object_kind!(UdfKind, Udf, "Udf", UdfOid);
define_object_kind!(HashKind, Hash, "Hash", HashOid);
