//! SAI attribute identifiers and values.
//!
//! Only the attributes needed to program UDF-based hashing are modelled.
//! Each identifier knows which object type it belongs to, so a backend can
//! reject an attribute sent to the wrong object.

use crate::types::{RawSaiObjectId, SaiObjectType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UDF group type (`sai_udf_group_type_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UdfGroupType {
    /// Group feeds ACL/generic consumers
    Generic,
    /// Group feeds the hash engine
    #[default]
    Hash,
}

impl UdfGroupType {
    pub const fn as_raw(&self) -> i32 {
        match self {
            UdfGroupType::Generic => 0,
            UdfGroupType::Hash => 1,
        }
    }
}

/// Header a UDF offset is measured from (`sai_udf_base_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UdfBase {
    L2,
    #[default]
    L3,
    L4,
}

impl UdfBase {
    pub const fn as_raw(&self) -> i32 {
        match self {
            UdfBase::L2 => 0,
            UdfBase::L3 => 1,
            UdfBase::L4 => 2,
        }
    }
}

/// Native packet fields a hash object can include (`sai_native_hash_field_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeHashField {
    SrcIp,
    DstIp,
    InnerSrcIp,
    InnerDstIp,
    VlanId,
    IpProtocol,
    EthernetType,
    L4SrcPort,
    L4DstPort,
    SrcMac,
    DstMac,
    InPort,
}

impl NativeHashField {
    pub const fn as_raw(&self) -> i32 {
        match self {
            NativeHashField::SrcIp => 0,
            NativeHashField::DstIp => 1,
            NativeHashField::InnerSrcIp => 2,
            NativeHashField::InnerDstIp => 3,
            NativeHashField::VlanId => 4,
            NativeHashField::IpProtocol => 5,
            NativeHashField::EthernetType => 6,
            NativeHashField::L4SrcPort => 7,
            NativeHashField::L4DstPort => 8,
            NativeHashField::SrcMac => 9,
            NativeHashField::DstMac => 10,
            NativeHashField::InPort => 11,
        }
    }
}

/// Attribute identifiers, grouped by owning object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiAttrId {
    // SAI_UDF_MATCH_ATTR_*
    UdfMatchL2Type,
    UdfMatchPriority,
    // SAI_UDF_GROUP_ATTR_*
    UdfGroupType,
    UdfGroupLength,
    // SAI_UDF_ATTR_*
    UdfMatchId,
    UdfGroupId,
    UdfBase,
    UdfOffset,
    UdfLength,
    // SAI_HASH_ATTR_*
    HashNativeHashFieldList,
    HashUdfGroupList,
    // SAI_SWITCH_ATTR_*
    SwitchEcmpHash,
    SwitchEcmpHashIpv4,
    SwitchEcmpHashIpv6,
    SwitchLagHash,
}

impl SaiAttrId {
    /// Object type this attribute belongs to.
    pub const fn object_type(&self) -> SaiObjectType {
        match self {
            SaiAttrId::UdfMatchL2Type | SaiAttrId::UdfMatchPriority => SaiObjectType::UdfMatch,
            SaiAttrId::UdfGroupType | SaiAttrId::UdfGroupLength => SaiObjectType::UdfGroup,
            SaiAttrId::UdfMatchId
            | SaiAttrId::UdfGroupId
            | SaiAttrId::UdfBase
            | SaiAttrId::UdfOffset
            | SaiAttrId::UdfLength => SaiObjectType::Udf,
            SaiAttrId::HashNativeHashFieldList | SaiAttrId::HashUdfGroupList => {
                SaiObjectType::Hash
            }
            SaiAttrId::SwitchEcmpHash
            | SaiAttrId::SwitchEcmpHashIpv4
            | SaiAttrId::SwitchEcmpHashIpv6
            | SaiAttrId::SwitchLagHash => SaiObjectType::Switch,
        }
    }

    /// The SAI header name of the attribute.
    pub const fn name(&self) -> &'static str {
        match self {
            SaiAttrId::UdfMatchL2Type => "SAI_UDF_MATCH_ATTR_L2_TYPE",
            SaiAttrId::UdfMatchPriority => "SAI_UDF_MATCH_ATTR_PRIORITY",
            SaiAttrId::UdfGroupType => "SAI_UDF_GROUP_ATTR_TYPE",
            SaiAttrId::UdfGroupLength => "SAI_UDF_GROUP_ATTR_LENGTH",
            SaiAttrId::UdfMatchId => "SAI_UDF_ATTR_MATCH_ID",
            SaiAttrId::UdfGroupId => "SAI_UDF_ATTR_GROUP_ID",
            SaiAttrId::UdfBase => "SAI_UDF_ATTR_BASE",
            SaiAttrId::UdfOffset => "SAI_UDF_ATTR_OFFSET",
            SaiAttrId::UdfLength => "SAI_UDF_ATTR_LENGTH",
            SaiAttrId::HashNativeHashFieldList => "SAI_HASH_ATTR_NATIVE_HASH_FIELD_LIST",
            SaiAttrId::HashUdfGroupList => "SAI_HASH_ATTR_UDF_GROUP_LIST",
            SaiAttrId::SwitchEcmpHash => "SAI_SWITCH_ATTR_ECMP_HASH",
            SaiAttrId::SwitchEcmpHashIpv4 => "SAI_SWITCH_ATTR_ECMP_HASH_IPV4",
            SaiAttrId::SwitchEcmpHashIpv6 => "SAI_SWITCH_ATTR_ECMP_HASH_IPV6",
            SaiAttrId::SwitchLagHash => "SAI_SWITCH_ATTR_LAG_HASH",
        }
    }
}

impl fmt::Display for SaiAttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute value, mirroring the members of `sai_attribute_value_t` in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SaiAttrValue {
    U8(u8),
    U16(u16),
    S32(i32),
    /// ACL-style field data with mask (`sai_acl_field_data_t` on u16)
    U16Match { data: u16, mask: u16 },
    Oid(RawSaiObjectId),
    OidList(Vec<RawSaiObjectId>),
    S32List(Vec<i32>),
}

impl SaiAttrValue {
    /// Object IDs referenced by this value.
    pub fn referenced_oids(&self) -> &[RawSaiObjectId] {
        match self {
            SaiAttrValue::Oid(oid) => std::slice::from_ref(oid),
            SaiAttrValue::OidList(list) => list,
            _ => &[],
        }
    }
}

impl fmt::Display for SaiAttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaiAttrValue::U8(v) => write!(f, "{}", v),
            SaiAttrValue::U16(v) => write!(f, "{}", v),
            SaiAttrValue::S32(v) => write!(f, "{}", v),
            SaiAttrValue::U16Match { data, mask } => write!(f, "0x{:04x}&0x{:04x}", data, mask),
            SaiAttrValue::Oid(oid) => write!(f, "oid:0x{:x}", oid),
            SaiAttrValue::OidList(list) => {
                let items: Vec<String> = list.iter().map(|oid| format!("oid:0x{:x}", oid)).collect();
                write!(f, "{}:[{}]", list.len(), items.join(","))
            }
            SaiAttrValue::S32List(list) => {
                let items: Vec<String> = list.iter().map(|v| v.to_string()).collect();
                write!(f, "{}:[{}]", list.len(), items.join(","))
            }
        }
    }
}

/// A single attribute (`sai_attribute_t`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SaiAttribute {
    pub id: SaiAttrId,
    pub value: SaiAttrValue,
}

impl SaiAttribute {
    pub fn new(id: SaiAttrId, value: SaiAttrValue) -> Self {
        Self { id, value }
    }
}

impl fmt::Display for SaiAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.value)
    }
}
