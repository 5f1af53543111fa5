//! Attribute lists for the provisioned SAI objects.
//!
//! Each `*Spec` descriptor is validated once on construction; after that, building
//! its attribute list cannot fail except for null object references.
//! Nothing here talks to the SAI.

use crate::config::UdfHashConfig;
use crate::transaction::ProvisioningStep;
use serde::{Deserialize, Serialize};
use sonic_sai::attr::{
    NativeHashField, SaiAttrId, SaiAttrValue, SaiAttribute, UdfBase, UdfGroupType,
};
use sonic_sai::{
    HashOid, SaiObjectId, SaiObjectKind, SaiObjectType, SwitchOid, UdfGroupOid, UdfMatchOid,
};
use std::fmt;
use thiserror::Error;

/// Smallest value that is an ethertype rather than an 802.3 length.
pub const MIN_ETHER_TYPE: u32 = 0x0600;

/// Values that cannot be turned into SAI attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("{field} value {value} exceeds maximum {max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("{field} must not be zero")]
    ZeroLength { field: &'static str },

    #[error("udf_match.ether_type 0x{0:04x} is an 802.3 length, not an ethertype")]
    InvalidEtherType(u32),

    #[error("udf_group.fixed_length {group} does not match udf.length {udf}")]
    LengthMismatch { group: u16, udf: u16 },

    #[error("{field} references a null object")]
    NullReference { field: &'static str },

    #[error("hash requires at least one UDF group")]
    EmptyGroupList,
}

fn narrow_u16(field: &'static str, value: u32) -> Result<u16, DescriptorError> {
    u16::try_from(value).map_err(|_| DescriptorError::OutOfRange {
        field,
        value,
        max: u16::MAX as u32,
    })
}

fn narrow_u8(field: &'static str, value: u32) -> Result<u8, DescriptorError> {
    u8::try_from(value).map_err(|_| DescriptorError::OutOfRange {
        field,
        value,
        max: u8::MAX as u32,
    })
}

fn non_zero_length(field: &'static str, value: Option<u32>) -> Result<Option<u16>, DescriptorError> {
    match value {
        None => Ok(None),
        Some(0) => Err(DescriptorError::ZeroLength { field }),
        Some(v) => narrow_u16(field, v).map(Some),
    }
}

fn oid_ref<K: SaiObjectKind>(
    field: &'static str,
    oid: SaiObjectId<K>,
) -> Result<SaiAttrValue, DescriptorError> {
    if oid.is_null() {
        return Err(DescriptorError::NullReference { field });
    }
    Ok(SaiAttrValue::Oid(oid.as_raw()))
}

/// Switch attribute the hash object is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashBindTarget {
    #[default]
    EcmpHash,
    EcmpHashIpv4,
    EcmpHashIpv6,
    LagHash,
}

impl HashBindTarget {
    pub const fn attr_id(&self) -> SaiAttrId {
        match self {
            HashBindTarget::EcmpHash => SaiAttrId::SwitchEcmpHash,
            HashBindTarget::EcmpHashIpv4 => SaiAttrId::SwitchEcmpHashIpv4,
            HashBindTarget::EcmpHashIpv6 => SaiAttrId::SwitchEcmpHashIpv6,
            HashBindTarget::LagHash => SaiAttrId::SwitchLagHash,
        }
    }
}

impl fmt::Display for HashBindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attr_id().name())
    }
}

/// UDF match parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfMatchSpec {
    ether_type: u16,
    ether_type_mask: u16,
    priority: Option<u8>,
}

impl UdfMatchSpec {
    pub fn new(
        ether_type: u32,
        ether_type_mask: u32,
        priority: Option<u32>,
    ) -> Result<Self, DescriptorError> {
        let ether_type_u16 = narrow_u16("udf_match.ether_type", ether_type)?;
        if ether_type < MIN_ETHER_TYPE {
            return Err(DescriptorError::InvalidEtherType(ether_type));
        }
        Ok(Self {
            ether_type: ether_type_u16,
            ether_type_mask: narrow_u16("udf_match.ether_type_mask", ether_type_mask)?,
            priority: priority
                .map(|p| narrow_u8("udf_match.priority", p))
                .transpose()?,
        })
    }

    /// IPv4 packets, exact match.
    pub fn ipv4() -> Self {
        Self {
            ether_type: 0x0800,
            ether_type_mask: 0xffff,
            priority: None,
        }
    }

    pub fn ether_type(&self) -> u16 {
        self.ether_type
    }

    pub fn attributes(&self) -> Vec<SaiAttribute> {
        let mut attrs = vec![SaiAttribute::new(
            SaiAttrId::UdfMatchL2Type,
            SaiAttrValue::U16Match {
                data: self.ether_type,
                mask: self.ether_type_mask,
            },
        )];
        if let Some(priority) = self.priority {
            attrs.push(SaiAttribute::new(
                SaiAttrId::UdfMatchPriority,
                SaiAttrValue::U8(priority),
            ));
        }
        attrs
    }
}

/// UDF group parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfGroupSpec {
    group_type: UdfGroupType,
    length: Option<u16>,
}

impl UdfGroupSpec {
    pub fn new(group_type: UdfGroupType, length: Option<u32>) -> Result<Self, DescriptorError> {
        Ok(Self {
            group_type,
            length: non_zero_length("udf_group.fixed_length", length)?,
        })
    }

    pub fn group_type(&self) -> UdfGroupType {
        self.group_type
    }

    pub fn length(&self) -> Option<u16> {
        self.length
    }

    pub fn attributes(&self) -> Vec<SaiAttribute> {
        let mut attrs = vec![SaiAttribute::new(
            SaiAttrId::UdfGroupType,
            SaiAttrValue::S32(self.group_type.as_raw()),
        )];
        if let Some(length) = self.length {
            attrs.push(SaiAttribute::new(
                SaiAttrId::UdfGroupLength,
                SaiAttrValue::U16(length),
            ));
        }
        attrs
    }
}

/// UDF extraction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfSpec {
    base: UdfBase,
    offset: u16,
    length: Option<u16>,
}

impl UdfSpec {
    pub fn new(base: UdfBase, offset: u32, length: Option<u32>) -> Result<Self, DescriptorError> {
        Ok(Self {
            base,
            offset: narrow_u16("udf.offset", offset)?,
            length: non_zero_length("udf.length", length)?,
        })
    }

    /// The IPv4 TTL byte: L3 offset 8, length 1.
    pub fn ipv4_ttl() -> Self {
        Self {
            base: UdfBase::L3,
            offset: 8,
            length: Some(1),
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn length(&self) -> Option<u16> {
        self.length
    }

    /// Builds the UDF attribute list.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::NullReference`] if either reference is null.
    pub fn attributes(
        &self,
        match_id: UdfMatchOid,
        group_id: UdfGroupOid,
    ) -> Result<Vec<SaiAttribute>, DescriptorError> {
        let mut attrs = vec![
            SaiAttribute::new(SaiAttrId::UdfMatchId, oid_ref("udf.match_id", match_id)?),
            SaiAttribute::new(SaiAttrId::UdfGroupId, oid_ref("udf.group_id", group_id)?),
            SaiAttribute::new(SaiAttrId::UdfBase, SaiAttrValue::S32(self.base.as_raw())),
            SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(self.offset)),
        ];
        if let Some(length) = self.length {
            attrs.push(SaiAttribute::new(SaiAttrId::UdfLength, SaiAttrValue::U16(length)));
        }
        Ok(attrs)
    }
}

/// Hash object parameters besides its UDF groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashSpec {
    native_fields: Vec<NativeHashField>,
}

impl HashSpec {
    pub fn new(native_fields: Vec<NativeHashField>) -> Self {
        Self { native_fields }
    }

    pub fn native_fields(&self) -> &[NativeHashField] {
        &self.native_fields
    }

    /// Builds the hash attribute list for the given UDF groups.
    ///
    /// The native field list is only emitted when non-empty.
    pub fn attributes(&self, groups: &[UdfGroupOid]) -> Result<Vec<SaiAttribute>, DescriptorError> {
        if groups.is_empty() {
            return Err(DescriptorError::EmptyGroupList);
        }
        if groups.iter().any(|g| g.is_null()) {
            return Err(DescriptorError::NullReference {
                field: "hash.udf_group_list",
            });
        }

        let mut attrs = vec![SaiAttribute::new(
            SaiAttrId::HashUdfGroupList,
            SaiAttrValue::OidList(groups.iter().map(|g| g.as_raw()).collect()),
        )];
        if !self.native_fields.is_empty() {
            attrs.push(SaiAttribute::new(
                SaiAttrId::HashNativeHashFieldList,
                SaiAttrValue::S32List(self.native_fields.iter().map(|f| f.as_raw()).collect()),
            ));
        }
        Ok(attrs)
    }
}

/// The switch attribute that binds `hash` to `target`.
pub fn switch_hash_binding(
    target: HashBindTarget,
    hash: HashOid,
) -> Result<SaiAttribute, DescriptorError> {
    Ok(SaiAttribute::new(
        target.attr_id(),
        oid_ref("switch.hash_attribute", hash)?,
    ))
}

/// Everything one provisioning attempt needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningPlan {
    pub switch_id: SwitchOid,
    pub bind_target: HashBindTarget,
    pub udf_match: UdfMatchSpec,
    pub udf_group: UdfGroupSpec,
    pub udf: UdfSpec,
    pub hash: HashSpec,
}

/// One planned step with its attributes, as shown by a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: ProvisioningStep,
    pub attributes: Vec<SaiAttribute>,
}

impl ProvisioningPlan {
    /// Plan that hashes the IPv4 TTL into the ECMP hash of `switch_id`.
    pub fn ipv4_ttl(switch_id: SwitchOid) -> Self {
        Self {
            switch_id,
            bind_target: HashBindTarget::EcmpHash,
            udf_match: UdfMatchSpec::ipv4(),
            udf_group: UdfGroupSpec {
                group_type: UdfGroupType::Hash,
                length: None,
            },
            udf: UdfSpec::ipv4_ttl(),
            hash: HashSpec::default(),
        }
    }

    /// Validates `config` and builds the plan.
    pub fn from_config(config: &UdfHashConfig) -> Result<Self, DescriptorError> {
        let switch_id = SwitchOid::from_raw(config.switch.id)
            .ok_or(DescriptorError::NullReference { field: "switch.id" })?;

        let udf_match = UdfMatchSpec::new(
            config.udf_match.ether_type,
            config.udf_match.ether_type_mask,
            config.udf_match.priority,
        )?;
        let udf_group = UdfGroupSpec::new(config.udf_group.group_type, config.udf_group.fixed_length)?;
        let udf = UdfSpec::new(config.udf.base, config.udf.offset, config.udf.length)?;

        if let (Some(group), Some(udf)) = (udf_group.length, udf.length) {
            if group != udf {
                return Err(DescriptorError::LengthMismatch { group, udf });
            }
        }

        Ok(Self {
            switch_id,
            bind_target: config.switch.hash_attribute,
            udf_match,
            udf_group,
            udf,
            hash: HashSpec::new(config.hash.native_fields.clone()),
        })
    }

    /// Attribute lists of all five steps, without touching the SAI.
    ///
    /// OIDs that only exist after creation are shown as placeholders that
    /// carry the object type in bits 48..55 and a zero index.
    pub fn preview(&self) -> Result<Vec<PlannedStep>, DescriptorError> {
        let match_id = placeholder::<sonic_sai::UdfMatchKind>();
        let group_id = placeholder::<sonic_sai::UdfGroupKind>();
        let hash_id = placeholder::<sonic_sai::HashKind>();

        Ok(vec![
            PlannedStep {
                step: ProvisioningStep::CreateUdfMatch,
                attributes: self.udf_match.attributes(),
            },
            PlannedStep {
                step: ProvisioningStep::CreateUdfGroup,
                attributes: self.udf_group.attributes(),
            },
            PlannedStep {
                step: ProvisioningStep::CreateUdf,
                attributes: self.udf.attributes(match_id, group_id)?,
            },
            PlannedStep {
                step: ProvisioningStep::CreateHash,
                attributes: self.hash.attributes(&[group_id])?,
            },
            PlannedStep {
                step: ProvisioningStep::BindHash,
                attributes: vec![switch_hash_binding(self.bind_target, hash_id)?],
            },
        ])
    }
}

fn placeholder<K: SaiObjectKind>() -> SaiObjectId<K> {
    let object_type: SaiObjectType = K::OBJECT_TYPE;
    SaiObjectId::from_raw_unchecked((object_type.as_raw() as u64) << 48)
}
