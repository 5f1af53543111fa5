//! Safe wrapper for SAI UDF API.
//!
//! UDF objects come in three layers: a UDF match selects packets, a UDF group
//! collects extracted bytes for a consumer, and a UDF pulls a byte range out of
//! matching packets into a group.

use super::{create_typed, remove_typed, SaiApi};
use crate::attr::SaiAttribute;
use crate::error::{SaiError, SaiResult};
use crate::types::{SwitchOid, UdfGroupOid, UdfMatchOid, UdfOid};

/// Safe wrapper for SAI UDF API.
pub struct UdfApi<'a, A: SaiApi + ?Sized> {
    api: &'a A,
    switch_id: SwitchOid,
}

impl<'a, A: SaiApi + ?Sized> UdfApi<'a, A> {
    /// Creates a new UdfApi bound to `switch_id`.
    pub fn new(api: &'a A, switch_id: SwitchOid) -> Self {
        Self { api, switch_id }
    }

    pub fn switch_id(&self) -> SwitchOid {
        self.switch_id
    }

    /// Creates a UDF match.
    pub fn create_udf_match(&self, attrs: &[SaiAttribute]) -> SaiResult<UdfMatchOid> {
        create_typed(self.api, self.switch_id, attrs)
    }

    pub fn remove_udf_match(&self, oid: UdfMatchOid) -> SaiResult<()> {
        remove_typed(self.api, oid)
    }

    /// Creates a UDF group.
    pub fn create_udf_group(&self, attrs: &[SaiAttribute]) -> SaiResult<UdfGroupOid> {
        create_typed(self.api, self.switch_id, attrs)
    }

    pub fn remove_udf_group(&self, oid: UdfGroupOid) -> SaiResult<()> {
        remove_typed(self.api, oid)
    }

    /// Creates a UDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute list carries a null match or group
    /// reference, or if the backend rejects the object.
    pub fn create_udf(&self, attrs: &[SaiAttribute]) -> SaiResult<UdfOid> {
        if attrs
            .iter()
            .any(|a| a.value.referenced_oids().iter().any(|oid| *oid == 0))
        {
            return Err(SaiError::invalid_parameter("UDF references a null OID"));
        }
        create_typed(self.api, self.switch_id, attrs)
    }

    pub fn remove_udf(&self, oid: UdfOid) -> SaiResult<()> {
        remove_typed(self.api, oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{SaiAttrId, SaiAttrValue};
    use crate::error::SaiStatus;
    use crate::vs::VirtualSwitch;

    fn switch() -> SwitchOid {
        SwitchOid::from_raw(VirtualSwitch::DEFAULT_SWITCH_ID).unwrap()
    }

    #[test]
    fn test_create_and_remove_udf_match() {
        let vs = VirtualSwitch::new();
        let api = UdfApi::new(&vs, switch());
        let attrs = [SaiAttribute::new(
            SaiAttrId::UdfMatchL2Type,
            SaiAttrValue::U16Match {
                data: 0x0800,
                mask: 0xffff,
            },
        )];

        let oid = api.create_udf_match(&attrs).unwrap();
        assert!(oid.is_valid());
        assert_eq!(vs.object_count(), 1);

        api.remove_udf_match(oid).unwrap();
        assert_eq!(vs.object_count(), 0);
    }

    #[test]
    fn test_null_switch_rejected() {
        let vs = VirtualSwitch::new();
        let api = UdfApi::new(&vs, SwitchOid::NULL);
        let err = api.create_udf_group(&[]).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidParameter);
        assert!(vs.journal().is_empty());
    }

    #[test]
    fn test_null_reference_rejected() {
        let vs = VirtualSwitch::new();
        let api = UdfApi::new(&vs, switch());
        let attrs = [
            SaiAttribute::new(SaiAttrId::UdfMatchId, SaiAttrValue::Oid(0)),
            SaiAttribute::new(SaiAttrId::UdfGroupId, SaiAttrValue::Oid(0)),
        ];
        assert!(api.create_udf(&attrs).is_err());
        assert!(vs.journal().is_empty());
    }

    #[test]
    fn test_foreign_attribute_rejected() {
        let vs = VirtualSwitch::new();
        let api = UdfApi::new(&vs, switch());
        let attrs = [SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8))];
        assert!(api.create_udf_match(&attrs).is_err());
    }

    #[test]
    fn test_remove_null_rejected() {
        let vs = VirtualSwitch::new();
        let api = UdfApi::new(&vs, switch());
        assert!(api.remove_udf(UdfOid::NULL).is_err());
    }
}
