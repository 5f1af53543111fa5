//! Safe wrapper for SAI switch API.

use super::SaiApi;
use crate::attr::SaiAttribute;
use crate::error::{SaiError, SaiResult};
use crate::types::{SaiObjectType, SwitchOid};

/// Safe wrapper for SAI switch API.
pub struct SwitchApi<'a, A: SaiApi + ?Sized> {
    api: &'a A,
    switch_id: SwitchOid,
}

impl<'a, A: SaiApi + ?Sized> SwitchApi<'a, A> {
    pub fn new(api: &'a A, switch_id: SwitchOid) -> Self {
        Self { api, switch_id }
    }

    /// Sets a switch attribute (`set_switch_attribute`).
    ///
    /// # Errors
    ///
    /// Returns an error for a null switch, for an attribute owned by another
    /// object type, or when the backend rejects the value.
    pub fn set_switch_attribute(&self, attr: &SaiAttribute) -> SaiResult<()> {
        if self.switch_id.is_null() {
            return Err(SaiError::invalid_parameter("switch OID is null"));
        }
        if attr.id.object_type() != SaiObjectType::Switch {
            return Err(SaiError::invalid_parameter(format!(
                "{} is not a switch attribute",
                attr.id
            )));
        }
        self.api
            .set_attribute(SaiObjectType::Switch, self.switch_id.as_raw(), attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{SaiAttrId, SaiAttrValue};
    use crate::error::SaiStatus;
    use crate::vs::VirtualSwitch;

    #[test]
    fn test_rejects_non_switch_attribute() {
        let vs = VirtualSwitch::new();
        let switch_id = SwitchOid::from_raw(VirtualSwitch::DEFAULT_SWITCH_ID).unwrap();
        let api = SwitchApi::new(&vs, switch_id);

        let attr = SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8));
        let err = api.set_switch_attribute(&attr).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidParameter);
        assert!(vs.journal().is_empty());
    }

    #[test]
    fn test_unknown_hash_reference_rejected() {
        let vs = VirtualSwitch::new();
        let switch_id = SwitchOid::from_raw(VirtualSwitch::DEFAULT_SWITCH_ID).unwrap();
        let api = SwitchApi::new(&vs, switch_id);

        let attr = SaiAttribute::new(SaiAttrId::SwitchEcmpHash, SaiAttrValue::Oid(0x1c00000000abcd));
        let err = api.set_switch_attribute(&attr).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidObjectId);
        assert_eq!(vs.switch_attribute(SaiAttrId::SwitchEcmpHash), None);
    }
}
