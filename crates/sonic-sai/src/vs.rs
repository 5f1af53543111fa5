//! In-memory SAI implementation (virtual switch).
//!
//! `VirtualSwitch` implements [`SaiApi`] without hardware. It allocates OIDs
//! the way SAI VS does (object type in bits 48..55), validates references
//! between objects, keeps switch attributes, and journals every call so tests
//! can assert on the exact call sequence. Faults can be injected per operation
//! or per mutating call index.

use crate::api::{SaiApi, SaiApiKind, ServiceProfile};
use crate::attr::{SaiAttrId, SaiAttrValue, SaiAttribute, UdfGroupType};
use crate::error::{SaiError, SaiResult, SaiStatus};
use crate::types::{RawSaiObjectId, SaiObjectType, SwitchOid};
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Operation kinds recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiOp {
    Initialize,
    Query(SaiApiKind),
    Create(SaiObjectType),
    Remove(SaiObjectType),
    Set(SaiObjectType),
}

impl SaiOp {
    /// Create, remove and set change switch state; initialize and query do not.
    pub fn is_mutating(&self) -> bool {
        matches!(self, SaiOp::Create(_) | SaiOp::Remove(_) | SaiOp::Set(_))
    }
}

impl fmt::Display for SaiOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaiOp::Initialize => write!(f, "initialize"),
            SaiOp::Query(api) => write!(f, "query {}", api),
            SaiOp::Create(t) => write!(f, "create {}", t),
            SaiOp::Remove(t) => write!(f, "remove {}", t),
            SaiOp::Set(t) => write!(f, "set {}", t),
        }
    }
}

/// One journaled call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaiCall {
    pub op: SaiOp,
    /// Created OID for create, target OID for remove/set, 0 otherwise.
    pub oid: RawSaiObjectId,
    pub attrs: Vec<SaiAttribute>,
    pub status: SaiStatus,
}

/// What to do when a fault fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultAction {
    /// Fail the call with this status.
    Fail(SaiStatus),
    /// Report success on a create but hand back a null OID.
    NullOid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultTrigger {
    /// The n-th (0-based) call of this op.
    Op { op: SaiOp, occurrence: usize },
    /// The n-th (0-based) mutating call of any kind.
    MutatingCall(usize),
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    trigger: FaultTrigger,
    action: FaultAction,
}

#[derive(Debug, Clone)]
struct VsObject {
    object_type: SaiObjectType,
    attrs: Vec<SaiAttribute>,
}

impl VsObject {
    fn attr(&self, id: SaiAttrId) -> Option<&SaiAttrValue> {
        self.attrs.iter().find(|a| a.id == id).map(|a| &a.value)
    }
}

#[derive(Debug, Default)]
struct VsState {
    profile: Option<ServiceProfile>,
    next_index: u64,
    objects: BTreeMap<RawSaiObjectId, VsObject>,
    switch_attrs: HashMap<SaiAttrId, SaiAttrValue>,
    journal: Vec<SaiCall>,
    faults: Vec<Fault>,
}

impl VsState {
    /// Returns the fault action for the call about to be journaled, consuming it.
    fn take_fault(&mut self, op: SaiOp) -> Option<FaultAction> {
        let occurrence = self.journal.iter().filter(|c| c.op == op).count();
        let mutating_index = self.journal.iter().filter(|c| c.op.is_mutating()).count();

        let pos = self.faults.iter().position(|f| match f.trigger {
            FaultTrigger::Op { op: o, occurrence: n } => o == op && n == occurrence,
            FaultTrigger::MutatingCall(n) => op.is_mutating() && n == mutating_index,
        })?;
        Some(self.faults.remove(pos).action)
    }

    fn record(&mut self, op: SaiOp, oid: RawSaiObjectId, attrs: &[SaiAttribute], status: SaiStatus) {
        self.journal.push(SaiCall {
            op,
            oid,
            attrs: attrs.to_vec(),
            status,
        });
    }

    fn object_of_type(&self, oid: RawSaiObjectId, expected: SaiObjectType) -> SaiResult<&VsObject> {
        match self.objects.get(&oid) {
            Some(obj) if obj.object_type == expected => Ok(obj),
            _ => Err(SaiStatus::InvalidObjectId.into()),
        }
    }

    fn is_referenced(&self, oid: RawSaiObjectId) -> bool {
        let by_object = self
            .objects
            .values()
            .flat_map(|o| o.attrs.iter())
            .any(|a| a.value.referenced_oids().contains(&oid));
        let by_switch = self
            .switch_attrs
            .values()
            .any(|v| v.referenced_oids().contains(&oid));
        by_object || by_switch
    }

    fn validate_create(&self, object_type: SaiObjectType, attrs: &[SaiAttribute]) -> SaiResult<()> {
        for attr in attrs {
            if attr.id.object_type() != object_type {
                return Err(SaiStatus::InvalidAttribute.into());
            }
        }
        let find = |id: SaiAttrId| attrs.iter().find(|a| a.id == id).map(|a| &a.value);

        match object_type {
            SaiObjectType::Udf => {
                let match_id = match find(SaiAttrId::UdfMatchId) {
                    Some(SaiAttrValue::Oid(oid)) => *oid,
                    _ => return Err(SaiStatus::MandatoryAttributeMissing.into()),
                };
                let group_id = match find(SaiAttrId::UdfGroupId) {
                    Some(SaiAttrValue::Oid(oid)) => *oid,
                    _ => return Err(SaiStatus::MandatoryAttributeMissing.into()),
                };
                if find(SaiAttrId::UdfOffset).is_none() {
                    return Err(SaiStatus::MandatoryAttributeMissing.into());
                }
                self.object_of_type(match_id, SaiObjectType::UdfMatch)?;
                let group = self.object_of_type(group_id, SaiObjectType::UdfGroup)?;

                if let (Some(SaiAttrValue::U16(group_len)), Some(SaiAttrValue::U16(udf_len))) =
                    (group.attr(SaiAttrId::UdfGroupLength), find(SaiAttrId::UdfLength))
                {
                    if group_len != udf_len {
                        return Err(SaiStatus::InvalidParameter.into());
                    }
                }
            }
            SaiObjectType::Hash => {
                if let Some(value) = find(SaiAttrId::HashUdfGroupList) {
                    for oid in value.referenced_oids() {
                        let group = self.object_of_type(*oid, SaiObjectType::UdfGroup)?;
                        let is_hash_group = matches!(
                            group.attr(SaiAttrId::UdfGroupType),
                            Some(SaiAttrValue::S32(t)) if *t == UdfGroupType::Hash.as_raw()
                        );
                        if !is_hash_group {
                            return Err(SaiStatus::InvalidParameter.into());
                        }
                    }
                }
            }
            SaiObjectType::UdfMatch | SaiObjectType::UdfGroup => {}
            SaiObjectType::Switch => return Err(SaiStatus::NotSupported.into()),
        }
        Ok(())
    }
}

/// In-memory SAI implementation.
#[derive(Debug)]
pub struct VirtualSwitch {
    switch_id: RawSaiObjectId,
    state: Mutex<VsState>,
}

impl Default for VirtualSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualSwitch {
    /// Switch OID of the first switch in SAI VS.
    pub const DEFAULT_SWITCH_ID: RawSaiObjectId = 0x21_0000_0000_0000;

    pub fn new() -> Self {
        Self::with_switch_id(Self::DEFAULT_SWITCH_ID)
    }

    pub fn with_switch_id(switch_id: RawSaiObjectId) -> Self {
        Self {
            switch_id,
            state: Mutex::new(VsState::default()),
        }
    }

    pub fn switch_id(&self) -> RawSaiObjectId {
        self.switch_id
    }

    /// Fails the first call of `op` with `status`.
    pub fn fail_on(&self, op: SaiOp, status: SaiStatus) -> &Self {
        self.fail_on_nth(op, 0, status)
    }

    /// Fails the `occurrence`-th (0-based) call of `op` with `status`.
    pub fn fail_on_nth(&self, op: SaiOp, occurrence: usize, status: SaiStatus) -> &Self {
        self.push_fault(FaultTrigger::Op { op, occurrence }, FaultAction::Fail(status))
    }

    /// Fails the `index`-th (0-based) create/remove/set call with `status`.
    pub fn fail_mutating_call(&self, index: usize, status: SaiStatus) -> &Self {
        self.push_fault(FaultTrigger::MutatingCall(index), FaultAction::Fail(status))
    }

    /// Makes the first call of `op` report success with a null OID.
    pub fn null_oid_on(&self, op: SaiOp) -> &Self {
        self.push_fault(FaultTrigger::Op { op, occurrence: 0 }, FaultAction::NullOid)
    }

    fn push_fault(&self, trigger: FaultTrigger, action: FaultAction) -> &Self {
        self.state.lock().faults.push(Fault { trigger, action });
        self
    }

    /// All calls made so far, in order.
    pub fn journal(&self) -> Vec<SaiCall> {
        self.state.lock().journal.clone()
    }

    /// Operations of all calls made so far, in order.
    pub fn ops(&self) -> Vec<SaiOp> {
        self.state.lock().journal.iter().map(|c| c.op).collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().profile.is_some()
    }

    pub fn profile(&self) -> Option<ServiceProfile> {
        self.state.lock().profile.clone()
    }

    /// Number of live objects (the switch itself is not counted).
    pub fn object_count(&self) -> usize {
        self.state.lock().objects.len()
    }

    /// Live objects of one type, in OID order.
    pub fn objects_of(&self, object_type: SaiObjectType) -> Vec<RawSaiObjectId> {
        self.state
            .lock()
            .objects
            .iter()
            .filter(|(_, o)| o.object_type == object_type)
            .map(|(oid, _)| *oid)
            .collect()
    }

    pub fn object_attributes(&self, oid: RawSaiObjectId) -> Option<Vec<SaiAttribute>> {
        self.state.lock().objects.get(&oid).map(|o| o.attrs.clone())
    }

    pub fn switch_attribute(&self, id: SaiAttrId) -> Option<SaiAttrValue> {
        self.state.lock().switch_attrs.get(&id).cloned()
    }

    fn check_switch(&self, switch_id: RawSaiObjectId) -> SaiResult<()> {
        if switch_id == self.switch_id {
            Ok(())
        } else {
            Err(SaiStatus::InvalidObjectId.into())
        }
    }
}

impl SaiApi for VirtualSwitch {
    fn api_initialize(&self, profile: &ServiceProfile) -> SaiResult<()> {
        let mut state = self.state.lock();
        let op = SaiOp::Initialize;

        let result = match state.take_fault(op) {
            Some(FaultAction::Fail(status)) => Err(SaiError::from_status(status)),
            _ if state.profile.is_some() => Err(SaiStatus::Failure.into()),
            _ => {
                state.profile = Some(profile.clone());
                Ok(())
            }
        };

        let status = status_of(&result);
        state.record(op, 0, &[], status);
        debug!("vs: {} -> {} ({} profile keys)", op, status, profile.len());
        result
    }

    fn api_query(&self, api: SaiApiKind) -> SaiResult<()> {
        let mut state = self.state.lock();
        let op = SaiOp::Query(api);

        let result = match state.take_fault(op) {
            Some(FaultAction::Fail(status)) => Err(SaiError::from_status(status)),
            _ if state.profile.is_none() => Err(SaiError::Uninitialized),
            _ => Ok(()),
        };

        let status = status_of(&result);
        state.record(op, 0, &[], status);
        debug!("vs: {} -> {}", op, status);
        result
    }

    fn create_object(
        &self,
        object_type: SaiObjectType,
        switch_id: SwitchOid,
        attrs: &[SaiAttribute],
    ) -> SaiResult<RawSaiObjectId> {
        let mut state = self.state.lock();
        let op = SaiOp::Create(object_type);

        let result = match state.take_fault(op) {
            Some(FaultAction::Fail(status)) => Err(SaiError::from_status(status)),
            Some(FaultAction::NullOid) => Ok(0),
            None => self
                .check_switch(switch_id.as_raw())
                .and_then(|_| state.validate_create(object_type, attrs))
                .map(|_| {
                    state.next_index += 1;
                    let oid = ((object_type.as_raw() as u64) << 48) | state.next_index;
                    state.objects.insert(
                        oid,
                        VsObject {
                            object_type,
                            attrs: attrs.to_vec(),
                        },
                    );
                    oid
                }),
        };

        let status = status_of(&result);
        let oid = result.as_ref().copied().unwrap_or(0);
        state.record(op, oid, attrs, status);
        debug!("vs: {} -> {} oid:0x{:x}", op, status, oid);
        result
    }

    fn remove_object(&self, object_type: SaiObjectType, oid: RawSaiObjectId) -> SaiResult<()> {
        let mut state = self.state.lock();
        let op = SaiOp::Remove(object_type);

        let result = match state.take_fault(op) {
            Some(FaultAction::Fail(status)) => Err(SaiError::from_status(status)),
            _ => match state.objects.get(&oid) {
                None => Err(SaiStatus::ItemNotFound.into()),
                Some(obj) if obj.object_type != object_type => {
                    Err(SaiStatus::InvalidObjectType.into())
                }
                Some(_) if state.is_referenced(oid) => Err(SaiStatus::ObjectInUse.into()),
                Some(_) => {
                    state.objects.remove(&oid);
                    Ok(())
                }
            },
        };

        let status = status_of(&result);
        state.record(op, oid, &[], status);
        if status.is_error() {
            warn!("vs: {} oid:0x{:x} -> {}", op, oid, status);
        }
        result
    }

    fn set_attribute(
        &self,
        object_type: SaiObjectType,
        oid: RawSaiObjectId,
        attr: &SaiAttribute,
    ) -> SaiResult<()> {
        let mut state = self.state.lock();
        let op = SaiOp::Set(object_type);

        let result = match state.take_fault(op) {
            Some(FaultAction::Fail(status)) => Err(SaiError::from_status(status)),
            _ if object_type != SaiObjectType::Switch => Err(SaiStatus::NotSupported.into()),
            _ => self.check_switch(oid).and_then(|_| {
                if attr.id.object_type() != SaiObjectType::Switch {
                    return Err(SaiStatus::InvalidAttribute.into());
                }
                match &attr.value {
                    SaiAttrValue::Oid(0) => Ok(()),
                    SaiAttrValue::Oid(hash) => state
                        .object_of_type(*hash, SaiObjectType::Hash)
                        .map(|_| ()),
                    _ => Err(SaiStatus::InvalidParameter.into()),
                }?;
                state.switch_attrs.insert(attr.id, attr.value.clone());
                Ok(())
            }),
        };

        let status = status_of(&result);
        state.record(op, oid, std::slice::from_ref(attr), status);
        debug!("vs: {} {} -> {}", op, attr, status);
        result
    }
}

fn status_of<T>(result: &SaiResult<T>) -> SaiStatus {
    match result {
        Ok(_) => SaiStatus::Success,
        Err(e) => e.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn switch() -> SwitchOid {
        SwitchOid::from_raw(VirtualSwitch::DEFAULT_SWITCH_ID).unwrap()
    }

    fn hash_group_attrs() -> Vec<SaiAttribute> {
        vec![SaiAttribute::new(
            SaiAttrId::UdfGroupType,
            SaiAttrValue::S32(UdfGroupType::Hash.as_raw()),
        )]
    }

    #[test]
    fn test_oid_encodes_object_type() {
        let vs = VirtualSwitch::new();
        let oid = vs
            .create_object(SaiObjectType::UdfMatch, switch(), &[])
            .unwrap();
        assert_eq!(oid >> 48, SaiObjectType::UdfMatch.as_raw() as u64);
        assert_eq!(vs.objects_of(SaiObjectType::UdfMatch), vec![oid]);
    }

    #[test]
    fn test_wrong_switch_rejected() {
        let vs = VirtualSwitch::new();
        let other = SwitchOid::from_raw(0x21_0000_0000_0002).unwrap();
        let err = vs
            .create_object(SaiObjectType::UdfGroup, other, &[])
            .unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidObjectId);
        assert_eq!(vs.object_count(), 0);
    }

    #[test]
    fn test_udf_requires_existing_references() {
        let vs = VirtualSwitch::new();
        let attrs = vec![
            SaiAttribute::new(SaiAttrId::UdfMatchId, SaiAttrValue::Oid(0x1e_0000_0000_0042)),
            SaiAttribute::new(SaiAttrId::UdfGroupId, SaiAttrValue::Oid(0x1f_0000_0000_0042)),
            SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8)),
        ];
        let err = vs.create_object(SaiObjectType::Udf, switch(), &attrs).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidObjectId);
    }

    #[test]
    fn test_attribute_of_other_object_type_rejected() {
        let vs = VirtualSwitch::new();
        let attrs = vec![SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8))];
        let err = vs
            .create_object(SaiObjectType::UdfMatch, switch(), &attrs)
            .unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidAttribute);
        assert_eq!(vs.object_count(), 0);

        let set = SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8));
        let err = vs
            .set_attribute(SaiObjectType::Switch, vs.switch_id(), &set)
            .unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidAttribute);
    }

    #[test]
    fn test_udf_missing_offset() {
        let vs = VirtualSwitch::new();
        let m = vs.create_object(SaiObjectType::UdfMatch, switch(), &[]).unwrap();
        let g = vs
            .create_object(SaiObjectType::UdfGroup, switch(), &hash_group_attrs())
            .unwrap();
        let attrs = vec![
            SaiAttribute::new(SaiAttrId::UdfMatchId, SaiAttrValue::Oid(m)),
            SaiAttribute::new(SaiAttrId::UdfGroupId, SaiAttrValue::Oid(g)),
        ];
        let err = vs.create_object(SaiObjectType::Udf, switch(), &attrs).unwrap_err();
        assert_eq!(err.status(), SaiStatus::MandatoryAttributeMissing);
    }

    #[test]
    fn test_udf_length_must_match_group_length() {
        let vs = VirtualSwitch::new();
        let m = vs.create_object(SaiObjectType::UdfMatch, switch(), &[]).unwrap();
        let mut group_attrs = hash_group_attrs();
        group_attrs.push(SaiAttribute::new(SaiAttrId::UdfGroupLength, SaiAttrValue::U16(2)));
        let g = vs
            .create_object(SaiObjectType::UdfGroup, switch(), &group_attrs)
            .unwrap();
        let attrs = vec![
            SaiAttribute::new(SaiAttrId::UdfMatchId, SaiAttrValue::Oid(m)),
            SaiAttribute::new(SaiAttrId::UdfGroupId, SaiAttrValue::Oid(g)),
            SaiAttribute::new(SaiAttrId::UdfOffset, SaiAttrValue::U16(8)),
            SaiAttribute::new(SaiAttrId::UdfLength, SaiAttrValue::U16(1)),
        ];
        let err = vs.create_object(SaiObjectType::Udf, switch(), &attrs).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidParameter);
    }

    #[test]
    fn test_hash_rejects_generic_group() {
        let vs = VirtualSwitch::new();
        let g = vs.create_object(SaiObjectType::UdfGroup, switch(), &[]).unwrap();
        let attrs = vec![SaiAttribute::new(
            SaiAttrId::HashUdfGroupList,
            SaiAttrValue::OidList(vec![g]),
        )];
        let err = vs.create_object(SaiObjectType::Hash, switch(), &attrs).unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidParameter);
    }

    #[test]
    fn test_referenced_object_cannot_be_removed() {
        let vs = VirtualSwitch::new();
        let g = vs
            .create_object(SaiObjectType::UdfGroup, switch(), &hash_group_attrs())
            .unwrap();
        let h = vs
            .create_object(
                SaiObjectType::Hash,
                switch(),
                &[SaiAttribute::new(
                    SaiAttrId::HashUdfGroupList,
                    SaiAttrValue::OidList(vec![g]),
                )],
            )
            .unwrap();

        let err = vs.remove_object(SaiObjectType::UdfGroup, g).unwrap_err();
        assert_eq!(err.status(), SaiStatus::ObjectInUse);

        let bind = SaiAttribute::new(SaiAttrId::SwitchEcmpHash, SaiAttrValue::Oid(h));
        vs.set_attribute(SaiObjectType::Switch, vs.switch_id(), &bind)
            .unwrap();
        let err = vs.remove_object(SaiObjectType::Hash, h).unwrap_err();
        assert_eq!(err.status(), SaiStatus::ObjectInUse);

        let unbind = SaiAttribute::new(SaiAttrId::SwitchEcmpHash, SaiAttrValue::Oid(0));
        vs.set_attribute(SaiObjectType::Switch, vs.switch_id(), &unbind)
            .unwrap();
        vs.remove_object(SaiObjectType::Hash, h).unwrap();
        vs.remove_object(SaiObjectType::UdfGroup, g).unwrap();
        assert_eq!(vs.object_count(), 0);
    }

    #[test]
    fn test_remove_wrong_type_and_missing() {
        let vs = VirtualSwitch::new();
        let m = vs.create_object(SaiObjectType::UdfMatch, switch(), &[]).unwrap();
        assert_eq!(
            vs.remove_object(SaiObjectType::Udf, m).unwrap_err().status(),
            SaiStatus::InvalidObjectType
        );
        assert_eq!(
            vs.remove_object(SaiObjectType::Udf, 0x1d_0000_0000_0099)
                .unwrap_err()
                .status(),
            SaiStatus::ItemNotFound
        );
    }

    #[test]
    fn test_fault_on_op_fires_once() {
        let vs = VirtualSwitch::new();
        vs.fail_on(SaiOp::Create(SaiObjectType::UdfGroup), SaiStatus::TableFull);

        let err = vs
            .create_object(SaiObjectType::UdfGroup, switch(), &[])
            .unwrap_err();
        assert_eq!(err.status(), SaiStatus::TableFull);
        assert!(vs.create_object(SaiObjectType::UdfGroup, switch(), &[]).is_ok());
    }

    #[test]
    fn test_fault_on_mutating_index_skips_queries() {
        let vs = VirtualSwitch::new();
        vs.fail_mutating_call(1, SaiStatus::NoMemory);

        vs.api_initialize(&ServiceProfile::new()).unwrap();
        vs.api_query(SaiApiKind::Udf).unwrap();
        vs.create_object(SaiObjectType::UdfMatch, switch(), &[]).unwrap();
        let err = vs
            .create_object(SaiObjectType::UdfGroup, switch(), &[])
            .unwrap_err();
        assert_eq!(err.status(), SaiStatus::NoMemory);
    }

    #[test]
    fn test_null_oid_fault() {
        let vs = VirtualSwitch::new();
        vs.null_oid_on(SaiOp::Create(SaiObjectType::Hash));
        assert_eq!(vs.create_object(SaiObjectType::Hash, switch(), &[]).unwrap(), 0);
        assert_eq!(vs.object_count(), 0);
    }

    #[test]
    fn test_query_requires_initialize() {
        let vs = VirtualSwitch::new();
        assert_eq!(
            vs.api_query(SaiApiKind::Hash).unwrap_err(),
            SaiError::Uninitialized
        );

        let profile = ServiceProfile::new().with_value("SAI_VS_SWITCH_TYPE", "SAI_VS_SWITCH_TYPE_BCM56850");
        vs.api_initialize(&profile).unwrap();
        assert!(vs.is_initialized());
        assert_eq!(vs.profile(), Some(profile.clone()));
        assert!(vs.api_query(SaiApiKind::Hash).is_ok());

        // second initialize is refused
        assert!(vs.api_initialize(&profile).is_err());
    }

    #[test]
    fn test_journal_records_calls() {
        let vs = VirtualSwitch::new();
        let m = vs.create_object(SaiObjectType::UdfMatch, switch(), &[]).unwrap();
        vs.remove_object(SaiObjectType::UdfMatch, m).unwrap();

        let journal = vs.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].oid, m);
        assert_eq!(journal[1].op, SaiOp::Remove(SaiObjectType::UdfMatch));
        assert_eq!(journal[1].status, SaiStatus::Success);
        assert_eq!(
            vs.ops(),
            vec![
                SaiOp::Create(SaiObjectType::UdfMatch),
                SaiOp::Remove(SaiObjectType::UdfMatch)
            ]
        );
    }
}
