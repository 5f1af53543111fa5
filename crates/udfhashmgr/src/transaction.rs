//! The UDF hash provisioning transaction.
//!
//! Creates the UDF match, UDF group, UDF and hash objects in dependency
//! order, then binds the hash to a switch hash attribute. Every acquired
//! object is pushed onto an unwind stack; when a step fails, the stack is
//! drained from the top so objects are removed in reverse creation order.
//! A failed removal is recorded and the unwind moves on.
//!
//! The switch binding is written without reading the previous value and is
//! never restored.

use crate::audit::{AuditCategory, AuditOutcome, AuditRecord};
use crate::descriptor::{switch_hash_binding, DescriptorError, HashBindTarget, ProvisioningPlan};
use crate::error::{RemovalFailure, UdfHashError};
use crate::{audit_log, debug_log, error_log, info_log, warn_log};
use serde::Serialize;
use sonic_sai::api::{HashApi, SaiApi, SwitchApi, UdfApi};
use sonic_sai::attr::{SaiAttrValue, SaiAttribute};
use sonic_sai::{
    HashOid, RawSaiObjectId, SaiError, SaiObjectType, SaiStatus, SwitchOid, UdfGroupOid,
    UdfMatchOid, UdfOid,
};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

const SOURCE: &str = "UdfHashTransaction";

/// The five provisioning steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStep {
    CreateUdfMatch,
    CreateUdfGroup,
    CreateUdf,
    CreateHash,
    BindHash,
}

impl ProvisioningStep {
    pub const ALL: [ProvisioningStep; 5] = [
        ProvisioningStep::CreateUdfMatch,
        ProvisioningStep::CreateUdfGroup,
        ProvisioningStep::CreateUdf,
        ProvisioningStep::CreateHash,
        ProvisioningStep::BindHash,
    ];

    /// 1-based step number.
    pub const fn number(&self) -> u8 {
        match self {
            ProvisioningStep::CreateUdfMatch => 1,
            ProvisioningStep::CreateUdfGroup => 2,
            ProvisioningStep::CreateUdf => 3,
            ProvisioningStep::CreateHash => 4,
            ProvisioningStep::BindHash => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == number)
    }

    /// Object type the step creates, or the switch for the binding.
    pub const fn resource(&self) -> SaiObjectType {
        match self {
            ProvisioningStep::CreateUdfMatch => SaiObjectType::UdfMatch,
            ProvisioningStep::CreateUdfGroup => SaiObjectType::UdfGroup,
            ProvisioningStep::CreateUdf => SaiObjectType::Udf,
            ProvisioningStep::CreateHash => SaiObjectType::Hash,
            ProvisioningStep::BindHash => SaiObjectType::Switch,
        }
    }

    /// SAI call name, used as the audit action.
    pub const fn action(&self) -> &'static str {
        match self {
            ProvisioningStep::CreateUdfMatch => "create_udf_match",
            ProvisioningStep::CreateUdfGroup => "create_udf_group",
            ProvisioningStep::CreateUdf => "create_udf",
            ProvisioningStep::CreateHash => "create_hash",
            ProvisioningStep::BindHash => "set_switch_attribute",
        }
    }

    /// State reached when this step succeeds.
    const fn completed_state(&self) -> TransactionState {
        match self {
            ProvisioningStep::CreateUdfMatch => TransactionState::MatcherCreated,
            ProvisioningStep::CreateUdfGroup => TransactionState::GroupCreated,
            ProvisioningStep::CreateUdf => TransactionState::ExtractorCreated,
            ProvisioningStep::CreateHash => TransactionState::HashCreated,
            ProvisioningStep::BindHash => TransactionState::Bound,
        }
    }

    fn failure(&self, status: SaiStatus) -> UdfHashError {
        match self {
            ProvisioningStep::BindHash => UdfHashError::Binding { status },
            step => UdfHashError::ResourceCreation {
                resource: step.resource(),
                status,
            },
        }
    }
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Transaction progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    MatcherCreated,
    GroupCreated,
    ExtractorCreated,
    HashCreated,
    Bound,
    Failed {
        step: ProvisioningStep,
        status: SaiStatus,
    },
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Bound | TransactionState::Failed { .. })
    }
}

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: ProvisioningStep,
    pub status: SaiStatus,
    /// Created OID, or the bound hash for the binding step.
    pub oid: Option<RawSaiObjectId>,
}

/// An object created during the attempt and not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcquiredObject {
    UdfMatch(UdfMatchOid),
    UdfGroup(UdfGroupOid),
    Udf(UdfOid),
    Hash(HashOid),
}

impl AcquiredObject {
    fn object_type(&self) -> SaiObjectType {
        match self {
            AcquiredObject::UdfMatch(oid) => oid.object_type(),
            AcquiredObject::UdfGroup(oid) => oid.object_type(),
            AcquiredObject::Udf(oid) => oid.object_type(),
            AcquiredObject::Hash(oid) => oid.object_type(),
        }
    }

    fn raw(&self) -> RawSaiObjectId {
        match self {
            AcquiredObject::UdfMatch(oid) => oid.as_raw(),
            AcquiredObject::UdfGroup(oid) => oid.as_raw(),
            AcquiredObject::Udf(oid) => oid.as_raw(),
            AcquiredObject::Hash(oid) => oid.as_raw(),
        }
    }

    fn remove<A: SaiApi + ?Sized>(&self, api: &A, switch_id: SwitchOid) -> Result<(), SaiError> {
        match *self {
            AcquiredObject::UdfMatch(oid) => UdfApi::new(api, switch_id).remove_udf_match(oid),
            AcquiredObject::UdfGroup(oid) => UdfApi::new(api, switch_id).remove_udf_group(oid),
            AcquiredObject::Udf(oid) => UdfApi::new(api, switch_id).remove_udf(oid),
            AcquiredObject::Hash(oid) => HashApi::new(api, switch_id).remove_hash(oid),
        }
    }
}

/// Objects removed and removals that failed while unwinding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnwindReport {
    pub removed: Vec<(SaiObjectType, RawSaiObjectId)>,
    pub failures: Vec<RemovalFailure>,
}

/// Removes `stack` from the top down, continuing past failures.
fn unwind<A: SaiApi + ?Sized>(
    api: &A,
    switch_id: SwitchOid,
    mut stack: Vec<AcquiredObject>,
    correlation_id: &str,
) -> UnwindReport {
    let mut report = UnwindReport::default();

    while let Some(object) = stack.pop() {
        let object_type = object.object_type();
        let oid = object.raw();
        let action = format!("remove_{}", object_type.name());

        match object.remove(api, switch_id) {
            Ok(()) => {
                debug_log!(SOURCE, object_type = %object_type, oid = %format!("0x{:x}", oid), "removed");
                audit_log!(AuditRecord::new(AuditCategory::ResourceDelete, SOURCE, action)
                    .with_outcome(AuditOutcome::Success)
                    .with_object_id(format!("0x{:x}", oid))
                    .with_object_type(object_type.name())
                    .with_correlation_id(correlation_id));
                report.removed.push((object_type, oid));
            }
            Err(e) => {
                let failure = RemovalFailure {
                    resource: object_type,
                    oid,
                    status: e.status(),
                };
                warn_log!(SOURCE, error = %e, "{}", failure);
                audit_log!(AuditRecord::new(AuditCategory::ResourceDelete, SOURCE, action)
                    .with_object_id(format!("0x{:x}", oid))
                    .with_object_type(object_type.name())
                    .with_correlation_id(correlation_id)
                    .with_error(failure.status.to_string()));
                report.failures.push(failure);
            }
        }
    }

    report
}

/// A failed provisioning attempt, after the unwind.
#[derive(Debug, Error)]
#[error("step {} ({}) failed: {}", .step.number(), .step, .error)]
pub struct ProvisionFailure {
    pub step: ProvisioningStep,
    /// Always `Failed { step, status }`.
    pub state: TransactionState,
    #[source]
    pub error: UdfHashError,
    pub correlation_id: String,
    pub steps: Vec<StepRecord>,
    pub unwind: UnwindReport,
}

impl ProvisionFailure {
    /// SAI status of the triggering failure.
    pub fn status(&self) -> SaiStatus {
        self.error.status().unwrap_or(SaiStatus::InvalidParameter)
    }
}

/// Objects left in place by a successful attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedObjects {
    pub switch_id: SwitchOid,
    pub bind_target: HashBindTarget,
    pub udf_match: UdfMatchOid,
    pub udf_group: UdfGroupOid,
    pub udf: UdfOid,
    pub hash: HashOid,
    /// Always `Bound`.
    pub state: TransactionState,
    pub correlation_id: String,
    pub steps: Vec<StepRecord>,
}

impl ProvisionedObjects {
    /// Clears the switch binding and removes all four objects, hash first.
    ///
    /// The binding is reset to the null OID, not to whatever it held before
    /// provisioning. Failures are collected and do not stop the teardown.
    pub fn teardown<A: SaiApi + ?Sized>(&self, api: &A) -> Vec<RemovalFailure> {
        let mut failures = Vec::new();

        let unbind = SaiAttribute::new(self.bind_target.attr_id(), SaiAttrValue::Oid(0));
        match SwitchApi::new(api, self.switch_id).set_switch_attribute(&unbind) {
            Ok(()) => {
                info_log!(SOURCE, attribute = %self.bind_target, "hash unbound from switch");
            }
            Err(e) => {
                warn_log!(SOURCE, attribute = %self.bind_target, error = %e, "failed to unbind hash");
                failures.push(RemovalFailure {
                    resource: SaiObjectType::Switch,
                    oid: self.switch_id.as_raw(),
                    status: e.status(),
                });
            }
        }

        let stack = vec![
            AcquiredObject::UdfMatch(self.udf_match),
            AcquiredObject::UdfGroup(self.udf_group),
            AcquiredObject::Udf(self.udf),
            AcquiredObject::Hash(self.hash),
        ];
        let report = unwind(api, self.switch_id, stack, &self.correlation_id);
        failures.extend(report.failures);
        failures
    }
}

/// One provisioning attempt against one switch.
pub struct UdfHashTransaction<'a, A: SaiApi + ?Sized> {
    api: &'a A,
    plan: &'a ProvisioningPlan,
    state: TransactionState,
    acquired: Vec<AcquiredObject>,
    steps: Vec<StepRecord>,
    correlation_id: String,
}

impl<'a, A: SaiApi + ?Sized> UdfHashTransaction<'a, A> {
    pub fn new(plan: &'a ProvisioningPlan, api: &'a A) -> Self {
        Self {
            api,
            plan,
            state: TransactionState::Idle,
            acquired: Vec::new(),
            steps: Vec::new(),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Runs `plan` against `api` to completion.
    pub fn run(
        plan: &'a ProvisioningPlan,
        api: &'a A,
    ) -> Result<ProvisionedObjects, ProvisionFailure> {
        Self::new(plan, api).execute()
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Executes all five steps, unwinding on the first failure.
    pub fn execute(mut self) -> Result<ProvisionedObjects, ProvisionFailure> {
        info_log!(
            SOURCE,
            switch_id = %self.plan.switch_id,
            correlation_id = %self.correlation_id,
            "starting UDF hash provisioning"
        );

        match self.provision() {
            Ok(objects) => {
                info_log!(
                    SOURCE,
                    hash = %objects.hash,
                    attribute = %objects.bind_target,
                    "UDF hash provisioned"
                );
                Ok(objects)
            }
            Err((step, error)) => Err(self.fail(step, error)),
        }
    }

    fn provision(&mut self) -> Result<ProvisionedObjects, (ProvisioningStep, UdfHashError)> {
        let switch_id = self.plan.switch_id;
        let udf_api = UdfApi::new(self.api, switch_id);
        let hash_api = HashApi::new(self.api, switch_id);

        let match_attrs = self.plan.udf_match.attributes();
        let udf_match = self.create(ProvisioningStep::CreateUdfMatch, &match_attrs, || {
            udf_api.create_udf_match(&match_attrs)
        })?;
        self.acquired.push(AcquiredObject::UdfMatch(udf_match));

        let group_attrs = self.plan.udf_group.attributes();
        let udf_group = self.create(ProvisioningStep::CreateUdfGroup, &group_attrs, || {
            udf_api.create_udf_group(&group_attrs)
        })?;
        self.acquired.push(AcquiredObject::UdfGroup(udf_group));

        let udf_attrs = self
            .plan
            .udf
            .attributes(udf_match, udf_group)
            .map_err(|e| self.descriptor_failure(ProvisioningStep::CreateUdf, e))?;
        let udf = self.create(ProvisioningStep::CreateUdf, &udf_attrs, || {
            udf_api.create_udf(&udf_attrs)
        })?;
        self.acquired.push(AcquiredObject::Udf(udf));

        let hash_attrs = self
            .plan
            .hash
            .attributes(&[udf_group])
            .map_err(|e| self.descriptor_failure(ProvisioningStep::CreateHash, e))?;
        let hash = self.create(ProvisioningStep::CreateHash, &hash_attrs, || {
            hash_api.create_hash(&hash_attrs)
        })?;
        self.acquired.push(AcquiredObject::Hash(hash));

        self.bind(hash)?;

        // Committed: nothing is unwound from here on.
        self.acquired.clear();
        Ok(ProvisionedObjects {
            switch_id,
            bind_target: self.plan.bind_target,
            udf_match,
            udf_group,
            udf,
            hash,
            state: self.state,
            correlation_id: self.correlation_id.clone(),
            steps: std::mem::take(&mut self.steps),
        })
    }

    fn create<T, F>(
        &mut self,
        step: ProvisioningStep,
        attrs: &[SaiAttribute],
        call: F,
    ) -> Result<sonic_sai::SaiObjectId<T>, (ProvisioningStep, UdfHashError)>
    where
        T: sonic_sai::SaiObjectKind,
        F: FnOnce() -> Result<sonic_sai::SaiObjectId<T>, SaiError>,
    {
        debug_log!(
            SOURCE,
            step = step.number(),
            attrs = %format_attrs(attrs),
            "{}",
            step
        );

        match call() {
            Ok(oid) => {
                let oid_str = format!("0x{:x}", oid.as_raw());
                audit_log!(AuditRecord::new(AuditCategory::ResourceCreate, SOURCE, step.action())
                    .with_outcome(AuditOutcome::Success)
                    .with_object_id(oid_str.clone())
                    .with_object_type(step.resource().name())
                    .with_correlation_id(&self.correlation_id)
                    .with_details(serde_json::json!({ "attributes": format_attrs(attrs) })));
                info_log!(SOURCE, step = step.number(), oid = %oid_str, "{} succeeded", step);

                self.steps.push(StepRecord {
                    step,
                    status: SaiStatus::Success,
                    oid: Some(oid.as_raw()),
                });
                self.state = step.completed_state();
                Ok(oid)
            }
            Err(e) => Err(self.sai_failure(step, e)),
        }
    }

    fn bind(&mut self, hash: HashOid) -> Result<(), (ProvisioningStep, UdfHashError)> {
        let step = ProvisioningStep::BindHash;
        let attr = switch_hash_binding(self.plan.bind_target, hash)
            .map_err(|e| self.descriptor_failure(step, e))?;

        debug_log!(SOURCE, step = step.number(), attr = %attr, "{}", step);

        match SwitchApi::new(self.api, self.plan.switch_id).set_switch_attribute(&attr) {
            Ok(()) => {
                audit_log!(AuditRecord::new(AuditCategory::ResourceModify, SOURCE, step.action())
                    .with_outcome(AuditOutcome::Success)
                    .with_object_id(format!("0x{:x}", self.plan.switch_id.as_raw()))
                    .with_object_type(SaiObjectType::Switch.name())
                    .with_correlation_id(&self.correlation_id)
                    .with_details(serde_json::json!({
                        "attribute": self.plan.bind_target.attr_id().name(),
                        "hash": format!("0x{:x}", hash.as_raw()),
                    })));
                info_log!(SOURCE, attribute = %self.plan.bind_target, "hash bound to switch");

                self.steps.push(StepRecord {
                    step,
                    status: SaiStatus::Success,
                    oid: Some(hash.as_raw()),
                });
                self.state = step.completed_state();
                Ok(())
            }
            Err(e) => Err(self.sai_failure(step, e)),
        }
    }

    fn sai_failure(&mut self, step: ProvisioningStep, e: SaiError) -> (ProvisioningStep, UdfHashError) {
        let status = e.status();
        error_log!(SOURCE, step = step.number(), error = %e, "{} failed: {}", step, status.label());
        audit_log!(AuditRecord::new(AuditCategory::ErrorCondition, SOURCE, step.action())
            .with_object_type(step.resource().name())
            .with_correlation_id(&self.correlation_id)
            .with_error(e.to_string()));

        self.steps.push(StepRecord {
            step,
            status,
            oid: None,
        });
        (step, step.failure(status))
    }

    fn descriptor_failure(
        &mut self,
        step: ProvisioningStep,
        e: DescriptorError,
    ) -> (ProvisioningStep, UdfHashError) {
        error_log!(SOURCE, step = step.number(), error = %e, "{} not attempted", step);
        self.steps.push(StepRecord {
            step,
            status: SaiStatus::InvalidParameter,
            oid: None,
        });
        (step, UdfHashError::Descriptor(e))
    }

    fn fail(mut self, step: ProvisioningStep, error: UdfHashError) -> ProvisionFailure {
        let status = error.status().unwrap_or(SaiStatus::InvalidParameter);
        self.state = TransactionState::Failed { step, status };

        let stack = std::mem::take(&mut self.acquired);
        warn_log!(
            SOURCE,
            step = step.number(),
            pending = stack.len(),
            "unwinding UDF hash provisioning"
        );
        let report = unwind(self.api, self.plan.switch_id, stack, &self.correlation_id);

        if !report.failures.is_empty() {
            warn_log!(
                SOURCE,
                failures = report.failures.len(),
                "unwind left objects behind"
            );
        }

        ProvisionFailure {
            step,
            state: self.state,
            error,
            correlation_id: self.correlation_id,
            steps: self.steps,
            unwind: report,
        }
    }
}

fn format_attrs(attrs: &[SaiAttribute]) -> String {
    attrs
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sonic_sai::api::ServiceProfile;
    use sonic_sai::attr::SaiAttrId;
    use sonic_sai::vs::{SaiOp, VirtualSwitch};

    fn setup() -> (VirtualSwitch, ProvisioningPlan) {
        let vs = VirtualSwitch::new();
        vs.api_initialize(&ServiceProfile::new()).unwrap();
        let switch_id = SwitchOid::from_raw(vs.switch_id()).unwrap();
        (vs, ProvisioningPlan::ipv4_ttl(switch_id))
    }

    fn mutating_ops(vs: &VirtualSwitch) -> Vec<SaiOp> {
        vs.ops().into_iter().filter(|op| op.is_mutating()).collect()
    }

    #[test]
    fn test_step_numbering() {
        let numbers: Vec<u8> = ProvisioningStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(ProvisioningStep::from_number(3), Some(ProvisioningStep::CreateUdf));
        assert_eq!(ProvisioningStep::from_number(6), None);
        assert_eq!(ProvisioningStep::CreateUdf.resource(), SaiObjectType::Udf);
        assert_eq!(ProvisioningStep::BindHash.to_string(), "set_switch_attribute");
    }

    #[test]
    fn test_state_advances_to_bound() {
        let (vs, plan) = setup();
        let txn = UdfHashTransaction::new(&plan, &vs);
        assert_eq!(txn.state(), TransactionState::Idle);
        assert!(!txn.state().is_terminal());

        let objects = txn.execute().unwrap();
        assert_eq!(objects.state, TransactionState::Bound);
        assert!(objects.state.is_terminal());
        assert_eq!(objects.steps.len(), 5);
        assert!(objects.steps.iter().all(|s| s.status == SaiStatus::Success));
        assert_eq!(
            vs.switch_attribute(SaiAttrId::SwitchEcmpHash),
            Some(SaiAttrValue::Oid(objects.hash.as_raw()))
        );
    }

    #[test]
    fn test_failure_state_records_step_and_status() {
        let (vs, plan) = setup();
        vs.fail_on(SaiOp::Create(SaiObjectType::Hash), SaiStatus::InsufficientResources);

        let failure = UdfHashTransaction::run(&plan, &vs).unwrap_err();
        assert_eq!(failure.step, ProvisioningStep::CreateHash);
        assert_eq!(failure.status(), SaiStatus::InsufficientResources);
        assert_eq!(
            failure.state,
            TransactionState::Failed {
                step: ProvisioningStep::CreateHash,
                status: SaiStatus::InsufficientResources,
            }
        );
        assert!(matches!(
            failure.error,
            UdfHashError::ResourceCreation {
                resource: SaiObjectType::Hash,
                ..
            }
        ));
        assert_eq!(
            failure.to_string(),
            "step 4 (create_hash) failed: Failed to create hash: SAI_STATUS_INSUFFICIENT_RESOURCES"
        );
    }

    #[test]
    fn test_unwind_reverses_acquisition_order() {
        let (vs, plan) = setup();
        vs.fail_on(SaiOp::Create(SaiObjectType::Hash), SaiStatus::Failure);

        let failure = UdfHashTransaction::run(&plan, &vs).unwrap_err();
        let removed: Vec<SaiObjectType> = failure.unwind.removed.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            removed,
            vec![
                SaiObjectType::Udf,
                SaiObjectType::UdfGroup,
                SaiObjectType::UdfMatch
            ]
        );
        assert_eq!(vs.object_count(), 0);
    }

    #[test]
    fn test_null_oid_treated_as_failure() {
        let (vs, plan) = setup();
        vs.null_oid_on(SaiOp::Create(SaiObjectType::UdfGroup));

        let failure = UdfHashTransaction::run(&plan, &vs).unwrap_err();
        assert_eq!(failure.step, ProvisioningStep::CreateUdfGroup);
        assert_eq!(failure.status(), SaiStatus::Failure);
        // Only the match was acquired; the null group is never removed.
        assert_eq!(
            mutating_ops(&vs),
            vec![
                SaiOp::Create(SaiObjectType::UdfMatch),
                SaiOp::Create(SaiObjectType::UdfGroup),
                SaiOp::Remove(SaiObjectType::UdfMatch),
            ]
        );
    }

    #[test]
    fn test_teardown_unbinds_then_removes() {
        let (vs, plan) = setup();
        let objects = UdfHashTransaction::run(&plan, &vs).unwrap();
        let before = vs.ops().len();

        let failures = objects.teardown(&vs);
        assert!(failures.is_empty());
        assert_eq!(vs.object_count(), 0);
        assert_eq!(
            vs.switch_attribute(SaiAttrId::SwitchEcmpHash),
            Some(SaiAttrValue::Oid(0))
        );
        assert_eq!(
            vs.ops()[before..].to_vec(),
            vec![
                SaiOp::Set(SaiObjectType::Switch),
                SaiOp::Remove(SaiObjectType::Hash),
                SaiOp::Remove(SaiObjectType::Udf),
                SaiOp::Remove(SaiObjectType::UdfGroup),
                SaiOp::Remove(SaiObjectType::UdfMatch),
            ]
        );
    }

    #[test]
    fn test_teardown_without_unbind_reports_object_in_use() {
        let (vs, plan) = setup();
        let objects = UdfHashTransaction::run(&plan, &vs).unwrap();
        vs.fail_on_nth(SaiOp::Set(SaiObjectType::Switch), 1, SaiStatus::Failure);

        let failures = objects.teardown(&vs);
        let statuses: Vec<(SaiObjectType, SaiStatus)> =
            failures.iter().map(|f| (f.resource, f.status)).collect();
        // The hash stays bound, so it and the group it references remain.
        assert_eq!(
            statuses,
            vec![
                (SaiObjectType::Switch, SaiStatus::Failure),
                (SaiObjectType::Hash, SaiStatus::ObjectInUse),
                (SaiObjectType::UdfGroup, SaiStatus::ObjectInUse),
            ]
        );
        assert_eq!(vs.object_count(), 2);
    }
}
