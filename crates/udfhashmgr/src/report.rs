//! Console and JSON rendering of a provisioning run.
//!
//! Text output is one line per executed step, one line per rollback removal
//! and a closing summary. Status codes are shown by their short label
//! (`SUCCESS`, `INVALID_PARAMETER`, ...) or their number when unknown.

use crate::descriptor::{HashBindTarget, PlannedStep};
use crate::error::{RemovalFailure, UdfHashError};
use crate::transaction::{ProvisionFailure, ProvisionedObjects, ProvisioningStep, StepRecord};
use serde::{Serialize, Serializer};
use sonic_sai::{RawSaiObjectId, SaiObjectType, SaiStatus};

pub fn serialize_object_type<S: Serializer>(t: &SaiObjectType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(t.name())
}

pub fn serialize_oid<S: Serializer>(oid: &RawSaiObjectId, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("0x{:x}", oid))
}

pub fn serialize_status<S: Serializer>(status: &SaiStatus, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&status.label())
}

fn serialize_opt_oid<S: Serializer>(oid: &Option<RawSaiObjectId>, s: S) -> Result<S::Ok, S::Error> {
    match oid {
        Some(oid) => serialize_oid(oid, s),
        None => s.serialize_none(),
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub number: u8,
    pub step: ProvisioningStep,
    #[serde(serialize_with = "serialize_status")]
    pub status: SaiStatus,
    #[serde(
        serialize_with = "serialize_opt_oid",
        skip_serializing_if = "Option::is_none"
    )]
    pub oid: Option<RawSaiObjectId>,
}

impl From<&StepRecord> for StepReport {
    fn from(record: &StepRecord) -> Self {
        Self {
            number: record.step.number(),
            step: record.step,
            status: record.status,
            oid: record.oid,
        }
    }
}

/// An object removed during rollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedObject {
    #[serde(serialize_with = "serialize_object_type")]
    pub resource: SaiObjectType,
    #[serde(serialize_with = "serialize_oid")]
    pub oid: RawSaiObjectId,
}

/// Outcome of a whole run, as printed by udfhashmgr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub success: bool,
    #[serde(serialize_with = "serialize_oid")]
    pub switch_id: RawSaiObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<ProvisioningStep>,
    #[serde(
        serialize_with = "serialize_opt_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<SaiStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rolled_back: Vec<RemovedObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removal_failures: Vec<RemovalFailure>,
}

fn serialize_opt_status<S: Serializer>(status: &Option<SaiStatus>, s: S) -> Result<S::Ok, S::Error> {
    match status {
        Some(status) => serialize_status(status, s),
        None => s.serialize_none(),
    }
}

impl ProvisionReport {
    fn empty(switch_id: RawSaiObjectId, success: bool) -> Self {
        Self {
            success,
            switch_id,
            correlation_id: None,
            steps: Vec::new(),
            bound_to: None,
            failed_step: None,
            status: None,
            error: None,
            rolled_back: Vec::new(),
            removal_failures: Vec::new(),
        }
    }

    pub fn success(objects: &ProvisionedObjects) -> Self {
        Self {
            correlation_id: Some(objects.correlation_id.clone()),
            steps: objects.steps.iter().map(StepReport::from).collect(),
            bound_to: Some(objects.bind_target.to_string()),
            ..Self::empty(objects.switch_id.as_raw(), true)
        }
    }

    pub fn failure(switch_id: RawSaiObjectId, failure: &ProvisionFailure) -> Self {
        Self {
            correlation_id: Some(failure.correlation_id.clone()),
            steps: failure.steps.iter().map(StepReport::from).collect(),
            failed_step: Some(failure.step),
            status: Some(failure.status()),
            error: Some(failure.error.to_string()),
            rolled_back: failure
                .unwind
                .removed
                .iter()
                .map(|&(resource, oid)| RemovedObject { resource, oid })
                .collect(),
            removal_failures: failure.unwind.failures.clone(),
            ..Self::empty(switch_id, false)
        }
    }

    /// A run that stopped before the transaction started.
    pub fn aborted(switch_id: RawSaiObjectId, error: &UdfHashError) -> Self {
        Self {
            status: error.status(),
            error: Some(error.to_string()),
            ..Self::empty(switch_id, false)
        }
    }

    /// Hash OID bound by a successful run.
    pub fn bound_hash(&self) -> Option<RawSaiObjectId> {
        self.steps
            .iter()
            .find(|s| s.step == ProvisioningStep::BindHash && s.status.is_success())
            .and_then(|s| s.oid)
    }

    pub fn summary(&self) -> String {
        if self.success {
            let hash = self.bound_hash().unwrap_or(0);
            return format!(
                "UDF hash setup completed: hash 0x{:x} bound to {} on switch 0x{:x}",
                hash,
                self.bound_to.as_deref().unwrap_or(HashBindTarget::default().attr_id().name()),
                self.switch_id
            );
        }

        match (self.failed_step, self.status) {
            (Some(step), Some(status)) => format!(
                "UDF hash setup failed at step {} ({}): {}; rolled back {} object(s), {} removal failure(s)",
                step.number(),
                step,
                status.label(),
                self.rolled_back.len(),
                self.removal_failures.len()
            ),
            _ => format!(
                "UDF hash setup aborted: {}",
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = self.steps.iter().map(step_line).collect();
        lines.extend(self.rolled_back.iter().map(|r| {
            format!("rollback: remove {} 0x{:x}: {}", r.resource, r.oid, SaiStatus::Success.label())
        }));
        lines.extend(self.removal_failures.iter().map(|f| {
            format!("rollback: remove {} 0x{:x}: {}", f.resource, f.oid, f.status.label())
        }));
        lines.push(self.summary());
        lines.join("\n")
    }

    /// Process exit status: 0 when the hash is bound, 1 on any failure.
    pub fn exit_code(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// `[n/5] action: LABEL oid=0x...`
pub fn step_line(step: &StepReport) -> String {
    let mut line = format!(
        "[{}/{}] {}: {}",
        step.number,
        ProvisioningStep::ALL.len(),
        step.step,
        step.status.label()
    );
    if let Some(oid) = step.oid {
        line.push_str(&format!(" oid=0x{:x}", oid));
    }
    line
}

/// Dry-run listing of the attributes each step would send.
pub fn render_plan(steps: &[PlannedStep]) -> String {
    let mut out = Vec::new();
    for planned in steps {
        out.push(format!(
            "[{}/{}] {}",
            planned.step.number(),
            ProvisioningStep::ALL.len(),
            planned.step
        ));
        for attr in &planned.attributes {
            out.push(format!("    {}", attr));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::UnwindReport;
    use pretty_assertions::assert_eq;
    use sonic_sai::api::SaiApiKind;

    fn failed_at_udf() -> ProvisionFailure {
        ProvisionFailure {
            step: ProvisioningStep::CreateUdf,
            state: crate::transaction::TransactionState::Failed {
                step: ProvisioningStep::CreateUdf,
                status: SaiStatus::InvalidParameter,
            },
            error: UdfHashError::ResourceCreation {
                resource: SaiObjectType::Udf,
                status: SaiStatus::InvalidParameter,
            },
            correlation_id: "c0ffee".to_string(),
            steps: vec![
                StepRecord {
                    step: ProvisioningStep::CreateUdfMatch,
                    status: SaiStatus::Success,
                    oid: Some(0x1e_0000_0000_0001),
                },
                StepRecord {
                    step: ProvisioningStep::CreateUdfGroup,
                    status: SaiStatus::Success,
                    oid: Some(0x1f_0000_0000_0002),
                },
                StepRecord {
                    step: ProvisioningStep::CreateUdf,
                    status: SaiStatus::InvalidParameter,
                    oid: None,
                },
            ],
            unwind: UnwindReport {
                removed: vec![(SaiObjectType::UdfGroup, 0x1f_0000_0000_0002)],
                failures: vec![RemovalFailure {
                    resource: SaiObjectType::UdfMatch,
                    oid: 0x1e_0000_0000_0001,
                    status: SaiStatus::Other(-4242),
                }],
            },
        }
    }

    #[test]
    fn test_failure_text() {
        let report = ProvisionReport::failure(0x21_0000_0000_0000, &failed_at_udf());
        assert_eq!(
            report.render_text(),
            "[1/5] create_udf_match: SUCCESS oid=0x1e000000000001\n\
             [2/5] create_udf_group: SUCCESS oid=0x1f000000000002\n\
             [3/5] create_udf: INVALID_PARAMETER\n\
             rollback: remove udf_group 0x1f000000000002: SUCCESS\n\
             rollback: remove udf_match 0x1e000000000001: -4242\n\
             UDF hash setup failed at step 3 (create_udf): INVALID_PARAMETER; \
             rolled back 1 object(s), 1 removal failure(s)"
        );
    }

    #[test]
    fn test_failure_json() {
        let report = ProvisionReport::failure(0x21_0000_0000_0000, &failed_at_udf());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["switch_id"], "0x21000000000000");
        assert_eq!(json["failed_step"], "create_udf");
        assert_eq!(json["status"], "INVALID_PARAMETER");
        assert_eq!(json["steps"][0]["oid"], "0x1e000000000001");
        assert!(json["steps"][2].get("oid").is_none());
        assert_eq!(json["rolled_back"][0]["resource"], "udf_group");
        assert_eq!(json["removal_failures"][0]["status"], "-4242");
    }

    #[test]
    fn test_aborted_report() {
        let err = UdfHashError::ApiQuery {
            api: SaiApiKind::Udf,
            status: SaiStatus::NotSupported,
        };
        let report = ProvisionReport::aborted(0x21_0000_0000_0000, &err);
        assert!(!report.success);
        assert!(report.steps.is_empty());
        assert_eq!(
            report.summary(),
            "UDF hash setup aborted: SAI API query failed for SAI_API_UDF: SAI_STATUS_NOT_SUPPORTED"
        );
        let json = report.to_json().unwrap();
        assert!(json.contains("\"status\": \"NOT_SUPPORTED\""));
        assert!(!json.contains("rolled_back"));
    }

    #[test]
    fn test_exit_code() {
        let failed = ProvisionReport::failure(0x21_0000_0000_0000, &failed_at_udf());
        assert_eq!(failed.exit_code(), 1);

        let err = UdfHashError::Binding {
            status: SaiStatus::Failure,
        };
        assert_eq!(ProvisionReport::aborted(0x21_0000_0000_0000, &err).exit_code(), 1);

        let ok = ProvisionReport {
            success: true,
            ..ProvisionReport::aborted(0x21_0000_0000_0000, &err)
        };
        assert_eq!(ok.exit_code(), 0);
    }

    #[test]
    fn test_step_line() {
        let step = StepReport {
            number: 5,
            step: ProvisioningStep::BindHash,
            status: SaiStatus::Other(-99),
            oid: None,
        };
        assert_eq!(step_line(&step), "[5/5] set_switch_attribute: -99");
    }
}
