//! SAI bring-up before provisioning.
//!
//! Initializes the SAI with the service profile and acquires the UDF, hash
//! and switch API tables. Any failure here happens before an object exists,
//! so there is nothing to unwind.

use crate::audit::{AuditCategory, AuditOutcome, AuditRecord};
use crate::error::{UdfHashError, UdfHashResult};
use crate::{audit_log, debug_log, error_log, info_log};
use sonic_sai::api::{SaiApi, SaiApiKind, ServiceProfile};

const SOURCE: &str = "Bootstrap";

/// API tables needed for provisioning, in query order.
pub const REQUIRED_APIS: [SaiApiKind; 3] = [SaiApiKind::Udf, SaiApiKind::Hash, SaiApiKind::Switch];

/// Initializes the SAI and queries every table in [`REQUIRED_APIS`].
pub fn bootstrap<A: SaiApi + ?Sized>(api: &A, profile: &ServiceProfile) -> UdfHashResult<()> {
    debug_log!(SOURCE, profile_keys = profile.len(), "initializing SAI API");

    api.api_initialize(profile).map_err(|e| {
        let status = e.status();
        error_log!(SOURCE, error = %e, "sai_api_initialize failed");
        audit_log!(AuditRecord::new(AuditCategory::SaiOperation, SOURCE, "sai_api_initialize")
            .with_error(status.to_string()));
        UdfHashError::ApiInitialization { status }
    })?;

    for kind in REQUIRED_APIS {
        api.api_query(kind).map_err(|e| {
            let status = e.status();
            error_log!(SOURCE, api = %kind, error = %e, "sai_api_query failed");
            audit_log!(AuditRecord::new(AuditCategory::SaiOperation, SOURCE, "sai_api_query")
                .with_object_type(kind.to_string())
                .with_error(status.to_string()));
            UdfHashError::ApiQuery { api: kind, status }
        })?;
        debug_log!(SOURCE, api = %kind, "API table acquired");
    }

    audit_log!(AuditRecord::new(AuditCategory::SaiOperation, SOURCE, "sai_api_initialize")
        .with_outcome(AuditOutcome::Success)
        .with_details(serde_json::json!({
            "apis": REQUIRED_APIS.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
        })));
    info_log!(SOURCE, "SAI API ready");
    Ok(())
}
