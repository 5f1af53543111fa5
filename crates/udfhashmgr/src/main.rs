//! udfhashmgr entry point.
//!
//! Loads the configuration, brings up the SAI, runs the UDF hash provisioning
//! transaction once, prints the report and exits 0 on success or 1 on any
//! failure. The SAI backend is the in-memory virtual switch; its fault
//! injection flags reproduce a failure at any of the five steps.

use clap::Parser;
use sonic_sai::vs::{SaiOp, VirtualSwitch};
use sonic_sai::{RawSaiObjectId, SaiObjectType, SaiStatus};
use sonic_udfhashmgr::audit::{init_logging, AuditCategory, AuditOutcome, AuditRecord, LogFormat};
use sonic_udfhashmgr::config::{parse_object_id, DEFAULT_CONFIG_PATH};
use sonic_udfhashmgr::report::render_plan;
use sonic_udfhashmgr::{
    audit_log, bootstrap, error_log, info_log, warn_log, OutputFormat, ProvisionReport,
    ProvisioningPlan, ProvisioningStep, UdfHashConfig, UdfHashError, UdfHashTransaction,
};
use std::path::PathBuf;
use std::process::ExitCode;

const SOURCE: &str = "udfhashmgr";

/// SONiC UDF hash manager
#[derive(Parser, Debug)]
#[command(name = "udfhashmgr")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults apply when omitted and /etc/sonic/udfhashmgr.toml is absent)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Switch OID, hex (0x...) or decimal; overrides the configuration
    #[arg(short = 's', long, value_parser = parse_object_id)]
    switch_id: Option<RawSaiObjectId>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Report format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Print the attribute lists without calling the SAI
    #[arg(long)]
    dry_run: bool,

    /// Virtual switch: fail step N (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    vs_fail_step: Option<u8>,

    /// Virtual switch: status returned by the failing step
    #[arg(long, default_value_t = -5, allow_negative_numbers = true, requires = "vs_fail_step")]
    vs_fail_status: i32,
}

fn load_config(args: &Args) -> Result<UdfHashConfig, UdfHashError> {
    let mut config = match &args.config {
        Some(path) => UdfHashConfig::load(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
            UdfHashConfig::load(DEFAULT_CONFIG_PATH)?
        }
        None => UdfHashConfig::default(),
    };
    if let Some(switch_id) = args.switch_id {
        config.switch.id = switch_id;
    }
    Ok(config)
}

fn fault_op(step: ProvisioningStep) -> SaiOp {
    match step {
        ProvisioningStep::BindHash => SaiOp::Set(SaiObjectType::Switch),
        step => SaiOp::Create(step.resource()),
    }
}

fn print_report(report: &ProvisionReport, format: OutputFormat) {
    match report.render(format) {
        Ok(out) => println!("{}", out),
        Err(e) => error_log!(SOURCE, error = %e, "failed to render report"),
    }
}

fn finish(report: &ProvisionReport, format: OutputFormat) -> ExitCode {
    print_report(report, format);
    let outcome = if report.success {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };
    audit_log!(AuditRecord::new(AuditCategory::SystemLifecycle, SOURCE, "exit")
        .with_outcome(outcome)
        .with_object_id(format!("0x{:x}", report.switch_id)));

    ExitCode::from(report.exit_code())
}

fn abort(switch_id: RawSaiObjectId, error: UdfHashError, format: OutputFormat) -> ExitCode {
    error_log!(SOURCE, error = %error, "udfhashmgr aborted");
    let report = ProvisionReport::aborted(switch_id, &error);
    print_report(&report, format);
    ExitCode::from(report.exit_code())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format);

    info_log!(
        SOURCE,
        version = env!("CARGO_PKG_VERSION"),
        dry_run = args.dry_run,
        "Starting udfhashmgr"
    );

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            let switch_id = args.switch_id.unwrap_or(VirtualSwitch::DEFAULT_SWITCH_ID);
            return abort(switch_id, e, args.output);
        }
    };
    audit_log!(AuditRecord::new(AuditCategory::ConfigurationChange, SOURCE, "load_config")
        .with_outcome(AuditOutcome::Success)
        .with_object_id(format!("0x{:x}", config.switch.id))
        .with_object_type("switch")
        .with_details(serde_json::json!({
            "hash_attribute": config.switch.hash_attribute.to_string(),
            "udf_offset": config.udf.offset,
            "udf_length": config.udf.length,
        })));

    let plan = match ProvisioningPlan::from_config(&config) {
        Ok(plan) => plan,
        Err(e) => return abort(config.switch.id, e.into(), args.output),
    };

    if args.dry_run {
        match plan.preview() {
            Ok(steps) => {
                println!("{}", render_plan(&steps));
                return ExitCode::SUCCESS;
            }
            Err(e) => return abort(config.switch.id, e.into(), args.output),
        }
    }

    let vs = VirtualSwitch::with_switch_id(config.switch.id);
    if let Some(step) = args.vs_fail_step.and_then(ProvisioningStep::from_number) {
        let status = SaiStatus::from_raw(args.vs_fail_status);
        warn_log!(SOURCE, step = step.number(), status = %status, "virtual switch fault armed");
        vs.fail_on(fault_op(step), status);
    }

    if let Err(e) = bootstrap(&vs, &config.service_profile()) {
        return abort(config.switch.id, e, args.output);
    }

    let report = match UdfHashTransaction::run(&plan, &vs) {
        Ok(objects) => ProvisionReport::success(&objects),
        Err(failure) => ProvisionReport::failure(config.switch.id, &failure),
    };
    finish(&report, args.output)
}
