//! UDF-based ECMP hash provisioning for SONiC.
//!
//! Puts a packet field outside the default hash tuple (by default the IPv4
//! TTL) into a switch hash. Four SAI objects are created in dependency order
//! and the resulting hash is bound to a switch hash attribute:
//!
//! ```text
//! UDF match ──┐
//!             ├──> UDF ──> (extracts L3 offset 8, 1 byte)
//! UDF group ──┘
//!     │
//!     └──> hash ──> SAI_SWITCH_ATTR_ECMP_HASH
//! ```
//!
//! If any step fails, everything created so far is removed in reverse order
//! before the failure is reported.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration
//! - [`descriptor`]: validated attribute lists per object
//! - [`bootstrap`]: SAI initialization and API table queries
//! - [`transaction`]: the create/bind/unwind state machine
//! - [`report`]: step lines, summary and JSON report
//! - [`audit`]: structured logging and audit records

pub mod audit;
pub mod bootstrap;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod report;
pub mod transaction;

pub use bootstrap::bootstrap;
pub use config::{ConfigError, UdfHashConfig};
pub use descriptor::{DescriptorError, HashBindTarget, ProvisioningPlan};
pub use error::{RemovalFailure, UdfHashError, UdfHashResult};
pub use report::{OutputFormat, ProvisionReport};
pub use transaction::{
    ProvisionFailure, ProvisionedObjects, ProvisioningStep, TransactionState, UdfHashTransaction,
};
