//! Configuration file support for udfhashmgr.
//!
//! Loads the switch identity and the UDF/hash parameters from a TOML file.
//! Default location: /etc/sonic/udfhashmgr.toml. Every field has a default,
//! so an empty file provisions IPv4 TTL (L3 offset 8, one byte) into the
//! ECMP hash of switch 0x21000000000000.
//!
//! Numeric fields are read wider than their SAI attribute so that
//! out-of-range values reach the descriptor builder and are rejected there
//! with a precise message instead of a generic parse error.

use crate::descriptor::HashBindTarget;
use serde::{Deserialize, Serialize};
use sonic_sai::api::ServiceProfile;
use sonic_sai::attr::{NativeHashField, UdfBase, UdfGroupType};
use sonic_sai::RawSaiObjectId;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sonic/udfhashmgr.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Target switch and the attribute the hash object is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchConfig {
    /// Switch object ID
    #[serde(default = "default_switch_id")]
    pub id: RawSaiObjectId,

    /// Switch hash attribute set to the new hash object
    #[serde(default)]
    pub hash_attribute: HashBindTarget,
}

/// Packets the UDF applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UdfMatchConfig {
    /// Ethertype to match
    #[serde(default = "default_ether_type")]
    pub ether_type: u32,

    /// Mask applied to the ethertype
    #[serde(default = "default_ether_type_mask")]
    pub ether_type_mask: u32,

    /// Match priority, when several UDF matches overlap
    #[serde(default)]
    pub priority: Option<u32>,
}

/// Bucket the extracted bytes are collected into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UdfGroupConfig {
    #[serde(default)]
    pub group_type: UdfGroupType,

    /// Explicit group length in bytes; omitted lets the SAI derive it
    #[serde(default)]
    pub fixed_length: Option<u32>,
}

/// Byte range extracted from each matching packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UdfConfig {
    #[serde(default)]
    pub base: UdfBase,

    /// Offset in bytes from the start of `base`
    #[serde(default = "default_udf_offset")]
    pub offset: u32,

    /// Length in bytes. Omitted from a `[udf]` section, no length attribute
    /// is sent and the SAI derives it; an absent section keeps one byte.
    pub length: Option<u32>,
}

/// Hash object contents besides the UDF group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashConfig {
    /// Native fields hashed alongside the UDF group
    #[serde(default)]
    pub native_fields: Vec<NativeHashField>,
}

/// Complete udfhashmgr configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UdfHashConfig {
    #[serde(default)]
    pub switch: SwitchConfig,

    #[serde(default)]
    pub udf_match: UdfMatchConfig,

    #[serde(default)]
    pub udf_group: UdfGroupConfig,

    #[serde(default)]
    pub udf: UdfConfig,

    #[serde(default)]
    pub hash: HashConfig,

    /// Key/value pairs served to the SAI through the service method table
    #[serde(default)]
    pub profile: BTreeMap<String, String>,
}

fn default_switch_id() -> RawSaiObjectId {
    0x21_0000_0000_0000
}

fn default_ether_type() -> u32 {
    0x0800
}

fn default_ether_type_mask() -> u32 {
    0xffff
}

fn default_udf_offset() -> u32 {
    8
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            id: default_switch_id(),
            hash_attribute: HashBindTarget::default(),
        }
    }
}

impl Default for UdfMatchConfig {
    fn default() -> Self {
        Self {
            ether_type: default_ether_type(),
            ether_type_mask: default_ether_type_mask(),
            priority: None,
        }
    }
}

impl Default for UdfGroupConfig {
    fn default() -> Self {
        Self {
            group_type: UdfGroupType::Hash,
            fixed_length: None,
        }
    }
}

impl Default for UdfConfig {
    fn default() -> Self {
        Self {
            base: UdfBase::L3,
            offset: default_udf_offset(),
            length: Some(1),
        }
    }
}

impl UdfHashConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that are not tied to a SAI attribute width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.switch.id == 0 {
            return Err(ConfigError::invalid("switch.id", "switch OID must not be null"));
        }
        if let Some(key) = self.profile.keys().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "profile",
                format!("empty profile key {:?}", key),
            ));
        }
        Ok(())
    }

    /// The SAI service profile built from the `[profile]` table.
    pub fn service_profile(&self) -> ServiceProfile {
        self.profile
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Parses an object ID given as `0x`-prefixed hex or decimal.
pub fn parse_object_id(s: &str) -> Result<RawSaiObjectId, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => RawSaiObjectId::from_str_radix(hex, 16),
        None => s.parse(),
    };
    match parsed {
        Ok(0) => Err("object ID must not be null".to_string()),
        Ok(oid) => Ok(oid),
        Err(e) => Err(format!("invalid object ID {:?}: {}", s, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = UdfHashConfig::from_toml_str("").unwrap();
        assert_eq!(config, UdfHashConfig::default());
        assert_eq!(config.switch.id, 0x21000000000000);
        assert_eq!(config.switch.hash_attribute, HashBindTarget::EcmpHash);
        assert_eq!(config.udf_match.ether_type, 0x0800);
        assert_eq!(config.udf_group.group_type, UdfGroupType::Hash);
        assert_eq!(config.udf_group.fixed_length, None);
        assert_eq!(config.udf.base, UdfBase::L3);
        assert_eq!(config.udf.offset, 8);
        assert_eq!(config.udf.length, Some(1));
        assert!(config.hash.native_fields.is_empty());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [switch]
            id = 0x21000000000001
            hash_attribute = "ecmp_hash_ipv4"

            [udf_match]
            ether_type = 0x86dd
            priority = 3

            [udf_group]
            group_type = "hash"
            fixed_length = 1

            [udf]
            base = "l3"
            offset = 7
            length = 1

            [hash]
            native_fields = ["src_ip", "dst_ip", "l4_src_port"]

            [profile]
            SAI_VS_SWITCH_TYPE = "SAI_VS_SWITCH_TYPE_BCM56850"
        "#;
        let config = UdfHashConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.switch.id, 0x21000000000001);
        assert_eq!(config.switch.hash_attribute, HashBindTarget::EcmpHashIpv4);
        assert_eq!(config.udf_match.ether_type, 0x86dd);
        assert_eq!(config.udf_match.ether_type_mask, 0xffff);
        assert_eq!(config.udf_match.priority, Some(3));
        assert_eq!(config.udf_group.fixed_length, Some(1));
        assert_eq!(config.udf.offset, 7);
        assert_eq!(
            config.hash.native_fields,
            vec![
                NativeHashField::SrcIp,
                NativeHashField::DstIp,
                NativeHashField::L4SrcPort
            ]
        );
        assert_eq!(
            config.service_profile().get_value("SAI_VS_SWITCH_TYPE"),
            Some("SAI_VS_SWITCH_TYPE_BCM56850")
        );
    }

    #[test]
    fn test_udf_length_omitted_in_section() {
        let config = UdfHashConfig::from_toml_str("[udf]\noffset = 8\n").unwrap();
        assert_eq!(config.udf.length, None);
        assert_eq!(config.udf.offset, 8);

        let config = UdfHashConfig::from_toml_str("[udf]\nlength = 2\n").unwrap();
        assert_eq!(config.udf.length, Some(2));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = UdfHashConfig::from_toml_str("[udf]\nofset = 8\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_null_switch_rejected() {
        let err = UdfHashConfig::from_toml_str("[switch]\nid = 0\n").unwrap_err();
        assert!(err.to_string().contains("switch.id"));
    }

    #[test]
    fn test_empty_profile_key_rejected() {
        let err = UdfHashConfig::from_toml_str("[profile]\n\" \" = \"1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[udf]\noffset = 9").unwrap();

        let config = UdfHashConfig::load(file.path()).unwrap();
        assert_eq!(config.udf.offset, 9);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UdfHashConfig::load("/nonexistent/udfhashmgr.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_object_id() {
        assert_eq!(parse_object_id("0x21000000000000"), Ok(0x21000000000000));
        assert_eq!(parse_object_id("42"), Ok(42));
        assert!(parse_object_id("0x0").is_err());
        assert!(parse_object_id("switch").is_err());
    }
}
