//! Transaction metadata configuration via `txmeta.toml`
//!
//! Controls the offset key layout and how per-source counters are rebuilt
//! from a stored offset record. Every field is optional; an empty file yields
//! the Debezium-compatible defaults.

use crate::codec::{OffsetCodec, RestoreMode, DEFAULT_KEY_NAMESPACE, IDENTITY_ID_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_core::{Error, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "txmeta.toml";

/// Transaction metadata configuration loaded from `txmeta.toml`.
///
/// # Example
///
/// ```toml
/// key_namespace = "transaction"
/// separator = "---"
/// restore_mode = "residual"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMetaConfig {
    /// Namespace for offset keys: `<ns>_id` and `<ns>_data_collection_order_`.
    #[serde(default = "default_key_namespace")]
    pub key_namespace: String,
    /// Separator between object identity and source name.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// How restored per-source counters are keyed.
    #[serde(default)]
    pub restore_mode: RestoreMode,
}

fn default_key_namespace() -> String {
    DEFAULT_KEY_NAMESPACE.to_string()
}

fn default_separator() -> String {
    IDENTITY_ID_SEPARATOR.to_string()
}

impl Default for TxMetaConfig {
    fn default() -> Self {
        Self {
            key_namespace: default_key_namespace(),
            separator: default_separator(),
            restore_mode: RestoreMode::default(),
        }
    }
}

impl TxMetaConfig {
    /// Build the offset codec described by this config.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the key layout is invalid.
    pub fn codec(&self) -> Result<OffsetCodec> {
        OffsetCodec::new(&self.key_namespace, &self.separator, self.restore_mode)
    }

    /// Check the key layout without keeping the codec.
    pub fn validate(&self) -> Result<()> {
        self.codec().map(|_| ())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Transaction metadata configuration
#
# Offset keys are "<key_namespace>_id" for the transaction id and
# "<key_namespace>_data_collection_order_<object><separator><source>"
# for per-object event order.
key_namespace = "transaction"

# Separator between object identity and source name.
# Must not occur inside any object identity or source name.
separator = "---"

# How per-source counters are rebuilt from stored offsets:
#   "residual"    = key by "<object><separator><source>" (compatible default)
#   "source_name" = key by source name, keeping the highest order
restore_mode = "residual"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TxMetaConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
