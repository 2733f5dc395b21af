//! Offset key layout for transaction metadata
//!
//! The transaction context persists into a flat offset record using two
//! reserved key forms:
//!
//! | Key | Value |
//! |-----|-------|
//! | `<ns>_id` | active transaction id (string) |
//! | `<ns>_data_collection_order_<object><sep><source>` | latest event order (integer) |
//!
//! With the default namespace `transaction` and separator `---` these are the
//! Debezium-compatible `transaction_id` and
//! `transaction_data_collection_order_` keys.
//!
//! ## Restore Modes
//!
//! Per-object keys carry both the object identity and the source name, while
//! the live per-source counters are keyed by source name alone. On restore,
//! [`RestoreMode::Residual`] keys the rebuilt counters by everything after
//! the prefix (`<object><sep><source>`), which is what existing persisted
//! offsets were written against. [`RestoreMode::SourceName`] keeps the same
//! wire format but keys the counters by source name, taking the highest
//! ordinal seen for that source.

use serde::{Deserialize, Serialize};
use strata_core::{Error, Result};

/// Default key namespace
pub const DEFAULT_KEY_NAMESPACE: &str = "transaction";

/// Suffix of the transaction id key
pub const TRANSACTION_ID_SUFFIX: &str = "id";

/// Suffix of the per-object event order key prefix
pub const DATA_COLLECTION_ORDER_SUFFIX: &str = "data_collection_order";

/// Separator between object identity and source name in per-object keys
pub const IDENTITY_ID_SEPARATOR: &str = "---";

/// How restored per-source counters are keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreMode {
    /// Key by the full residual after the prefix (`<object><sep><source>`)
    #[default]
    Residual,
    /// Key by the source name after the last separator
    SourceName,
}

impl RestoreMode {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreMode::Residual => "residual",
            RestoreMode::SourceName => "source_name",
        }
    }
}

impl std::fmt::Display for RestoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encodes and decodes the reserved offset keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCodec {
    transaction_id_key: String,
    order_prefix: String,
    separator: String,
    restore_mode: RestoreMode,
}

impl Default for OffsetCodec {
    fn default() -> Self {
        Self::build(
            DEFAULT_KEY_NAMESPACE,
            IDENTITY_ID_SEPARATOR,
            RestoreMode::default(),
        )
    }
}

impl OffsetCodec {
    /// Create a codec for the given key namespace and separator
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the namespace or separator is empty,
    /// or if the namespace contains the separator.
    pub fn new(key_namespace: &str, separator: &str, restore_mode: RestoreMode) -> Result<Self> {
        if key_namespace.is_empty() {
            return Err(Error::InvalidConfig("key namespace must not be empty".to_string()));
        }
        if separator.is_empty() {
            return Err(Error::InvalidConfig("separator must not be empty".to_string()));
        }
        if key_namespace.contains(separator) {
            return Err(Error::InvalidConfig(format!(
                "key namespace '{}' must not contain separator '{}'",
                key_namespace, separator
            )));
        }
        Ok(Self::build(key_namespace, separator, restore_mode))
    }

    fn build(key_namespace: &str, separator: &str, restore_mode: RestoreMode) -> Self {
        Self {
            transaction_id_key: format!("{}_{}", key_namespace, TRANSACTION_ID_SUFFIX),
            order_prefix: format!("{}_{}_", key_namespace, DATA_COLLECTION_ORDER_SUFFIX),
            separator: separator.to_string(),
            restore_mode,
        }
    }

    /// Same key layout with a different restore mode
    pub fn with_restore_mode(mut self, restore_mode: RestoreMode) -> Self {
        self.restore_mode = restore_mode;
        self
    }

    /// Key holding the active transaction id
    pub fn transaction_id_key(&self) -> &str {
        &self.transaction_id_key
    }

    /// Prefix shared by all per-object order keys
    pub fn order_prefix(&self) -> &str {
        &self.order_prefix
    }

    /// Separator between object identity and source name
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Restore mode used by `TransactionContext::from_offset`
    pub fn restore_mode(&self) -> RestoreMode {
        self.restore_mode
    }

    /// Build the per-object order key for an `(object, source)` pair
    pub fn encode_order_key(&self, object_id: &str, source: &str) -> String {
        let mut key = String::with_capacity(
            self.order_prefix.len() + object_id.len() + self.separator.len() + source.len(),
        );
        key.push_str(&self.order_prefix);
        key.push_str(object_id);
        key.push_str(&self.separator);
        key.push_str(source);
        key
    }

    /// Strip the order prefix, returning the residual if `key` is an order key
    pub fn decode_order_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.order_prefix.as_str())
    }

    /// Map a residual to the per-source counter key it restores into
    pub fn restore_key<'a>(&self, residual: &'a str) -> &'a str {
        match self.restore_mode {
            RestoreMode::Residual => residual,
            RestoreMode::SourceName => residual
                .rsplit_once(self.separator.as_str())
                .map(|(_, source)| source)
                .unwrap_or(residual),
        }
    }

    /// Reject identifiers that would make an order key ambiguous
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIdentifier` if `value` contains the separator.
    pub fn check_identifier(&self, field: &'static str, value: &str) -> Result<()> {
        if value.contains(self.separator.as_str()) {
            return Err(Error::InvalidIdentifier {
                field,
                value: value.to_string(),
                separator: self.separator.clone(),
            });
        }
        Ok(())
    }
}
