//! Transaction block attached to emitted change events

use serde::{Deserialize, Serialize};

/// Transaction metadata for a single change event
///
/// Matches the `transaction` block of a Debezium change event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// Transaction identifier
    pub id: String,
    /// Position of the event among all events of the transaction
    pub total_order: u64,
    /// Position of the event among events of the same source
    pub data_collection_order: u64,
}
