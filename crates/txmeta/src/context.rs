//! Transaction context for CDC event ordering
//!
//! `TransactionContext` holds the bookkeeping for the one transaction a
//! capture pipeline is currently emitting:
//! - the active transaction id
//! - the total number of events seen in the transaction
//! - the number of events per source (table/collection) in the transaction
//!
//! The state is stored in connector offsets via [`TransactionContext::to_offset`]
//! and recovered on restart with [`TransactionContext::from_offset`].
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──begin(id)──> InTransaction ──end()──> Idle
//!                        │      ▲
//!                        └begin─┘  (unfinished transaction discarded)
//! ```
//!
//! `begin` is accepted in any state. A new begin signal without a preceding
//! end (for example after a crash mid-transaction) resets the context instead
//! of failing.
//!
//! # Thread Safety
//!
//! Not synchronized. All mutation goes through `&mut self`; a pipeline that
//! shares a context between tasks must serialize access itself.

use crate::codec::OffsetCodec;
use crate::config::TxMetaConfig;
use crate::info::TransactionInfo;
use std::collections::{BTreeMap, HashMap};
use strata_core::{Error, OffsetMap, OffsetValue, Result};
use tracing::{debug, trace, warn};

/// An `(object identity, source name)` pair observed in the transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ObjectSource {
    object_id: String,
    source: String,
}

/// Offset entries produced by the current transaction
///
/// Kept structured; string keys are only built in `encode_into`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LocalOffset {
    transaction_id: Option<String>,
    object_orders: HashMap<ObjectSource, u64>,
}

impl LocalOffset {
    fn clear(&mut self) {
        self.transaction_id = None;
        self.object_orders.clear();
    }

    fn encode_into(&self, codec: &OffsetCodec, offset: &mut OffsetMap) {
        if let Some(id) = &self.transaction_id {
            offset.insert(
                codec.transaction_id_key().to_string(),
                OffsetValue::from(id.as_str()),
            );
        }
        for (pair, order) in &self.object_orders {
            offset.insert(
                codec.encode_order_key(&pair.object_id, &pair.source),
                OffsetValue::from(*order),
            );
        }
    }
}

/// Bookkeeping state for the active transaction
///
/// # Invariants
///
/// - `transaction_id()` is `Some` iff a transaction is in progress
/// - `total_event_count()` equals the sum of `per_source_event_count()`
/// - the local offset is cleared on every `begin` and `end`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionContext {
    transaction_id: Option<String>,
    total_event_count: u64,
    per_source_event_count: HashMap<String, u64>,
    local_offset: LocalOffset,
    codec: OffsetCodec,
}

impl TransactionContext {
    /// Create an idle context with the default key layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle context using a custom codec
    pub fn with_codec(codec: OffsetCodec) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    /// Create an idle context from configuration
    pub fn from_config(config: &TxMetaConfig) -> Result<Self> {
        Ok(Self::with_codec(config.codec()?))
    }

    /// Rebuild a context from a stored offset record using the default codec
    ///
    /// See [`TransactionContext::from_offset_with`].
    pub fn from_offset(offset: &OffsetMap) -> Result<Self> {
        Self::from_offset_with(offset, OffsetCodec::default())
    }

    /// Rebuild a context from a stored offset record
    ///
    /// - the transaction id key, if present, makes the context active
    /// - every per-object order key is restored into the per-source counters,
    ///   keyed according to the codec's restore mode
    /// - the total is the sum of the restored counters
    /// - keys the codec does not own are ignored
    ///
    /// The local offset is left empty: persisting a freshly restored context
    /// before any further event writes nothing.
    ///
    /// # Errors
    ///
    /// - `Error::OffsetTypeMismatch` if the transaction id is not a string or
    ///   an order value is not an integer
    /// - `Error::CountOutOfRange` if an order value is negative
    pub fn from_offset_with(offset: &OffsetMap, codec: OffsetCodec) -> Result<Self> {
        let mut context = Self::with_codec(codec);

        context.transaction_id = offset
            .get(context.codec.transaction_id_key())
            .map(|value| {
                value.as_str().map(str::to_string).ok_or_else(|| Error::OffsetTypeMismatch {
                    key: context.codec.transaction_id_key().to_string(),
                    expected: "String",
                    actual: value.type_name(),
                })
            })
            .transpose()?;

        for (key, value) in offset {
            let Some(residual) = context.codec.decode_order_key(key) else {
                continue;
            };
            let stored = value.as_int().ok_or_else(|| Error::OffsetTypeMismatch {
                key: key.clone(),
                expected: "Int",
                actual: value.type_name(),
            })?;
            let count = u64::try_from(stored).map_err(|_| Error::CountOutOfRange {
                key: key.clone(),
                value: stored,
            })?;
            // Residual keys are unique, so max only matters for SourceName.
            let slot = context
                .per_source_event_count
                .entry(context.codec.restore_key(residual).to_string())
                .or_insert(0);
            *slot = (*slot).max(count);
        }

        context.total_event_count = context
            .per_source_event_count
            .values()
            .fold(0u64, |acc, n| acc.saturating_add(*n));

        debug!(
            target: "strata::txmeta",
            transaction_id = ?context.transaction_id,
            sources = context.per_source_event_count.len(),
            total_event_count = context.total_event_count,
            restore_mode = %context.codec.restore_mode(),
            "Restored transaction context from offset"
        );

        Ok(context)
    }

    fn reset(&mut self) {
        self.transaction_id = None;
        self.total_event_count = 0;
        self.per_source_event_count.clear();
        self.local_offset.clear();
    }

    /// Start a transaction, discarding any transaction still in progress
    pub fn begin(&mut self, transaction_id: impl Into<String>) {
        let transaction_id = transaction_id.into();
        if let Some(previous) = &self.transaction_id {
            debug!(
                target: "strata::txmeta",
                previous = %previous,
                discarded_events = self.total_event_count,
                "Discarding unfinished transaction"
            );
        }
        self.reset();
        debug!(target: "strata::txmeta", transaction_id = %transaction_id, "Transaction started");
        self.local_offset.transaction_id = Some(transaction_id.clone());
        self.transaction_id = Some(transaction_id);
    }

    /// End the current transaction and return to idle
    pub fn end(&mut self) {
        if let Some(id) = &self.transaction_id {
            debug!(
                target: "strata::txmeta",
                transaction_id = %id,
                total_event_count = self.total_event_count,
                "Transaction ended"
            );
        }
        self.reset();
    }

    /// Record an event for `object_id` from `source`
    ///
    /// Returns the event's order within its source, starting at 1. Does not
    /// check that a transaction is active; callers are expected to `begin`
    /// first. Recording the same pair again overwrites its offset entry with
    /// the newer order.
    pub fn record_event(&mut self, source: &str, object_id: &str) -> u64 {
        self.total_event_count += 1;
        let order = match self.per_source_event_count.get_mut(source) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.per_source_event_count.insert(source.to_string(), 1);
                1
            }
        };
        self.local_offset.object_orders.insert(
            ObjectSource {
                object_id: object_id.to_string(),
                source: source.to_string(),
            },
            order,
        );
        trace!(
            target: "strata::txmeta",
            source,
            object_id,
            order,
            total = self.total_event_count,
            "Recorded event"
        );
        order
    }

    /// Like [`record_event`](Self::record_event), but rejects identifiers
    /// containing the key separator
    ///
    /// On error the context is unchanged.
    pub fn try_record_event(&mut self, source: &str, object_id: &str) -> Result<u64> {
        let checked = self
            .codec
            .check_identifier("source name", source)
            .and_then(|_| self.codec.check_identifier("object identity", object_id));
        if let Err(e) = checked {
            warn!(target: "strata::txmeta", error = %e, "Rejected event identifier");
            return Err(e);
        }
        Ok(self.record_event(source, object_id))
    }

    /// Record an event and return the transaction block for it
    ///
    /// Returns `None` and records nothing when no transaction is active.
    pub fn record_transactional_event(
        &mut self,
        source: &str,
        object_id: &str,
    ) -> Option<TransactionInfo> {
        let id = self.transaction_id.clone()?;
        let data_collection_order = self.record_event(source, object_id);
        Some(TransactionInfo {
            id,
            total_order: self.total_event_count,
            data_collection_order,
        })
    }

    /// Merge this transaction's offset entries into `offset`
    ///
    /// Colliding keys are overwritten.
    pub fn to_offset(&self, mut offset: OffsetMap) -> OffsetMap {
        self.local_offset.encode_into(&self.codec, &mut offset);
        offset
    }

    /// Offset entries produced since the last `begin`
    pub fn local_offset(&self) -> OffsetMap {
        self.to_offset(OffsetMap::new())
    }

    /// Whether a transaction is in progress
    pub fn is_active(&self) -> bool {
        self.transaction_id.is_some()
    }

    /// Active transaction id
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// Events recorded since the transaction began
    pub fn total_event_count(&self) -> u64 {
        self.total_event_count
    }

    /// Events recorded per source since the transaction began
    pub fn per_source_event_count(&self) -> &HashMap<String, u64> {
        &self.per_source_event_count
    }

    /// Key layout and restore mode in use
    pub fn codec(&self) -> &OffsetCodec {
        &self.codec
    }
}

impl std::fmt::Display for TransactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<&String, &u64> = self.per_source_event_count.iter().collect();
        match self.transaction_id() {
            Some(id) => write!(f, "TransactionContext [transaction_id={:?}, ", id)?,
            None => f.write_str("TransactionContext [transaction_id=null, ")?,
        }
        write!(
            f,
            "per_source_event_count={:?}, total_event_count={}]",
            counts, self.total_event_count
        )
    }
}
