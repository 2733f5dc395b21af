//! Strata CDC - transaction metadata for change-data-capture pipelines
//!
//! Tracks which source transaction is being emitted, how many events it has
//! produced, and the order of each event within its source table or
//! collection. The state round-trips through a flat key/value offset record
//! so that a connector can resume mid-transaction after a restart.
//!
//! # Quick Start
//!
//! ```
//! use strata_cdc::{OffsetMap, TransactionContext};
//!
//! let mut ctx = TransactionContext::new();
//! ctx.begin("txA");
//! ctx.record_event("customers", "1");
//! ctx.record_event("customers", "2");
//! ctx.record_event("orders", "1");
//! assert_eq!(ctx.total_event_count(), 3);
//!
//! // Hand the entries to the offset store
//! let offset = ctx.to_offset(OffsetMap::new());
//! # let _ = offset;
//! ```
//!
//! # Architecture
//!
//! - `strata-core`: offset record values, JSON codec, errors
//! - `strata-txmeta`: the transaction context, key layout and configuration
//!
//! Offset persistence and transaction boundary detection belong to the
//! surrounding connector.

pub use strata_core::{decode_offset_map, encode_offset_map, Error, OffsetMap, OffsetValue, Result};
pub use strata_txmeta::{
    OffsetCodec, RestoreMode, TransactionContext, TransactionInfo, TxMetaConfig, CONFIG_FILE_NAME,
    IDENTITY_ID_SEPARATOR,
};
