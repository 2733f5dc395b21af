//! Transaction metadata for CDC pipelines
//!
//! This crate tracks the ordering of change events inside the source
//! transaction that produced them:
//! - TransactionContext: active transaction, total and per-source event counts
//! - OffsetCodec: reserved offset keys and restore modes
//! - TransactionInfo: transaction block attached to each emitted event
//! - TxMetaConfig: key layout configuration (`txmeta.toml`)
//!
//! The context never touches storage. It produces offset entries for an
//! external offset store and is rebuilt from them on restart:
//!
//! ```
//! use strata_core::OffsetMap;
//! use strata_txmeta::TransactionContext;
//!
//! let mut ctx = TransactionContext::new();
//! ctx.begin("tx-1");
//! assert_eq!(ctx.record_event("inventory.orders", "1001"), 1);
//!
//! let offset = ctx.to_offset(OffsetMap::new());
//! let restored = TransactionContext::from_offset(&offset).unwrap();
//! assert_eq!(restored.transaction_id(), Some("tx-1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod context;
pub mod info;

pub use codec::{OffsetCodec, RestoreMode, IDENTITY_ID_SEPARATOR};
pub use config::{TxMetaConfig, CONFIG_FILE_NAME};
pub use context::TransactionContext;
pub use info::TransactionInfo;
