//! Configuration Tests
//!
//! Contexts built from `txmeta.toml`.

use crate::common::*;
use strata_cdc::CONFIG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_default_file_gives_compatible_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    TxMetaConfig::write_default_if_missing(&path).unwrap();

    let config = TxMetaConfig::from_file(&path).unwrap();
    let mut ctx = TransactionContext::from_config(&config).unwrap();
    ctx.begin("tx");
    ctx.record_event("orders", "1");

    let offset = ctx.local_offset();
    assert!(offset.contains_key("transaction_id"));
    assert!(offset.contains_key("transaction_data_collection_order_1---orders"));
}

#[test]
fn test_custom_layout_round_trip() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "key_namespace = \"txn\"\nseparator = \"::\"\nrestore_mode = \"source_name\"\n",
    )
    .unwrap();

    let config = TxMetaConfig::from_file(&path).unwrap();
    let mut ctx = TransactionContext::from_config(&config).unwrap();
    ctx.begin("tx-5");
    ctx.record_event("orders", "1");
    ctx.record_event("orders", "2");

    let offset = ctx.local_offset();
    assert_eq!(offset.get("txn_id"), Some(&OffsetValue::from("tx-5")));
    assert_eq!(
        offset.get("txn_data_collection_order_2::orders"),
        Some(&OffsetValue::Int(2))
    );

    let restored = restart(&ctx, config.codec().unwrap());
    assert_eq!(restored.transaction_id(), Some("tx-5"));
    assert_eq!(restored.per_source_event_count(), &counts(&[("orders", 2)]));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TxMetaConfig {
        key_namespace: "a::b".to_string(),
        separator: "::".to_string(),
        ..TxMetaConfig::default()
    };
    assert!(matches!(
        TransactionContext::from_config(&config),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_separator_guard_follows_config() {
    let config = TxMetaConfig {
        separator: "|".to_string(),
        ..TxMetaConfig::default()
    };
    let mut ctx = TransactionContext::from_config(&config).unwrap();
    ctx.begin("tx");

    // "---" is an ordinary character run under a custom separator
    assert_eq!(ctx.try_record_event("orders", "a---b").unwrap(), 1);
    assert!(matches!(
        ctx.try_record_event("orders", "a|b"),
        Err(Error::InvalidIdentifier { .. })
    ));
}
