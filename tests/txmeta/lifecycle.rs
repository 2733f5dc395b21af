//! Lifecycle Tests
//!
//! begin / record / end transitions as driven by a capture pipeline.

use crate::common::*;

#[test]
fn test_example_scenario() {
    init_tracing();
    let mut ctx = TransactionContext::new();
    ctx.begin("txA");

    assert_eq!(ctx.record_event("customers", "1"), 1);
    assert_eq!(ctx.record_event("customers", "2"), 2);
    assert_eq!(ctx.record_event("orders", "1"), 1);

    assert_eq!(ctx.total_event_count(), 3);
    assert_eq!(
        ctx.per_source_event_count(),
        &counts(&[("customers", 2), ("orders", 1)])
    );
}

#[test]
fn test_is_active_transitions() {
    init_tracing();
    let mut ctx = TransactionContext::new();
    assert!(!ctx.is_active());

    ctx.begin("tx-1");
    assert!(ctx.is_active());

    ctx.begin("tx-2");
    assert!(ctx.is_active());

    ctx.end();
    assert!(!ctx.is_active());

    ctx.end();
    assert!(!ctx.is_active());
}

#[test]
fn test_consecutive_transactions_do_not_carry_over() {
    init_tracing();
    let mut ctx = context_with_events("tx-1", &[("orders", "1"), ("orders", "2")]);
    ctx.end();

    ctx.begin("tx-2");
    assert_eq!(ctx.record_event("orders", "3"), 1);
    assert_eq!(ctx.total_event_count(), 1);

    let offset = ctx.local_offset();
    assert_eq!(offset.len(), 2);
    assert_eq!(offset.get("transaction_id"), Some(&OffsetValue::from("tx-2")));
    assert!(offset.contains_key("transaction_data_collection_order_3---orders"));
    assert!(!offset.contains_key("transaction_data_collection_order_1---orders"));
}

#[test]
fn test_pipeline_annotates_events() {
    init_tracing();
    let mut ctx = TransactionContext::new();

    // Events outside a transaction carry no transaction block
    assert!(ctx.record_transactional_event("orders", "0").is_none());

    ctx.begin("571");
    let blocks: Vec<TransactionInfo> = [("orders", "1"), ("customers", "9"), ("orders", "2")]
        .iter()
        .filter_map(|(source, id)| ctx.record_transactional_event(source, id))
        .collect();
    ctx.end();

    let orders: Vec<(u64, u64)> = blocks
        .iter()
        .map(|b| (b.total_order, b.data_collection_order))
        .collect();
    assert_eq!(orders, vec![(1, 1), (2, 1), (3, 2)]);
    assert!(blocks.iter().all(|b| b.id == "571"));
}

#[test]
fn test_per_source_view_tracks_live_state() {
    let mut ctx = context_with_events("tx", &[("orders", "1")]);
    assert_eq!(ctx.per_source_event_count().get("orders"), Some(&1));

    ctx.record_event("orders", "2");
    assert_eq!(ctx.per_source_event_count().get("orders"), Some(&2));

    ctx.end();
    assert!(ctx.per_source_event_count().is_empty());
}
