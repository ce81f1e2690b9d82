//! Order Reconciliation Demo - Joining Payment and Shipment Fragments
//!
//! This demo showcases the streamjoin engine end to end:
//! 1. Payment and shipment events for the same order arrive interleaved
//! 2. The engine accumulates them per order id in a partitioned join table
//! 3. Orders with both halves are serialized to JSON and evicted; the rest
//!    stay in the table awaiting their missing half
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --bin join_demo
//! ```

use futures::stream;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use streamjoin::{
    Existing, JoinLogic, JoinRunner, JoinStore, Joiner, PartitionedTable, TableConfig,
};

/// One partial arrival: either the payment half or the shipment half.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderEvent {
    order_id: String,
    payment_ref: Option<String>,
    shipment_ref: Option<String>,
}

/// The accumulated order, richer than any single event.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderRecord {
    order_id: String,
    payment_ref: Option<String>,
    shipment_ref: Option<String>,
    parts_seen: u32,
}

struct OrderReconciliation;

impl JoinLogic for OrderReconciliation {
    type Fragment = OrderEvent;
    type Key = String;
    type Composite = OrderRecord;
    type Processed = String;
    type Deferred = ();
    type Error = Infallible;

    fn key_of(&self, event: &OrderEvent) -> String {
        event.order_id.clone()
    }

    fn merge(
        &self,
        event: &OrderEvent,
        existing: Existing<'_, OrderEvent, OrderRecord>,
    ) -> Result<OrderRecord, Infallible> {
        // New event wins where it carries a value; the prior fills the gaps.
        Ok(match existing {
            Existing::Fragment(first) => OrderRecord {
                order_id: event.order_id.clone(),
                payment_ref: event.payment_ref.clone().or(first.payment_ref.clone()),
                shipment_ref: event.shipment_ref.clone().or(first.shipment_ref.clone()),
                parts_seen: 1,
            },
            Existing::Composite(prior) => OrderRecord {
                order_id: event.order_id.clone(),
                payment_ref: event.payment_ref.clone().or(prior.payment_ref.clone()),
                shipment_ref: event.shipment_ref.clone().or(prior.shipment_ref.clone()),
                parts_seen: prior.parts_seen + 1,
            },
        })
    }

    fn is_sufficient(&self, record: &OrderRecord) -> Result<bool, Infallible> {
        Ok(record.payment_ref.is_some() && record.shipment_ref.is_some())
    }

    fn process(&self, record: OrderRecord) -> Result<String, Infallible> {
        // Downstream emission stands in for persistence here.
        let line = serde_json::to_string(&record).unwrap_or_else(|e| format!("<unserializable: {}>", e));
        info!("RECONCILED: {}", line);
        Ok(line)
    }

    fn on_incomplete(&self, record: &OrderRecord) -> Result<(), Infallible> {
        debug!(
            "AWAITING: order {} has {} of 2 parts",
            record.order_id, record.parts_seen
        );
        Ok(())
    }
}

fn payment(order_id: &str, reference: &str) -> OrderEvent {
    OrderEvent {
        order_id: order_id.to_string(),
        payment_ref: Some(reference.to_string()),
        shipment_ref: None,
    }
}

fn shipment(order_id: &str, reference: &str) -> OrderEvent {
    OrderEvent {
        order_id: order_id.to_string(),
        payment_ref: None,
        shipment_ref: Some(reference.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let table = PartitionedTable::new(TableConfig::new("order-join").partitions(4));
    let joiner = Arc::new(Joiner::try_new(table, OrderReconciliation)?);
    let runner = JoinRunner::new(joiner.clone());

    // Interleaved arrivals across three orders; order-1003 never ships.
    let events = vec![
        payment("order-1001", "pay-77812"),
        payment("order-1002", "pay-77813"),
        shipment("order-1001", "shp-40155"),
        payment("order-1003", "pay-77814"),
        shipment("order-1002", "shp-40156"),
    ];

    let stats = runner.run(stream::iter(events)).await?;

    println!("\n📊 Join Summary:");
    println!("   📥 Fragments submitted: {}", stats.fragments);
    println!("   ✅ Orders reconciled:   {}", stats.processed);
    println!("   ⏳ Updates incomplete:  {}", stats.incomplete);

    let remaining = joiner.store().keys();
    println!("   🗂  Still accumulating:  {:?}", remaining);

    Ok(())
}
