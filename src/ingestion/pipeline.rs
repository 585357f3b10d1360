use metrics::counter;

use crate::dex::{DecodeError, DexEvent, EventDecoder, OrderFillEvent, ProductCatalog};
use crate::ingestion::translator::event_to_trade;
use crate::models::{TradeRecord, TransactionNotification};
use crate::trading::TradeForwarder;

/// Result of pushing one transaction through the relay.
///
/// Delivery counts are informational: the webhook answers "processed"
/// whatever they say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    NoFills,
    Forwarded { delivered: usize, failed: usize },
}

/// Keep only fill events, in decode order.
pub fn fill_events(events: Vec<DexEvent>) -> Vec<OrderFillEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            DexEvent::OrderFill(fill) => Some(fill),
            DexEvent::OrderCancel(_) | DexEvent::NewOrder(_) => None,
        })
        .collect()
}

/// Decode a transaction's logs and translate every fill into a trade record.
pub fn extract_trades(
    decoder: &dyn EventDecoder,
    products: &ProductCatalog,
    logs: &[String],
) -> Result<Vec<TradeRecord>, DecodeError> {
    let events = decoder.parse_events_from_logs(logs)?;
    Ok(fill_events(events)
        .iter()
        .map(|fill| event_to_trade(fill, products))
        .collect())
}

/// Process one webhook transaction:
/// 1. Decode events from `meta.logMessages`
/// 2. Keep fill events and translate them to trade records
/// 3. Forward each trade, in order, to the trading API
///
/// Only decoding can fail. A failed delivery is logged and the remaining
/// trades are still sent.
pub async fn handle_transaction(
    notification: &TransactionNotification,
    decoder: &dyn EventDecoder,
    products: &ProductCatalog,
    forwarder: &TradeForwarder,
) -> Result<TransactionOutcome, DecodeError> {
    let trades = extract_trades(decoder, products, notification.log_messages())?;

    if trades.is_empty() {
        tracing::info!("No fill events found in transaction");
        return Ok(TransactionOutcome::NoFills);
    }

    counter!("fill_events_total").increment(trades.len() as u64);

    let mut delivered = 0;
    let mut failed = 0;
    for trade in &trades {
        tracing::info!(
            product = %trade.product,
            side = %trade.taker_side,
            price = trade.price,
            base_size = trade.base_size,
            "Forwarding {trade}"
        );
        match forwarder.forward(trade).await {
            Ok(_receipt) => {
                delivered += 1;
                counter!("trades_forwarded_total").increment(1);
            }
            Err(e) => {
                failed += 1;
                counter!("trades_forward_failed_total").increment(1);
                tracing::error!(
                    error = %e,
                    endpoint = forwarder.endpoint(),
                    "Failed to send fill event"
                );
            }
        }
    }

    tracing::info!(
        sent = trades.len(),
        delivered,
        failed,
        "Sent {} trade events",
        trades.len()
    );

    Ok(TransactionOutcome::Forwarded { delivered, failed })
}
