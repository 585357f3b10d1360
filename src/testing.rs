//! Helpers for building realistic webhook traffic.
//!
//! [`transaction_logs`] renders events the way the Solana runtime logs them
//! for one top-level invocation of the dex program, and [`webhook_body`]
//! wraps log lines into the array payload indexing services post.
//! [`product_group_data`] builds market product group account data.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::dex::events::EncodeError;
use crate::dex::products::PRODUCT_NAME_LEN;
use crate::dex::{DexEvent, OrderFillEvent, Pubkey, Side};

/// Log lines of a transaction in which `program_id` emitted `events`.
pub fn transaction_logs(program_id: &Pubkey, events: &[DexEvent]) -> Result<Vec<String>, EncodeError> {
    let mut logs = vec![
        "Program ComputeBudget111111111111111111111111111111 invoke [1]".to_string(),
        "Program ComputeBudget111111111111111111111111111111 success".to_string(),
        format!("Program {program_id} invoke [1]"),
        "Program log: Instruction: ConsumeOrderbookEvents".to_string(),
    ];
    for event in events {
        logs.push(format!("Program data: {}", STANDARD.encode(event.to_bytes()?)));
    }
    logs.push(format!(
        "Program {program_id} consumed 41523 of 1400000 compute units"
    ));
    logs.push(format!("Program {program_id} success"));
    Ok(logs)
}

/// `[{"meta": {"err": null, "logMessages": [...]}}]`
pub fn webhook_body(logs: &[String]) -> Value {
    json!([{
        "meta": { "err": null, "logMessages": logs },
        "slot": 245_000_000u64,
    }])
}

/// A fill with distinct, recognisable keys derived from `seed`.
pub fn sample_fill(seed: u8, taker_side: Side, price: Decimal, base_size: Decimal) -> OrderFillEvent {
    OrderFillEvent {
        product: Pubkey::new([seed; 32]),
        taker_side,
        quote_size: price * base_size,
        base_size,
        maker_trader_risk_group: Pubkey::new([seed.wrapping_add(1); 32]),
        taker_trader_risk_group: Pubkey::new([seed.wrapping_add(2); 32]),
        price,
    }
}

/// Market product group account data listing `products`.
///
/// Names longer than the on-chain field are cut to fit.
pub fn product_group_data(products: &[(Pubkey, &str)]) -> Vec<u8> {
    let mut data = (products.len() as u16).to_le_bytes().to_vec();
    for (key, name) in products {
        data.extend_from_slice(key.as_bytes());
        let mut field = [b' '; PRODUCT_NAME_LEN];
        let len = name.len().min(PRODUCT_NAME_LEN);
        field[..len].copy_from_slice(&name.as_bytes()[..len]);
        data.extend_from_slice(&field);
    }
    data
}
