use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::dex::{OrderFillEvent, ProductCatalog};
use crate::models::TradeRecord;

/// Project a decoded fill into the trading API's trade schema.
///
/// `product` is the product's name in the market product group, which is
/// what the trading API matches on. Unknown products go out as their key.
pub fn event_to_trade(event: &OrderFillEvent, products: &ProductCatalog) -> TradeRecord {
    TradeRecord {
        product: products.display_name(&event.product),
        taker_side: event.taker_side.name().to_lowercase(),
        quote_size: to_float(event.quote_size),
        base_size: to_float(event.base_size),
        maker: event.maker_trader_risk_group.to_string(),
        taker: event.taker_trader_risk_group.to_string(),
        price: to_float(event.price),
    }
}

fn to_float(value: Decimal) -> f64 {
    // Decimal -> f64 cannot fail, the Option is a trait artifact
    value.to_f64().unwrap_or_default()
}
