use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of one `POST /process-trade` call to the trading API.
///
/// Numbers are plain floats; the trading API does not accept decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub product: String,
    pub taker_side: String,
    pub quote_size: f64,
    pub base_size: f64,
    pub maker: String,
    pub taker: String,
    pub price: f64,
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade: product={} side={} base={} quote={} price={} maker={} taker={}",
            short(&self.product),
            self.taker_side,
            self.base_size,
            self.quote_size,
            self.price,
            short(&self.maker),
            short(&self.taker),
        )
    }
}

fn short(key: &str) -> &str {
    key.get(..8).unwrap_or(key)
}
