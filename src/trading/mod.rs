pub mod forwarder;

pub use forwarder::{ForwardError, ForwardReceipt, TradeForwarder, DEFAULT_TRADING_API_URL};
