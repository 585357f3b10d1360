pub mod notification;
pub mod trade;

pub use notification::{TransactionMeta, TransactionNotification};
pub use trade::TradeRecord;
