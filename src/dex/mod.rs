pub mod context;
pub mod decoder;
pub mod events;
pub mod products;
pub mod rpc;
pub mod types;

pub use context::SdkContext;
pub use decoder::{DecodeError, EventDecoder, LogDecoder};
pub use events::{DexEvent, NewOrderEvent, OrderCancelEvent, OrderFillEvent};
pub use products::ProductCatalog;
pub use rpc::RpcClient;
pub use types::{Fractional, Pubkey, Side};

/// Hxro Dexterity dex program.
pub const DEFAULT_DEX_PROGRAM_ID: &str = "FUfpR31LmcP1VSbz5zDaM7nxnH55iBHkpwusgrnhaFjL";

/// Devnet market product group the relay watches by default.
pub const DEFAULT_MARKET_PRODUCT_GROUP: &str = "BRWNCEzQTm8kvEXHsVVY9jpb1VLbpv9B8mkF43nMLCtu";
