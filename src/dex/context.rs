use thiserror::Error;

use super::decoder::{DecodeError, EventDecoder, LogDecoder};
use super::events::DexEvent;
use super::products::{ProductCatalog, ProductTableError};
use super::rpc::{RpcClient, RpcError};
use super::types::Pubkey;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("market product group {0} not found")]
    MissingProductGroup(Pubkey),

    #[error("market product group {key} is owned by {owner}, expected {expected}")]
    WrongOwner {
        key: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    #[error("market product group has an unreadable product table: {0}")]
    ProductTable(#[from] ProductTableError),
}

/// Everything needed to read Dexterity events for one market product group.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct SdkContext {
    market_product_group: Pubkey,
    program_id: Pubkey,
    decoder: LogDecoder,
    products: ProductCatalog,
}

impl SdkContext {
    /// Build a context without touching the network. No product names are
    /// known, so trades carry product keys.
    pub fn new(market_product_group: Pubkey, program_id: Pubkey) -> Self {
        Self {
            market_product_group,
            program_id,
            decoder: LogDecoder::new(program_id),
            products: ProductCatalog::default(),
        }
    }

    pub fn with_products(mut self, products: ProductCatalog) -> Self {
        self.products = products;
        self
    }

    /// Build a context after checking that the RPC node answers and that the
    /// market product group exists and belongs to the dex program. The
    /// group's product table supplies product names.
    pub async fn connect(
        client: &RpcClient,
        market_product_group: Pubkey,
        program_id: Pubkey,
    ) -> Result<Self, ContextError> {
        let version = client.get_version().await?;
        tracing::info!(rpc = %client.url(), version = %version, "Connected to Solana RPC");

        let account = client
            .get_account_info(&market_product_group)
            .await?
            .ok_or(ContextError::MissingProductGroup(market_product_group))?;

        if account.owner != program_id {
            return Err(ContextError::WrongOwner {
                key: market_product_group,
                owner: account.owner,
                expected: program_id,
            });
        }

        let products = ProductCatalog::from_account_data(&account.data)?;

        tracing::info!(
            mpg = %market_product_group,
            program = %program_id,
            lamports = account.lamports,
            products = products.len(),
            "Market product group verified"
        );

        Ok(Self::new(market_product_group, program_id).with_products(products))
    }

    pub fn market_product_group(&self) -> Pubkey {
        self.market_product_group
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }
}

impl EventDecoder for SdkContext {
    fn parse_events_from_logs(&self, logs: &[String]) -> Result<Vec<DexEvent>, DecodeError> {
        self.decoder.parse_events_from_logs(logs)
    }
}
