use std::sync::Arc;

use trades_webhook::api::router::create_router;
use trades_webhook::config::AppConfig;
use trades_webhook::dex::{RpcClient, SdkContext};
use trades_webhook::trading::TradeForwarder;
use trades_webhook::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = trades_webhook::metrics::init_metrics()?;

    // --- Decoder context ---
    let ctx = if config.verify_market_product_group {
        tracing::info!(rpc = %config.solana_rpc_url, "Connecting to Solana RPC...");
        let rpc = RpcClient::new(reqwest::Client::new(), config.solana_rpc_url.clone());
        SdkContext::connect(&rpc, config.market_product_group, config.dex_program_id).await?
    } else {
        tracing::warn!(
            "VERIFY_MARKET_PRODUCT_GROUP=false, skipping RPC checks; trades will carry product keys"
        );
        SdkContext::new(config.market_product_group, config.dex_program_id)
    };

    // --- Trading API forwarder ---
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.trading_api_timeout {
        http = http.timeout(timeout);
    }
    let forwarder = TradeForwarder::new(http.build()?, &config.trading_api_url);
    tracing::info!(
        endpoint = forwarder.endpoint(),
        timeout_secs = config.trading_api_timeout.map(|t| t.as_secs()),
        "Trades will be forwarded"
    );

    let products = Arc::new(ctx.products().clone());
    let state = AppState {
        decoder: Arc::new(ctx),
        products,
        forwarder: Arc::new(forwarder),
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
