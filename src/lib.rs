pub mod api;
pub mod config;
pub mod dex;
pub mod errors;
pub mod ingestion;
pub mod metrics;
pub mod models;
pub mod testing;
pub mod trading;

use std::sync::Arc;

use crate::dex::{EventDecoder, ProductCatalog};
use crate::trading::TradeForwarder;

#[derive(Clone)]
pub struct AppState {
    pub decoder: Arc<dyn EventDecoder>,
    pub products: Arc<ProductCatalog>,
    pub forwarder: Arc<TradeForwarder>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
