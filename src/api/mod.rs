pub mod health;
pub mod trade;

use crate::config::{Config, TradeRules};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<TradeRules>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: Arc::new(config.rules.clone()),
        }
    }

    pub fn with_rules(rules: TradeRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/trade", post(trade::post_trade))
        .layer(cors)
        .with_state(state)
}
