//! Token Intelligence Agent HTTP Server
//!
//! Axum-based server exposing the agent endpoints (single-shot and
//! streaming) alongside direct market-data lookups.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::tool::ToolRegistry;
use agent_core::LlmProvider;
use agent_runtime::OpenAiProvider;
use token_intel::{
    tools::{GraduatedTokensTool, TokenDataTool, TopHoldersTool, WalletSwapsTool},
    HttpMarketDataClient, MarketDataClient,
};

use crate::handlers::{
    ask_handler, ask_stream_handler, health_check, history_handler, new_tokens_handler,
    token_handler, top_holders_handler,
};
use crate::state::AppState;

const DEFAULT_MODEL: &str = "accounts/fireworks/models/llama-v3p3-70b-instruct";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize LLM provider
    let provider = Arc::new(OpenAiProvider::from_env()?);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to LLM endpoint"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ LLM endpoint not reachable - agent requests will fail");
            tracing::warn!("  Check LLM_BASE_URL and LLM_API_KEY in .env");
        }
    }

    let default_model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    tracing::info!("Default model: {}", default_model);

    // Initialize market data client
    let market: Arc<dyn MarketDataClient> = Arc::new(HttpMarketDataClient::from_env());
    if market.health_check().await {
        tracing::info!("✓ Market data provider reachable ({})", market.name());
    } else {
        tracing::warn!("⚠ Market data provider not reachable - tool calls will fail");
    }

    // Initialize tools
    let mut tools = ToolRegistry::new();
    tools.register(TokenDataTool::new(market.clone()));
    tools.register(TopHoldersTool::new(market.clone()));
    tools.register(GraduatedTokensTool::new(market.clone()));
    tools.register(WalletSwapsTool::new(market.clone()));

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    // Build application state
    let state = AppState {
        provider,
        tools: Arc::new(tools),
        market,
        default_model,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health
        .route("/health", get(health_check))
        // Agent API
        .route("/api/agent/ask", post(ask_handler))
        .route("/api/agent/ask/stream", post(ask_stream_handler))
        // Market data API
        .route("/api/token", get(token_handler))
        .route("/api/top-holders", get(top_holders_handler))
        .route("/api/new-tokens", get(new_tokens_handler))
        .route("/api/history", get(history_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 token-intel agent server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  POST /api/agent/ask        - Ask the agent");
    tracing::info!("  POST /api/agent/ask/stream - Ask with server-side streaming");
    tracing::info!("  GET  /api/token            - Token report (?ca=)");
    tracing::info!("  GET  /api/top-holders      - Top holders (?address=&limit=)");
    tracing::info!("  GET  /api/new-tokens       - Fresh graduated launches (?limit=)");
    tracing::info!("  GET  /api/history          - Wallet swap history (?wallet=&limit=)");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
