//! HTTP Handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use agent_core::{
    agent::{Agent, AgentConfig},
    error::AgentError,
    provider::GenerationOptions,
};
use token_intel::{
    error::IntelError,
    model::{Holder, LaunchedToken, SwapTransaction, TokenReport},
    report::build_token_report,
    svckit::{DEFAULT_LAUNCH_LIMIT, DEFAULT_LIST_LIMIT},
    TOKEN_AGENT_PROMPT,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_connected: bool,
    pub market_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct StreamAskResponse {
    /// `None` when the stream closed before any visible text arrived
    pub answer: Option<String>,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub ca: String,
}

#[derive(Debug, Deserialize)]
pub struct HoldersQuery {
    pub address: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LaunchQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub wallet: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn agent_error(e: &AgentError) -> HandlerError {
    let (status, code) = match e {
        AgentError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        AgentError::ProviderUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "LLM_UNAVAILABLE"),
        AgentError::Provider(_) | AgentError::Parse(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "AGENT_ERROR"),
    };
    (
        status,
        Json(ErrorResponse {
            error: e.user_message(),
            code: code.into(),
        }),
    )
}

fn intel_error(e: &IntelError) -> HandlerError {
    let (status, code) = match e {
        IntelError::TokenNotFound(_) | IntelError::WalletNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        IntelError::Fetch { .. } | IntelError::Network(_) => {
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "MARKET_ERROR"),
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: code.into(),
        }),
    )
}

fn build_agent(state: &AppState, model: Option<String>) -> Agent {
    let config = AgentConfig {
        system_prompt: TOKEN_AGENT_PROMPT.into(),
        generation: GenerationOptions {
            model: model.unwrap_or_else(|| state.default_model.clone()),
            ..Default::default()
        },
    };

    Agent::new(state.provider.clone(), state.tools.clone(), config)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = state.provider.health_check().await.unwrap_or(false);
    let market_connected = state.market.health_check().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm_connected,
        market_connected,
    })
}

/// Single-shot question endpoint
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, HandlerError> {
    let agent = build_agent(&state, payload.model);
    let model = agent.config().generation.model.clone();

    let answer = agent.answer(&payload.question).await.map_err(|e| {
        tracing::error!("agent error: {}", e);
        agent_error(&e)
    })?;

    Ok(Json(AskResponse { answer, model }))
}

/// Streaming question endpoint.
///
/// The agent consumes the provider stream server-side and replies with the
/// first visible answer, or `null` if the stream produced none.
pub async fn ask_stream_handler(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<StreamAskResponse>, HandlerError> {
    let agent = build_agent(&state, payload.model);
    let model = agent.config().generation.model.clone();

    let answer = agent.answer_stream(&payload.question).await.map_err(|e| {
        tracing::error!("agent stream error: {}", e);
        agent_error(&e)
    })?;

    Ok(Json(StreamAskResponse { answer, model }))
}

/// Full token report for a contract address or search query
pub async fn token_handler(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<TokenReport>, HandlerError> {
    let report = build_token_report(state.market.as_ref(), &params.ca)
        .await
        .map_err(|e| {
            tracing::warn!(query = %params.ca, "token lookup failed: {}", e);
            intel_error(&e)
        })?;

    Ok(Json(report))
}

/// Top holders of a token
pub async fn top_holders_handler(
    State(state): State<AppState>,
    Query(params): Query<HoldersQuery>,
) -> Result<Json<Vec<Holder>>, HandlerError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let holders = state
        .market
        .top_holders(&params.address, limit)
        .await
        .map_err(|e| intel_error(&e))?;

    Ok(Json(holders))
}

/// Recently graduated launchpad tokens
pub async fn new_tokens_handler(
    State(state): State<AppState>,
    Query(params): Query<LaunchQuery>,
) -> Result<Json<Vec<LaunchedToken>>, HandlerError> {
    let limit = params.limit.unwrap_or(DEFAULT_LAUNCH_LIMIT);
    let launches = state
        .market
        .graduated_tokens(limit)
        .await
        .map_err(|e| intel_error(&e))?;

    Ok(Json(launches))
}

/// Swap history for a wallet
pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<SwapTransaction>>, HandlerError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let swaps = state
        .market
        .wallet_swaps(&params.wallet, limit)
        .await
        .map_err(|e| intel_error(&e))?;

    Ok(Json(swaps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let (status, body) = agent_error(&AgentError::InvalidInput("empty".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_INPUT");
    }

    #[test]
    fn test_provider_unavailable_maps_to_service_unavailable() {
        let (status, _) = agent_error(&AgentError::ProviderUnavailable("down".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_missing_token_maps_to_not_found() {
        let (status, body) = intel_error(&IntelError::TokenNotFound("XYZ".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[test]
    fn test_upstream_fetch_maps_to_bad_gateway() {
        let (status, body) = intel_error(&IntelError::Fetch {
            status: 429,
            message: "rate limited".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "UPSTREAM_ERROR");
    }
}
