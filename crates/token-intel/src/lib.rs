//! # token-intel
//!
//! Solana token intelligence for a tool-augmented chat agent: market data
//! providers, a deterministic risk scoring engine, and the four data-fetch
//! tools the agent can invoke (token lookup, top holders, fresh launches,
//! wallet swap history).
//!
//! ## Layout
//!
//! - [`market`] - `MarketDataClient` trait plus the dexscreener/Moralis HTTP
//!   client and a fixture-backed mock
//! - [`risk`] - pure scoring: trade verdict, LP status, bounded rug score
//! - [`report`] - assembles the full token lookup payload
//! - [`svckit`] - the `agent_core::Tool` implementations

pub mod error;
pub mod market;
pub mod model;
pub mod report;
pub mod risk;
pub mod svckit;

pub use error::{IntelError, Result};
pub use market::{HttpMarketDataClient, MarketDataClient, MockMarketDataClient};
pub use model::{Holder, LaunchedToken, SwapTransaction, TokenMarket, TokenReport};
pub use risk::{LpStatus, RiskAssessment, Verdict};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{GraduatedTokensTool, TokenDataTool, TopHoldersTool, WalletSwapsTool};
}

/// System prompt for the token intelligence agent
pub const TOKEN_AGENT_PROMPT: &str = r#"You are DMJ, a sharp, helpful crypto agent that helps users check Solana token stats, top holders, new launches, and wallet activity.
You can chat normally with the user AND you can use tools for crypto-specific queries.

AVAILABLE TOOLS:
1. 'get_token_data(ca)' — ONLY if the user asks for token stats (price, FDV, symbol, volume). Requires a valid token/contract address.
2. 'get_top_holders(address, limit)' — ONLY if the user explicitly asks for top holders of a token. Requires a valid token address.
3. 'get_graduated_tokens(limit)' — ONLY if the user explicitly asks about new tokens, fresh launches, or recently bonded tokens. No input required.
4. 'get_wallet_swaps(wallet, limit)' — ONLY if the user explicitly asks for wallet activity, buys, sells, or swaps. Requires a valid wallet address.

VERY IMPORTANT RULES:
- Do NOT call any tool unless the user explicitly requests one of the above crypto actions.
- For questions like "what can you do?", greetings, or general chat, reply naturally — DO NOT use tools.
- If a required parameter (like a token address) is missing, politely ask for it instead of guessing.
- Never fabricate answers. Always rely on tools for real-time data.
- Always treat Solana addresses as case-sensitive (32-44 characters).
- For regular chat: keep responses short, confident, and user-friendly.
- For tool results: do NOT output raw JSON. Convert the output into clear, readable responses.
- Never explain tool logic or mention tools unless you are calling one."#;
