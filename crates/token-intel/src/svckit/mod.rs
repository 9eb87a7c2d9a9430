//! Service Kit - Agent Tools
//!
//! The four registry tools the model may request. Tool names are snake_case
//! and live only in these schemas; the registry is the single source of
//! truth for both the provider-facing export and dispatch.

mod new_tokens;
mod token_data;
mod top_holders;
mod wallet_swaps;

pub use new_tokens::GraduatedTokensTool;
pub use token_data::TokenDataTool;
pub use top_holders::TopHoldersTool;
pub use wallet_swaps::WalletSwapsTool;

/// Default listing size for holders and swaps
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Default listing size for the launch feed
pub const DEFAULT_LAUNCH_LIMIT: usize = 20;
