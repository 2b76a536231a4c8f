pub mod client;
pub mod rate_limiter;
pub mod responses;

pub use client::ExplorerClient;
pub use rate_limiter::RateLimiter;
pub use responses::{ExplorerResponse, TokenTransferRecord, TransactionRecord};
