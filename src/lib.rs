pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod services;
pub mod types;
pub mod utils;

pub use cache::TtlCache;
pub use config::Config;
pub use error::{FetchError, TransferError, ValidationError};
pub use services::DashboardServices;
pub use types::*;
