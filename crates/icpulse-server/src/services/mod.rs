//! Upstream API clients
//!
//! - `dashboard` - IC dashboard API (metrics, proposals, neurons, canisters)
//! - `ledger` - ICP ledger supply endpoints and the CoinGecko price feed
//! - `sns` - SNS registry API
//! - `groq` - Groq chat-completion provider
//! - `jokes` - random joke API

pub mod dashboard;
pub mod groq;
pub mod jokes;
pub mod ledger;
pub mod sns;

pub use dashboard::DashboardApi;
pub use groq::GroqProvider;
pub use jokes::JokeApi;
pub use ledger::{LedgerApi, UsdPrice};
pub use sns::SnsApi;
