//! Service configuration from environment variables
//!
//! Optional keys degrade the related feature with a warning rather than
//! failing startup, matching the pass-through policy for everything the bot
//! does not strictly need.

const DEFAULT_IC_API: &str = "https://ic-api.internetcomputer.org";
const DEFAULT_LEDGER_API: &str = "https://ledger-api.internetcomputer.org";
const DEFAULT_SNS_API: &str = "https://sns-api.internetcomputer.org";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the IC dashboard API.
    pub ic_api_base: String,
    pub ledger_api_base: String,
    pub sns_api_base: String,
    /// OpenChat public key, carried for the platform handshake only; the bot
    /// never verifies signatures itself.
    pub oc_public: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            port,
            ic_api_base: std::env::var("IC_HOST").unwrap_or_else(|_| DEFAULT_IC_API.to_string()),
            ledger_api_base: std::env::var("LEDGER_HOST")
                .unwrap_or_else(|_| DEFAULT_LEDGER_API.to_string()),
            sns_api_base: std::env::var("SNS_HOST")
                .unwrap_or_else(|_| DEFAULT_SNS_API.to_string()),
            oc_public: std::env::var("OC_PUBLIC").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string()),
        }
    }
}
