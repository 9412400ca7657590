use clap::Parser;
use std::net::SocketAddr;

/// Process configuration, parsed once at startup and passed into
/// constructors explicitly. Nothing reads the environment after this.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the callback server binds to
    #[arg(long, env = "TIXGATE_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    /// Payment provider API base URL
    #[arg(
        long,
        env = "PAWAPAY_BASE_URL",
        default_value = "https://api.sandbox.pawapay.cloud"
    )]
    pub provider_base_url: String,

    /// Payment provider API token
    #[arg(long, env = "PAWAPAY_API_TOKEN")]
    pub provider_api_token: String,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_token: String,
}

impl Config {
    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.provider_base_url.clone(),
            api_token: self.provider_api_token.clone(),
        }
    }
}
