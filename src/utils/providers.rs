use alloy::network::Ethereum;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use eyre::Result;
use url::Url;

use crate::config::Config;

/// Creates the HTTP provider the reserve fetcher reads through.
///
/// # Errors
/// * If the configured RPC URL does not parse
pub fn create_http_provider(config: &Config) -> Result<RootProvider<Ethereum>> {
    let url = Url::parse(&config.rpc_url)?;
    let provider = ProviderBuilder::new().on_http(url);
    Ok((*provider.root()).clone())
}
