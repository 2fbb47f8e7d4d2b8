//! Runtime configuration.
//!
//! Everything is environment-driven with venue defaults baked in, so the
//! binary runs against the reference venue with no configuration at all.
//! Unparsable values fall back to their defaults rather than aborting.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::U256;

use crate::arb::evaluate::VolumeMode;
use crate::arb::market::EdgePolicy;
use crate::feed::reserves::MIN_RESERVE;

/// Runtime configuration for one bot process.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP RPC endpoint reserves are fetched from.
    pub rpc_url: String,
    /// Path of the pair-list JSON file.
    pub pairs_file: PathBuf,
    /// Source assets evaluated each round.
    pub sources: Vec<String>,
    /// Delay between watch rounds.
    pub interval: Duration,
    /// Number of watch rounds before exiting.
    pub rounds: u32,
    /// Liquidity floor applied to fetched reserves.
    pub min_reserve: U256,
    /// Venue trading fee in basis points.
    pub fee_bps: u32,
    /// Edge replacement rule for the market graph.
    pub edge_policy: EdgePolicy,
    /// Arithmetic used to size trades.
    pub volume_mode: VolumeMode,
    /// Evaluate from pinned reserves instead of fetching.
    pub offline: bool,
}

impl Config {
    /// Builds the configuration from `GYRE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let edge_policy = match env_or("GYRE_EDGE_POLICY", "asymmetric").as_str() {
            "best-rate" => EdgePolicy::BestRate,
            _ => EdgePolicy::Asymmetric,
        };
        let volume_mode = match env_or("GYRE_VOLUME_MODE", "exact").as_str() {
            "truncating" => VolumeMode::Truncating,
            _ => VolumeMode::Exact,
        };

        Self {
            rpc_url: env_or("GYRE_RPC_URL", "https://bsc-dataseed.binance.org/"),
            pairs_file: PathBuf::from(env_or("GYRE_PAIRS_FILE", "pairs.json")),
            sources: parse_sources(&env_or("GYRE_SOURCES", "WBNB,BUSD,USDT")),
            interval: Duration::from_secs(parse_env("GYRE_INTERVAL_SECS", 10)),
            rounds: parse_env("GYRE_ROUNDS", 5),
            min_reserve: parse_env("GYRE_MIN_RESERVE", MIN_RESERVE),
            fee_bps: parse_env("GYRE_FEE_BPS", 250),
            edge_policy,
            volume_mode,
            offline: matches!(env_or("GYRE_OFFLINE", "").as_str(), "1" | "true"),
        }
    }
}

/// An environment variable, or `default` when unset.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// A parsed environment variable, or `default` when unset or unparsable.
fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Splits a comma list of symbols, dropping empty entries.
fn parse_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}
