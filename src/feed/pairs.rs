//! The tradable-pair list.
//!
//! A JSON file names each pool contract and the two tokens it trades. One
//! file entry produces one directed quote, token0 to token1; the market
//! graph derives the reverse direction itself. Entries may pin reserves so
//! a market can be evaluated without touching a node.

use std::fs;
use std::path::Path;

use alloy::primitives::{Address, U256};
use eyre::{Result, WrapErr};
use serde::Deserialize;

/// One token leg of a pair entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    /// Display symbol, the graph's node key.
    pub symbol: String,
    /// Token contract address.
    pub address: Address,
}

/// One tradable pair: the pool contract plus both token legs.
#[derive(Debug, Clone, Deserialize)]
pub struct PairEntry {
    /// Pool contract address.
    pub pair: Address,
    /// The paid-in leg of the directed quote.
    pub token0: TokenEntry,
    /// The received leg of the directed quote.
    pub token1: TokenEntry,
    /// Pinned reserve of token0, for offline evaluation.
    #[serde(default)]
    pub reserve0: Option<U256>,
    /// Pinned reserve of token1, for offline evaluation.
    #[serde(default)]
    pub reserve1: Option<U256>,
}

impl PairEntry {
    /// Both pinned reserves, when the entry carries them.
    #[must_use]
    pub fn embedded_reserves(&self) -> Option<(U256, U256)> {
        self.reserve0.zip(self.reserve1)
    }
}

/// Parses a pair-list document.
///
/// # Errors
/// Malformed JSON or a malformed address fails the whole document; a pair
/// list is small and curated, so a bad entry means a bad file.
pub fn parse_pairs(raw: &str) -> Result<Vec<PairEntry>> {
    serde_json::from_str(raw).wrap_err("malformed pair list")
}

/// Loads and parses the pair-list file at `path`.
///
/// # Errors
/// The file must exist, be readable and parse as a pair-list document.
pub fn load_pairs(path: &Path) -> Result<Vec<PairEntry>> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading pair list {}", path.display()))?;
    parse_pairs(&raw)
}
