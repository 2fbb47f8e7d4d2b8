//! On-chain reserve snapshots and the liquidity floor.
//!
//! One round's market is built from a snapshot: every pair's `getReserves()`
//! fetched concurrently, dust pairs dropped, and the survivors turned into
//! directed quotes. Offline runs take the same path with the reserves pinned
//! in the pair-list file instead of fetched.

use alloy::network::Ethereum;
use alloy::primitives::U256;
use alloy::providers::RootProvider;
use alloy::sol;
use eyre::Result;
use futures::future::join_all;
use log::{debug, warn};

use crate::arb::pool::Pool;
use crate::feed::pairs::PairEntry;

// Minimal surface of a constant-product pair contract.
sol! {
    #[sol(rpc)]
    interface IConstantProductPair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
}

/// Reserves below this are dust: 0.01 of an 18-decimal asset. Pools this
/// shallow quote distorted prices and cannot absorb a trade worth routing.
pub const MIN_RESERVE: U256 = U256::from_limbs([10_u64.pow(16), 0, 0, 0]);

/// A pair entry with the reserves observed for one round.
pub type PairSnapshot = (PairEntry, U256, U256);

/// Fetches every pair's reserves concurrently. A pair whose call fails is
/// logged and left out of the round.
pub async fn collect_snapshots(
    provider: &RootProvider<Ethereum>,
    entries: &[PairEntry],
) -> Vec<PairSnapshot> {
    let tasks = entries.iter().map(|entry| pair_reserves(provider, entry));
    let results = join_all(tasks).await;

    let mut snapshots = Vec::with_capacity(entries.len());
    for (entry, result) in entries.iter().zip(results) {
        match result {
            Ok((reserve0, reserve1)) => snapshots.push((entry.clone(), reserve0, reserve1)),
            Err(error) => warn!("Skipping pair {}: {error}", entry.pair),
        }
    }
    snapshots
}

/// Reads one pair's reserves.
async fn pair_reserves(
    provider: &RootProvider<Ethereum>,
    entry: &PairEntry,
) -> Result<(U256, U256)> {
    let pair = IConstantProductPair::new(entry.pair, provider);
    let reserves = pair.getReserves().call().await?;
    Ok((
        U256::from(reserves.reserve0.to::<u128>()),
        U256::from(reserves.reserve1.to::<u128>()),
    ))
}

/// Snapshots from the reserves pinned in the pair-list file. Entries
/// without pinned reserves are skipped.
#[must_use]
pub fn embedded_snapshots(entries: &[PairEntry]) -> Vec<PairSnapshot> {
    let mut snapshots = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.embedded_reserves() {
            Some((reserve0, reserve1)) => snapshots.push((entry.clone(), reserve0, reserve1)),
            None => debug!("Pair {} has no pinned reserves, skipping offline", entry.pair),
        }
    }
    snapshots
}

/// Turns snapshots into directed quotes, token0 to token1, dropping pairs
/// with either reserve under `floor`.
#[must_use]
pub fn pools_from_snapshots(snapshots: &[PairSnapshot], floor: U256) -> Vec<Pool> {
    let mut pools = Vec::with_capacity(snapshots.len());
    for (entry, reserve0, reserve1) in snapshots {
        if *reserve0 < floor || *reserve1 < floor {
            debug!(
                "Skipping pair {}: reserves ({reserve0}, {reserve1}) under the floor",
                entry.pair
            );
            continue;
        }
        let quote = Pool::try_new(
            &entry.token0.symbol,
            entry.token0.address,
            &entry.token1.symbol,
            entry.token1.address,
            entry.pair,
            *reserve0,
            *reserve1,
        );
        match quote {
            Ok(pool) => pools.push(pool),
            Err(error) => warn!("Skipping pair {}: {error}", entry.pair),
        }
    }
    pools
}
