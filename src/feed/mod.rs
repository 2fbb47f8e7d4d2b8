//! # Market Feed
//!
//! This module turns a curated pair list and an RPC endpoint into the pool
//! quotes one evaluation round runs on.

/// Pair-list file model and loading
pub mod pairs;
/// Reserve snapshots and the liquidity floor
pub mod reserves;
