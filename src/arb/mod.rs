//! # Arbitrage Module
//!
//! This module contains the core arbitrage detection and sizing logic.
//! It finds loops of pool quotes whose prices compound above one and
//! computes the input size that extracts the most profit from them.

/// Negative-cycle detection over log-domain weights
pub mod detector;
/// Error surface of the core
pub mod error;
/// Per-source evaluation pipeline
pub mod evaluate;
/// Constant-product pool math
pub mod formula;
/// Market graph of assets and quotes
pub mod market;
/// Exact arithmetic and fee rates
pub mod numeric;
/// Directed pool quotes
pub mod pool;
/// Loop reduction into effective reserves
pub mod reduce;
/// Test helpers and utilities
mod test_helpers;
