use alloy::primitives::{Address, U256};

use crate::arb::market::MarketGraph;
use crate::arb::pool::Pool;

/// Deterministic address for a symbol, so repeated mentions intern alike.
#[allow(dead_code)]
fn symbol_address(symbol: &str) -> Address {
    let mut bytes = [0u8; 20];
    for (slot, byte) in bytes.iter_mut().zip(symbol.bytes().cycle()) {
        *slot = byte;
    }
    Address::from(bytes)
}

/// A validated directed quote between two symbols.
#[allow(dead_code)]
#[allow(clippy::unwrap_used)]
pub fn pool(from: &str, to: &str, reserve_from: u64, reserve_to: u64) -> Pool {
    Pool::try_new(
        from,
        symbol_address(from),
        to,
        symbol_address(to),
        symbol_address(&format!("{from}:{to}")),
        U256::from(reserve_from),
        U256::from(reserve_to),
    )
    .unwrap()
}

/// A market built from `(from, to, reserve_from, reserve_to)` quotes under
/// the default edge policy.
#[allow(dead_code)]
pub fn market(pool_args: &[(&str, &str, u64, u64)]) -> MarketGraph {
    let mut market = MarketGraph::new();
    for (from, to, reserve_from, reserve_to) in pool_args {
        market.add_pool(&pool(from, to, *reserve_from, *reserve_to));
    }
    market
}

/// The three-pool loop used across the detector and evaluator tests:
/// A -> B (100, 100), B -> C (50, 90), C -> A (30, 45). Its only negative
/// cycle is A -> B -> C -> A with a pre-fee return of 27/10.
#[allow(dead_code)]
pub fn triangle_market() -> MarketGraph {
    market(&[
        ("A", "B", 100, 100),
        ("B", "C", 50, 90),
        ("C", "A", 30, 45),
    ])
}
