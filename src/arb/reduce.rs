//! Folding a multi-hop loop into one equivalent two-reserve pool.
//!
//! A loop of constant-product pools behaves, for sizing purposes, like a
//! single pool with effective reserves `(Ea, Eb)` in the starting asset and
//! its round-trip image. The fold seeds `(Ea, Eb)` from the first pool and
//! absorbs one downstream pool per step, so a single-pool loop reduces to
//! itself. The exact fold keeps rationals end to end; the truncating twin
//! floors after every step, predicting what the venue's integer arithmetic
//! would actually pay out.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::arb::error::ArbError;
use crate::arb::formula;
use crate::arb::numeric::{self, FeeRate};
use crate::arb::pool::Pool;

/// Effective reserves of an ordered loop, in the first pool's input asset.
///
/// # Errors
/// [`ArbError::EmptyLoop`] when `pools` is empty.
pub fn effective_reserves(
    pools: &[Pool],
    fee: &FeeRate,
) -> Result<(BigRational, BigRational), ArbError> {
    let (first, rest) = pools.split_first().ok_or(ArbError::EmptyLoop)?;
    let mut ea = numeric::rational_from_u256(first.reserve_from());
    let mut eb = numeric::rational_from_u256(first.reserve_to());
    for pool in rest {
        let convert_from = numeric::rational_from_u256(pool.reserve_from());
        let convert_to = numeric::rational_from_u256(pool.reserve_to());
        let folded_ea = formula::forward_quote(&ea, &eb, &convert_from, fee);
        let folded_eb = formula::backward_quote(&eb, &convert_from, &convert_to, fee);
        ea = folded_ea;
        eb = folded_eb;
    }
    Ok((ea, eb))
}

/// Truncating-integer twin of [`effective_reserves`].
///
/// # Errors
/// [`ArbError::EmptyLoop`] when `pools` is empty.
pub fn effective_reserves_trunc(
    pools: &[Pool],
    fee: &FeeRate,
) -> Result<(BigInt, BigInt), ArbError> {
    let (first, rest) = pools.split_first().ok_or(ArbError::EmptyLoop)?;
    let mut ea = numeric::big_from_u256(first.reserve_from());
    let mut eb = numeric::big_from_u256(first.reserve_to());
    for pool in rest {
        let convert_from = numeric::big_from_u256(pool.reserve_from());
        let convert_to = numeric::big_from_u256(pool.reserve_to());
        let folded_ea = formula::forward_quote_trunc(&ea, &eb, &convert_from, fee);
        let folded_eb = formula::backward_quote_trunc(&eb, &convert_from, &convert_to, fee);
        ea = folded_ea;
        eb = folded_eb;
    }
    Ok((ea, eb))
}
