//! Per-source evaluation: detect a loop, reduce it, size it, report it.
//!
//! One evaluation is a pure function of the market snapshot. The detector
//! proposes a loop on float weights; everything that decides money — the
//! fold, the optimal size, the payoff — runs in the exact layer, so a
//! proposed loop that cannot actually pay its fees is sized to nothing and
//! reported as [`Outcome::NoOpportunity`] rather than traded.

use alloy::primitives::U256;
use itertools::Itertools;
use num_rational::BigRational;
use num_traits::Signed;
use petgraph::graph::NodeIndex;

use crate::arb::detector;
use crate::arb::error::ArbError;
use crate::arb::formula;
use crate::arb::market::MarketGraph;
use crate::arb::numeric::{self, FeeRate};
use crate::arb::pool::Pool;
use crate::arb::reduce;

/// Which arithmetic sizes the trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VolumeMode {
    /// Exact rationals end to end, rounded once at the final step.
    #[default]
    Exact,
    /// Floor division after every fee multiplication, the way the venue's
    /// contracts compute. The error compounds per hop and understates
    /// small opportunities.
    Truncating,
}

/// A sized opportunity: push `amount_in` around `path` to net `profit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    /// Trade size in the starting asset's smallest units.
    pub amount_in: U256,
    /// Net gain at that size, in the same units.
    pub profit: U256,
    /// Loop symbols in trade order, first symbol repeated at the end.
    pub path: Vec<String>,
    /// Compounded pre-fee price ratio around the loop.
    pub expected_return: BigRational,
}

/// What evaluating one source asset produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No loop reachable from the source, or no size at which a loop nets
    /// a gain after fees and rounding.
    NoOpportunity,
    /// A loop worth trading, with its size and expected profit.
    Opportunity(Opportunity),
}

impl Outcome {
    /// The contained opportunity, if one was found.
    #[must_use]
    pub fn opportunity(&self) -> Option<&Opportunity> {
        match self {
            Self::NoOpportunity => None,
            Self::Opportunity(opportunity) => Some(opportunity),
        }
    }
}

/// Sizes compounding loops found in a market snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    /// Net fee multiplier applied on every hop.
    fee: FeeRate,
    /// Arithmetic used by the reducer and solver.
    mode: VolumeMode,
}

impl Evaluator {
    /// An evaluator with an explicit fee and volume mode.
    #[must_use]
    pub const fn new(fee: FeeRate, mode: VolumeMode) -> Self {
        Self { fee, mode }
    }

    /// Net fee multiplier applied on every hop.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Arithmetic used by the reducer and solver.
    #[must_use]
    pub const fn mode(&self) -> VolumeMode {
        self.mode
    }

    /// Evaluates one source asset against the market snapshot.
    ///
    /// # Errors
    /// [`ArbError::UnknownSourceAsset`] when `source` was never interned;
    /// otherwise only the internal invariant failures of the detector and
    /// the exact layer, none of which a valid market produces.
    pub fn evaluate(&self, market: &MarketGraph, source: &str) -> Result<Outcome, ArbError> {
        let node = market
            .node(source)
            .ok_or_else(|| ArbError::UnknownSourceAsset(source.to_string()))?;
        let Some(cycle) = detector::find_negative_cycle(market, node)? else {
            return Ok(Outcome::NoOpportunity);
        };
        let pools = loop_pools(market, &cycle)?;

        let (amount_in, profit) = match self.mode {
            VolumeMode::Exact => {
                let (ea, eb) = reduce::effective_reserves(&pools, &self.fee)?;
                let amount_in = formula::optimal_input(&ea, &eb, &self.fee)?;
                if !amount_in.is_positive() {
                    return Ok(Outcome::NoOpportunity);
                }
                let profit = formula::output_given_input(&ea, &eb, &amount_in, &self.fee)?;
                (amount_in, profit)
            }
            VolumeMode::Truncating => {
                let (ea, eb) = reduce::effective_reserves_trunc(&pools, &self.fee)?;
                let amount_in = formula::optimal_input_trunc(&ea, &eb, &self.fee)?;
                if !amount_in.is_positive() {
                    return Ok(Outcome::NoOpportunity);
                }
                let profit = formula::output_given_input_trunc(&ea, &eb, &amount_in, &self.fee)?;
                (amount_in, profit)
            }
        };
        if !profit.is_positive() {
            return Ok(Outcome::NoOpportunity);
        }

        Ok(Outcome::Opportunity(Opportunity {
            amount_in: numeric::u256_from_big(&amount_in)?,
            profit: numeric::u256_from_big(&profit)?,
            path: cycle
                .iter()
                .map(|&node| symbol_at(market, node))
                .collect(),
            expected_return: pools.iter().map(Pool::price).product(),
        }))
    }
}

/// The stored quote behind each consecutive loop hop, in trade order.
fn loop_pools(market: &MarketGraph, cycle: &[NodeIndex]) -> Result<Vec<Pool>, ArbError> {
    cycle
        .iter()
        .copied()
        .tuple_windows()
        .map(|(from, to)| {
            market
                .pool_between(from, to)
                .cloned()
                .ok_or_else(|| ArbError::MissingLoopEdge {
                    from: symbol_at(market, from),
                    to: symbol_at(market, to),
                })
        })
        .collect()
}

/// Display symbol at a node, or its raw index when unnamed.
fn symbol_at(market: &MarketGraph, node: NodeIndex) -> String {
    market
        .asset(node)
        .map_or_else(|| format!("#{}", node.index()), |asset| asset.symbol().to_string())
}
