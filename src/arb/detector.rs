//! Negative-cycle detection over log-domain edge weights.
//!
//! Bellman-Ford relaxes every edge up to `node_count - 1` times, stopping
//! early once a pass changes nothing. A loop whose prices compound above
//! one has log weights summing below zero, so one extra relaxation pass
//! that still finds an improvable edge proves such a loop is reachable from
//! the source. The loop itself is then read out of the predecessor chain.

use petgraph::graph::NodeIndex;

use crate::arb::error::ArbError;
use crate::arb::market::MarketGraph;

/// Distances and predecessors from one Bellman-Ford run.
#[derive(Debug)]
pub struct ShortestPaths {
    /// Distance from the source, by node index. Unreached nodes stay
    /// at infinity.
    distances: Vec<f64>,
    /// Relaxation predecessor, by node index.
    predecessors: Vec<Option<NodeIndex>>,
}

impl ShortestPaths {
    /// Distance from the source to `node`, infinity when unreached.
    #[must_use]
    pub fn distance(&self, node: NodeIndex) -> f64 {
        self.distances
            .get(node.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// The node that last relaxed `node`, if any pass did.
    #[must_use]
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.predecessors.get(node.index()).copied().flatten()
    }
}

/// Runs Bellman-Ford from `source` over the market's edge snapshot.
///
/// # Panics
/// `source` must be a node of `market`.
#[must_use]
pub fn bellman_ford(market: &MarketGraph, source: NodeIndex) -> ShortestPaths {
    let size = market.node_count();
    let mut distances = vec![f64::INFINITY; size];
    let mut predecessors: Vec<Option<NodeIndex>> = vec![None; size];
    distances[source.index()] = 0.0;

    for _ in 1..size {
        let mut changed = false;
        for (from, to, quote) in market.edges() {
            let candidate = distances[from.index()] + quote.weight();
            if candidate < distances[to.index()] {
                distances[to.index()] = candidate;
                predecessors[to.index()] = Some(from);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    ShortestPaths {
        distances,
        predecessors,
    }
}

/// Looks for a compounding loop reachable from `source`.
///
/// Returns the loop's nodes in trade order, first node repeated at the end.
/// The loop closes at whichever node the predecessor walk revisits first,
/// which need not be `source` itself. `None` means no such loop exists, or
/// that the walk from `source` dead-ends before entering one.
///
/// # Errors
/// [`ArbError::CycleReconstructionOverflow`] when the walk runs a full node
/// count of steps without closing, which a well-formed predecessor map
/// cannot produce.
///
/// # Panics
/// `source` must be a node of `market`.
pub fn find_negative_cycle(
    market: &MarketGraph,
    source: NodeIndex,
) -> Result<Option<Vec<NodeIndex>>, ArbError> {
    if market.node_count() < 2 {
        return Ok(None);
    }
    let paths = bellman_ford(market, source);
    let improvable = market
        .edges()
        .any(|(from, to, quote)| paths.distance(from) + quote.weight() < paths.distance(to));
    if !improvable {
        return Ok(None);
    }
    trade_loop(&paths, source, market.node_count())
}

/// Walks the predecessor chain from `source` until a node repeats, then
/// returns the closed slice. Predecessor edges point against the direction
/// of trading, so the slice is reversed before it is handed back.
fn trade_loop(
    paths: &ShortestPaths,
    source: NodeIndex,
    node_count: usize,
) -> Result<Option<Vec<NodeIndex>>, ArbError> {
    let mut walk = vec![source];
    let mut first_seen: Vec<Option<usize>> = vec![None; node_count];
    first_seen[source.index()] = Some(0);

    let mut current = source;
    for step in 1..=node_count {
        let Some(previous) = paths.predecessor(current) else {
            // The chain from this source never feeds into the loop.
            return Ok(None);
        };
        walk.push(previous);
        if let Some(start) = first_seen[previous.index()] {
            let mut cycle = walk.split_off(start);
            cycle.reverse();
            return Ok(Some(cycle));
        }
        first_seen[previous.index()] = Some(step);
        current = previous;
    }

    Err(ArbError::CycleReconstructionOverflow { steps: node_count })
}
