//! The market graph: assets as nodes, directed pool quotes as edges.
//!
//! Symbols are interned to sequential node ids on first sight. Each edge
//! carries the exact [`Pool`] it came from plus its log-domain weight, so the
//! detector can run Bellman-Ford on floats while the evaluator prices the
//! discovered loop exactly. The graph is built once per round and read-only
//! afterwards; `edges()` therefore iterates a stable snapshot in insertion
//! order.

use std::collections::HashMap;

use alloy::primitives::Address;
use num_rational::BigRational;
use num_traits::Zero;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::arb::pool::Pool;

/// How a fresh quote replaces the edges already held for its asset pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// When at least one endpoint is new, insert both directions. When both
    /// endpoints already exist, compare the fresh forward price against the
    /// held forward edge (a missing edge counts as price zero): strictly
    /// higher overwrites the forward edge only, otherwise the reverse edge
    /// only. The untouched direction keeps its older quote, so the two
    /// directions of a pair can disagree about which pool they cite.
    #[default]
    Asymmetric,
    /// Keep, per direction independently, whichever quote prices higher.
    /// Both directions always cite their own best pool.
    BestRate,
}

/// One interned asset: a graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Display symbol, unique within one graph.
    symbol: String,
    /// Ledger address recorded when the symbol was first seen.
    address: Address,
}

impl Asset {
    /// Display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Ledger address recorded when the symbol was first seen.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }
}

/// One directed edge: the relaxation weight plus its originating quote.
#[derive(Debug, Clone)]
pub struct EdgeQuote {
    /// `-ln(price)`, the Bellman-Ford relaxation weight.
    weight: f64,
    /// The exact quote backing the weight.
    pool: Pool,
}

impl EdgeQuote {
    /// `-ln(price)`, the Bellman-Ford relaxation weight.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// The exact quote backing the weight.
    #[must_use]
    pub const fn pool(&self) -> &Pool {
        &self.pool
    }
}

/// A directed graph of assets and pool quotes for one evaluation round.
#[derive(Debug, Default)]
pub struct MarketGraph {
    /// Asset nodes and quote edges.
    graph: DiGraph<Asset, EdgeQuote>,
    /// Symbol interning table, first sight wins.
    symbols: HashMap<String, NodeIndex>,
    /// Replacement rule applied by [`MarketGraph::add_pool`].
    policy: EdgePolicy,
}

impl MarketGraph {
    /// An empty graph with the default [`EdgePolicy::Asymmetric`] rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph with an explicit replacement rule.
    #[must_use]
    pub fn with_policy(policy: EdgePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Interns `symbol`, creating a node on first sight. A repeated symbol
    /// keeps the node (and address) it was first interned with.
    pub fn add_node(&mut self, symbol: &str, address: Address) -> NodeIndex {
        self.intern(symbol, address).0
    }

    /// Interns `symbol`, reporting whether the node already existed.
    fn intern(&mut self, symbol: &str, address: Address) -> (NodeIndex, bool) {
        if let Some(&node) = self.symbols.get(symbol) {
            return (node, true);
        }
        let node = self.graph.add_node(Asset {
            symbol: symbol.to_string(),
            address,
        });
        self.symbols.insert(symbol.to_string(), node);
        (node, false)
    }

    /// Sets the single directed edge `from -> to`, overwriting any held one.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: f64, pool: Pool) {
        self.graph.update_edge(from, to, EdgeQuote { weight, pool });
    }

    /// Feeds one directed quote into the graph under the configured
    /// [`EdgePolicy`]. Endpoint symbols are interned as a side effect.
    pub fn add_pool(&mut self, pool: &Pool) {
        let (from, from_existed) = self.intern(pool.from_symbol(), pool.from_address());
        let (to, to_existed) = self.intern(pool.to_symbol(), pool.to_address());
        match self.policy {
            EdgePolicy::Asymmetric => {
                if from_existed && to_existed {
                    let held = self
                        .held_price(from, to)
                        .unwrap_or_else(BigRational::zero);
                    if pool.price() > held {
                        self.add_edge(from, to, pool.log_weight(), pool.clone());
                    } else {
                        let reversed = pool.reversed();
                        self.add_edge(to, from, reversed.log_weight(), reversed);
                    }
                } else {
                    let reversed = pool.reversed();
                    self.add_edge(from, to, pool.log_weight(), pool.clone());
                    self.add_edge(to, from, reversed.log_weight(), reversed);
                }
            }
            EdgePolicy::BestRate => {
                self.keep_best(from, to, pool.clone());
                self.keep_best(to, from, pool.reversed());
            }
        }
    }

    /// Overwrites `from -> to` only when `pool` prices strictly higher than
    /// the held edge.
    fn keep_best(&mut self, from: NodeIndex, to: NodeIndex, pool: Pool) {
        let improves = self
            .held_price(from, to)
            .map_or(true, |held| pool.price() > held);
        if improves {
            self.add_edge(from, to, pool.log_weight(), pool);
        }
    }

    /// Price of the held `from -> to` edge, if any.
    fn held_price(&self, from: NodeIndex, to: NodeIndex) -> Option<BigRational> {
        self.pool_between(from, to).map(Pool::price)
    }

    /// Node id for a symbol, if it was ever interned.
    #[must_use]
    pub fn node(&self, symbol: &str) -> Option<NodeIndex> {
        self.symbols.get(symbol).copied()
    }

    /// The asset stored at a node.
    #[must_use]
    pub fn asset(&self, node: NodeIndex) -> Option<&Asset> {
        self.graph.node_weight(node)
    }

    /// The quote held on the directed edge `from -> to`.
    #[must_use]
    pub fn pool_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&Pool> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(EdgeQuote::pool)
    }

    /// All directed edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &EdgeQuote)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    /// Out-neighbors of a node.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(node)
    }

    /// Number of interned assets.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
