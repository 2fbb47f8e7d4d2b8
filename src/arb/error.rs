use thiserror::Error;

/// Errors surfaced by the arbitrage core.
///
/// Every variant is a local, synchronous failure; nothing in the core
/// retries. A loop that merely fails to be profitable is *not* an error and
/// is reported as [`crate::arb::evaluate::Outcome::NoOpportunity`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbError {
    /// A pool quote carried an unusable reserve. Pools are validated at
    /// construction, so the graph never holds one of these.
    #[error("invalid pool {from}/{to}: {reason}")]
    InvalidPool {
        /// Symbol of the paid-in asset.
        from: String,
        /// Symbol of the received asset.
        to: String,
        /// What failed validation.
        reason: String,
    },

    /// A configured source asset was never interned as a graph node.
    #[error("unknown source asset {0}")]
    UnknownSourceAsset(String),

    /// The predecessor walk ran a full node count of steps without closing
    /// a loop. Cannot happen while the predecessor map is well formed;
    /// surfaced instead of walking forever.
    #[error("cycle reconstruction gave up after {steps} steps")]
    CycleReconstructionOverflow {
        /// Number of walk steps taken before giving up.
        steps: usize,
    },

    /// An algebraic step left the domain of the exact layer, e.g. a negative
    /// radicand in the optimal-input solver. Only reachable with invalid
    /// reserves, so treat it as an invalid-pool symptom.
    #[error("arithmetic domain error: {0}")]
    ArithmeticDomain(String),

    /// A loop with no pools reached the reducer.
    #[error("cannot reduce an empty loop")]
    EmptyLoop,

    /// A consecutive loop pair had no backing edge in the graph.
    #[error("loop references missing edge {from} -> {to}")]
    MissingLoopEdge {
        /// Symbol at the hop's tail.
        from: String,
        /// Symbol at the hop's head.
        to: String,
    },
}
