use std::fmt;

use alloy::primitives::{Address, U256};
use num_rational::BigRational;

use crate::arb::error::ArbError;
use crate::arb::numeric;

/// One directed quote between two assets in a constant-product pool.
///
/// `reserve_from` is the reserve of the asset paid in, `reserve_to` the
/// reserve of the asset received, both in the ledger's smallest units.
/// Construction validates the reserves, so a `Pool` value can always be
/// priced and never divides by zero. Immutable once built for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    /// Symbol of the asset paid in.
    from_symbol: String,
    /// Symbol of the asset received.
    to_symbol: String,
    /// Ledger address of the asset paid in.
    from_address: Address,
    /// Ledger address of the asset received.
    to_address: Address,
    /// Address of the pool contract this quote came from.
    pair_address: Address,
    /// Reserve on the paid-in side.
    reserve_from: U256,
    /// Reserve on the received side.
    reserve_to: U256,
}

impl Pool {
    /// Builds a validated directed quote.
    ///
    /// # Errors
    /// Returns [`ArbError::InvalidPool`] when either reserve is zero; a
    /// drained pool cannot quote a price.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        from_symbol: impl Into<String>,
        from_address: Address,
        to_symbol: impl Into<String>,
        to_address: Address,
        pair_address: Address,
        reserve_from: U256,
        reserve_to: U256,
    ) -> Result<Self, ArbError> {
        let from_symbol = from_symbol.into();
        let to_symbol = to_symbol.into();
        if reserve_from.is_zero() || reserve_to.is_zero() {
            return Err(ArbError::InvalidPool {
                from: from_symbol,
                to: to_symbol,
                reason: format!("zero reserve ({reserve_from}, {reserve_to})"),
            });
        }
        Ok(Self {
            from_symbol,
            to_symbol,
            from_address,
            to_address,
            pair_address,
            reserve_from,
            reserve_to,
        })
    }

    /// Symbol of the asset paid in.
    #[must_use]
    pub fn from_symbol(&self) -> &str {
        &self.from_symbol
    }

    /// Symbol of the asset received.
    #[must_use]
    pub fn to_symbol(&self) -> &str {
        &self.to_symbol
    }

    /// Ledger address of the asset paid in.
    #[must_use]
    pub const fn from_address(&self) -> Address {
        self.from_address
    }

    /// Ledger address of the asset received.
    #[must_use]
    pub const fn to_address(&self) -> Address {
        self.to_address
    }

    /// Address of the pool contract this quote came from.
    #[must_use]
    pub const fn pair_address(&self) -> Address {
        self.pair_address
    }

    /// Reserve on the paid-in side.
    #[must_use]
    pub const fn reserve_from(&self) -> U256 {
        self.reserve_from
    }

    /// Reserve on the received side.
    #[must_use]
    pub const fn reserve_to(&self) -> U256 {
        self.reserve_to
    }

    /// Exact quote price: received units per paid-in unit, before fees.
    #[must_use]
    pub fn price(&self) -> BigRational {
        BigRational::new(
            numeric::big_from_u256(self.reserve_to),
            numeric::big_from_u256(self.reserve_from),
        )
    }

    /// Shortest-path edge weight, `-ln(price)`. Log-domain weights are the
    /// one place floating point is allowed.
    #[must_use]
    pub fn log_weight(&self) -> f64 {
        -numeric::approx_f64(&self.price()).ln()
    }

    /// The same pool quoted in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from_symbol: self.to_symbol.clone(),
            to_symbol: self.from_symbol.clone(),
            from_address: self.to_address,
            to_address: self.from_address,
            pair_address: self.pair_address,
            reserve_from: self.reserve_to,
            reserve_to: self.reserve_from,
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}/{})",
            self.from_symbol, self.to_symbol, self.reserve_from, self.reserve_to
        )
    }
}
