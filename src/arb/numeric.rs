use std::cmp::Ordering;

use alloy::primitives::U256;
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::arb::error::ArbError;

/// Net-of-fee multiplier applied to the input side of every hop.
///
/// Held as an exact ratio so fee math never rounds on its own. The default
/// is the reference venue's 2.5% trading fee, i.e. a 975/1000 net
/// multiplier. Both legs fit in `u32` so the truncating integer formulas can
/// multiply and floor-divide without promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{numerator}/{denominator}")]
pub struct FeeRate {
    /// Numerator of the net multiplier.
    numerator: u32,
    /// Denominator of the net multiplier.
    denominator: u32,
}

impl FeeRate {
    /// Builds a net multiplier `numerator/denominator`, stored in lowest
    /// terms so equal rates compare equal.
    ///
    /// # Errors
    /// Rejects rates outside `(0, 1]`: a zero multiplier would erase every
    /// trade and a multiplier above one would mint value out of thin air.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ArbError> {
        if numerator == 0 || denominator == 0 || numerator > denominator {
            return Err(ArbError::ArithmeticDomain(format!(
                "net fee multiplier {numerator}/{denominator} is outside (0, 1]"
            )));
        }
        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Builds the net multiplier for a fee expressed in basis points
    /// (250 bps = 2.5% fee = 9750/10000 net).
    ///
    /// # Errors
    /// Rejects `fee_bps >= 10_000` (a 100% fee keeps nothing).
    pub fn from_bps(fee_bps: u32) -> Result<Self, ArbError> {
        if fee_bps >= 10_000 {
            return Err(ArbError::ArithmeticDomain(format!(
                "fee of {fee_bps} bps consumes the whole input"
            )));
        }
        Self::new(10_000 - fee_bps, 10_000)
    }

    /// The multiplier as an exact rational.
    #[must_use]
    pub fn ratio(&self) -> BigRational {
        BigRational::new(BigInt::from(self.numerator), BigInt::from(self.denominator))
    }

    /// Numerator of the net multiplier.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Denominator of the net multiplier.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        // 975/1000 in lowest terms.
        Self {
            numerator: 39,
            denominator: 40,
        }
    }
}

/// Greatest common divisor, for canonicalizing the stored ratio.
const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let next = a % b;
        a = b;
        b = next;
    }
    a
}

/// Converts a ledger amount into the exact integer domain.
#[must_use]
pub fn big_from_u256(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

/// Converts a ledger amount into the exact rational domain.
#[must_use]
pub fn rational_from_u256(value: U256) -> BigRational {
    BigRational::from_integer(big_from_u256(value))
}

/// Converts an exact integer back into a ledger amount.
///
/// # Errors
/// The value must be non-negative and fit in 256 bits; trade sizes derived
/// from valid reserves always do.
pub fn u256_from_big(value: &BigInt) -> Result<U256, ArbError> {
    if value.is_negative() {
        return Err(ArbError::ArithmeticDomain(format!(
            "ledger amounts are unsigned, got {value}"
        )));
    }
    let (_, bytes) = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(ArbError::ArithmeticDomain(format!(
            "{value} does not fit in 256 bits"
        )));
    }
    Ok(U256::from_be_slice(&bytes))
}

/// Rounds an exact rational to the nearest integer, ties to even
/// (banker's rounding).
#[must_use]
pub fn round_half_even(value: &BigRational) -> BigInt {
    let floor = value.floor().to_integer();
    let fraction = value - BigRational::from_integer(floor.clone());
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    match fraction.cmp(&half) {
        Ordering::Less => floor,
        Ordering::Greater => floor + 1,
        Ordering::Equal => {
            if (&floor % 2_i32).is_zero() {
                floor
            } else {
                floor + 1
            }
        }
    }
}

/// Lossy view of an exact rational, for log-domain weights and display only.
#[must_use]
pub fn approx_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
