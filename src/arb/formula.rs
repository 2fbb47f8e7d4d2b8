//! Constant-product pool math.
//!
//! Four pure functions over exact rationals: the two folding quotes used by
//! the loop reducer, the closed-form profit-maximizing input, and the payoff
//! for a chosen input. For a pool with reserves `(Ea, Eb)` and net fee
//! multiplier `f` on the input side, output for input `d` is
//! `Eb*d*f / (Ea + d*f)`; setting the derivative of `output - d` to zero
//! gives the optimal input `sqrt(Ea*Eb/f) - Ea/f`.
//!
//! Every function also has a truncating-integer twin (`*_trunc`) that floors
//! after every fee multiplication and division, the way the venue's contracts
//! run their integer math. Truncation error compounds across hops, which is
//! why the rational versions are the default for sizing.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed};

use crate::arb::error::ArbError;
use crate::arb::numeric::{self, FeeRate};

/// Equivalent reserve on the input side after folding a pool with reserves
/// `(e0, e1)` against the upstream-equivalent reserve `convert_from`:
/// `(e0 * convert_from) / (e1*f + convert_from)`.
#[must_use]
pub fn forward_quote(
    e0: &BigRational,
    e1: &BigRational,
    convert_from: &BigRational,
    fee: &FeeRate,
) -> BigRational {
    let discounted = e1 * fee.ratio();
    (e0 * convert_from) / (discounted + convert_from)
}

/// Equivalent reserve on the output side after the same fold:
/// `(e1*f * convert_to) / (e1*f + convert_from)`.
#[must_use]
pub fn backward_quote(
    e1: &BigRational,
    convert_from: &BigRational,
    convert_to: &BigRational,
    fee: &FeeRate,
) -> BigRational {
    let discounted = e1 * fee.ratio();
    (&discounted * convert_to) / (discounted + convert_from)
}

/// Profit-maximizing input for effective reserves `(ea, eb)`:
/// `sqrt(ea*eb/f) - ea/f`, banker's-rounded to an integer.
///
/// The square root is the single sanctioned floating-point step; everything
/// up to it stays rational. A non-positive result means no profitable size
/// exists and is the caller's "no trade" signal, not an error.
///
/// # Errors
/// [`ArbError::ArithmeticDomain`] when the radicand is negative (only
/// reachable with invalid reserves) or overflows the float conversion.
pub fn optimal_input(
    ea: &BigRational,
    eb: &BigRational,
    fee: &FeeRate,
) -> Result<BigInt, ArbError> {
    let gross = ea / fee.ratio();
    let radicand = &gross * eb;
    if radicand.is_negative() {
        return Err(ArbError::ArithmeticDomain(format!(
            "negative radicand {radicand} in optimal input"
        )));
    }
    let radicand_f = numeric::approx_f64(&radicand);
    let gross_f = numeric::approx_f64(&gross);
    if !radicand_f.is_finite() || !gross_f.is_finite() {
        return Err(ArbError::ArithmeticDomain(
            "effective reserves overflow the final rounding step".to_string(),
        ));
    }
    let delta = (radicand_f.sqrt() - gross_f).round_ties_even();
    BigInt::from_f64(delta).ok_or_else(|| {
        ArbError::ArithmeticDomain(format!("optimal input {delta} is not a number"))
    })
}

/// Net profit for pushing `delta` units through the reduced pool:
/// `round(eb*delta*f / (ea + delta*f)) - delta`, in the starting asset's
/// units. Negative when `delta` overshoots the opportunity.
///
/// # Errors
/// [`ArbError::ArithmeticDomain`] when the pool denominator is not positive,
/// which valid reserves and a positive `delta` cannot produce.
pub fn output_given_input(
    ea: &BigRational,
    eb: &BigRational,
    delta: &BigInt,
    fee: &FeeRate,
) -> Result<BigInt, ArbError> {
    let discounted = BigRational::from_integer(delta.clone()) * fee.ratio();
    let denominator = ea + &discounted;
    if !denominator.is_positive() {
        return Err(ArbError::ArithmeticDomain(format!(
            "non-positive pool denominator {denominator}"
        )));
    }
    let received = (eb * &discounted) / denominator;
    Ok(numeric::round_half_even(&received) - delta)
}

/// Truncating-integer twin of [`forward_quote`].
#[must_use]
pub fn forward_quote_trunc(
    e0: &BigInt,
    e1: &BigInt,
    convert_from: &BigInt,
    fee: &FeeRate,
) -> BigInt {
    let discounted = e1 * fee.numerator() / fee.denominator();
    (e0 * convert_from) / (discounted + convert_from)
}

/// Truncating-integer twin of [`backward_quote`].
#[must_use]
pub fn backward_quote_trunc(
    e1: &BigInt,
    convert_from: &BigInt,
    convert_to: &BigInt,
    fee: &FeeRate,
) -> BigInt {
    let discounted = e1 * fee.numerator() / fee.denominator();
    (&discounted * convert_to) / (discounted + convert_from)
}

/// Truncating-integer twin of [`optimal_input`], using the algebraically
/// equal form `(sqrt(ea*eb*f) - ea) / f` with an integer square root.
///
/// # Errors
/// [`ArbError::ArithmeticDomain`] when the radicand is negative.
pub fn optimal_input_trunc(
    ea: &BigInt,
    eb: &BigInt,
    fee: &FeeRate,
) -> Result<BigInt, ArbError> {
    let radicand = ea * eb * fee.numerator() / fee.denominator();
    if radicand.is_negative() {
        return Err(ArbError::ArithmeticDomain(format!(
            "negative radicand {radicand} in optimal input"
        )));
    }
    let root = radicand.sqrt();
    Ok((root - ea) * fee.denominator() / fee.numerator())
}

/// Truncating-integer twin of [`output_given_input`].
///
/// # Errors
/// [`ArbError::ArithmeticDomain`] when the pool denominator is not positive.
pub fn output_given_input_trunc(
    ea: &BigInt,
    eb: &BigInt,
    delta: &BigInt,
    fee: &FeeRate,
) -> Result<BigInt, ArbError> {
    let discounted = delta * fee.numerator() / fee.denominator();
    let denominator = ea + &discounted;
    if !denominator.is_positive() {
        return Err(ArbError::ArithmeticDomain(format!(
            "non-positive pool denominator {denominator}"
        )));
    }
    Ok((eb * &discounted) / denominator - delta)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use num_traits::Zero;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Shorthand for an exact rational.
    fn rat(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    /// Exact (unrounded) net profit, for neighbor comparisons.
    fn exact_profit(ea: &BigRational, eb: &BigRational, delta: i64, fee: &FeeRate) -> BigRational {
        if delta == 0 {
            return BigRational::zero();
        }
        let delta = rat(delta, 1);
        let discounted = &delta * fee.ratio();
        (eb * &discounted) / (ea + &discounted) - delta
    }

    #[test]
    fn test_forward_quote_folds_the_reference_triangle() {
        let fee = FeeRate::default();
        // First fold of pools (100,100) and (50,90), then absorbing (30,45).
        let seed = forward_quote(&rat(100, 1), &rat(100, 1), &rat(50, 1), &fee);
        assert_eq!(seed, rat(2000, 59));
        let folded = forward_quote(&rat(2000, 59), &rat(3510, 59), &rat(30, 1), &fee);
        assert_eq!(folded, rat(80_000, 6923));
    }

    #[test]
    fn test_backward_quote_folds_the_reference_triangle() {
        let fee = FeeRate::default();
        let seed = backward_quote(&rat(100, 1), &rat(50, 1), &rat(90, 1), &fee);
        assert_eq!(seed, rat(3510, 59));
        let folded = backward_quote(&rat(3510, 59), &rat(30, 1), &rat(45, 1), &fee);
        assert_eq!(folded, rat(205_335, 6923));
    }

    #[test]
    fn test_quotes_are_monotonic_and_bounded() {
        let fee = FeeRate::default();
        let e0 = rat(1000, 1);
        let e1 = rat(500, 1);

        let mut last_forward = BigRational::zero();
        for convert_from in [1, 10, 100, 1000, 10_000] {
            let quote = forward_quote(&e0, &e1, &rat(convert_from, 1), &fee);
            assert!(quote > last_forward, "forward not increasing at {convert_from}");
            assert!(quote < e0, "forward quote must stay below reserve_from");
            last_forward = quote;
        }

        let convert_from = rat(300, 1);
        let mut last_backward = BigRational::zero();
        for convert_to in [1, 10, 100, 1000, 10_000] {
            let quote = backward_quote(&e1, &convert_from, &rat(convert_to, 1), &fee);
            assert!(quote > last_backward, "backward not increasing at {convert_to}");
            assert!(
                quote < rat(convert_to, 1),
                "backward quote must stay below convert_to"
            );
            last_backward = quote;
        }
    }

    #[test]
    fn test_optimal_input_reference_triangle() {
        let fee = FeeRate::default();
        let delta = optimal_input(&rat(80_000, 6923), &rat(205_335, 6923), &fee).unwrap();
        assert_eq!(delta, BigInt::from(7));
    }

    #[test]
    fn test_output_given_input_reference_triangle() {
        let fee = FeeRate::default();
        let profit =
            output_given_input(&rat(80_000, 6923), &rat(205_335, 6923), &BigInt::from(7), &fee)
                .unwrap();
        assert_eq!(profit, BigInt::from(4));
    }

    #[test]
    fn test_optimal_input_balanced_pool_has_no_size() {
        // A fee-paying win is impossible on a balanced pool: the solver lands
        // just below zero.
        let fee = FeeRate::default();
        let delta = optimal_input(&rat(100, 1), &rat(100, 1), &fee).unwrap();
        assert_eq!(delta, BigInt::from(-1));

        let steep = optimal_input(&rat(200, 1), &rat(100, 1), &fee).unwrap();
        assert!(steep.is_negative());
    }

    #[test]
    fn test_optimal_input_rejects_negative_reserves() {
        let fee = FeeRate::default();
        let err = optimal_input(&rat(-1, 1), &rat(10, 1), &fee).unwrap_err();
        assert!(matches!(err, ArbError::ArithmeticDomain(_)));
    }

    #[test]
    fn test_optimal_input_is_a_local_optimum() {
        let fee = FeeRate::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut profitable = 0u32;
        let mut strictly_best = 0u32;

        for _ in 0..200 {
            let ea = rat(rng.random_range(1_000..=1_000_000_000), 1);
            let eb = rat(rng.random_range(1_000..=1_000_000_000), 1);
            let delta = optimal_input(&ea, &eb, &fee).unwrap();
            if !delta.is_positive() {
                continue;
            }
            profitable += 1;

            let delta_i64 = i64::try_from(delta.clone()).unwrap();
            let here = exact_profit(&ea, &eb, delta_i64, &fee);
            let below = exact_profit(&ea, &eb, delta_i64 - 1, &fee);
            let above = exact_profit(&ea, &eb, delta_i64 + 1, &fee);
            if here > below && here > above {
                strictly_best += 1;
            }

            // Rounded payoff is never negative at the solved size.
            let profit = output_given_input(&ea, &eb, &delta, &fee).unwrap();
            assert!(!profit.is_negative(), "ea={ea} eb={eb} delta={delta}");
        }

        assert!(profitable >= 20, "rng produced too few profitable pairs");
        assert!(
            strictly_best * 100 >= profitable * 95,
            "{strictly_best}/{profitable} strict local optima"
        );
    }

    #[test]
    fn test_truncating_quotes_reference_triangle() {
        let fee = FeeRate::default();
        let seed_ea = forward_quote_trunc(
            &BigInt::from(100),
            &BigInt::from(100),
            &BigInt::from(50),
            &fee,
        );
        assert_eq!(seed_ea, BigInt::from(34));
        let seed_eb = backward_quote_trunc(
            &BigInt::from(100),
            &BigInt::from(50),
            &BigInt::from(90),
            &fee,
        );
        assert_eq!(seed_eb, BigInt::from(59));

        let ea = forward_quote_trunc(&BigInt::from(34), &BigInt::from(59), &BigInt::from(30), &fee);
        assert_eq!(ea, BigInt::from(11));
        let eb =
            backward_quote_trunc(&BigInt::from(59), &BigInt::from(30), &BigInt::from(45), &fee);
        assert_eq!(eb, BigInt::from(29));
    }

    #[test]
    fn test_truncating_solver_reference_triangle() {
        let fee = FeeRate::default();
        let delta = optimal_input_trunc(&BigInt::from(11), &BigInt::from(29), &fee).unwrap();
        assert_eq!(delta, BigInt::from(6));
        let profit =
            output_given_input_trunc(&BigInt::from(11), &BigInt::from(29), &delta, &fee).unwrap();
        assert_eq!(profit, BigInt::from(3));
    }

    #[test]
    fn test_truncating_and_exact_solvers_agree_at_scale() {
        // At wei-like magnitudes a single hop truncates away almost nothing.
        let fee = FeeRate::default();
        let ea_int = BigInt::from(1_000_000_000_000u64);
        let eb_int = BigInt::from(1_100_000_000_000u64);
        let trunc = optimal_input_trunc(&ea_int, &eb_int, &fee).unwrap();
        let exact = optimal_input(
            &BigRational::from_integer(ea_int),
            &BigRational::from_integer(eb_int),
            &fee,
        )
        .unwrap();
        let difference = &trunc - &exact;
        assert!(
            difference.magnitude() <= &2u32.into(),
            "trunc={trunc} exact={exact}"
        );
    }
}
