use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

/// Arguments above this magnitude are halved before summing the arctangent series.
const ATAN_SERIES_LIMIT: Decimal = dec!(0.1);

/// Upper bound on arctangent series terms, reached only if a term never rounds to zero.
const ATAN_MAX_TERMS: u32 = 64;

const NINETY: Decimal = dec!(90);

/// Operations on [`Decimal`] that `rust_decimal` does not ship.
///
/// Everything here stays in the decimal domain so results are reproducible across
/// platforms; no value is routed through `f32` or `f64`.
pub trait DecimalExt: Sized {
    /// Arctangent in radians, in `[-pi/2, pi/2]`.
    fn atan(self) -> Decimal;

    /// Four-quadrant arctangent of `self / x` in radians, in `(-pi, pi]`.
    ///
    /// `atan2(0, 0)` is `0`.
    fn atan2(self, x: Decimal) -> Decimal;

    /// Arccosine in radians, in `[0, pi]`. The input is clamped to `[-1, 1]`.
    fn acos(self) -> Decimal;

    /// Square root, with negative inputs clamped to zero.
    fn sqrt_or_zero(self) -> Decimal;

    /// Rounds to `dp` decimal places, with ties going away from zero.
    fn round_half_up(self, dp: u32) -> Decimal;

    /// Returns `true` when `self / denominator <= bound`.
    ///
    /// A zero denominator makes the ratio undefined and the comparison `false`.
    fn ratio_le(self, denominator: Decimal, bound: Decimal) -> bool;
}

impl DecimalExt for Decimal {
    fn atan(self) -> Decimal {
        if self.is_zero() {
            return Decimal::ZERO;
        }

        // atan(x) = ±pi/2 - atan(1/x) keeps the series argument within [-1, 1]
        if self.abs() > Decimal::ONE {
            let base = Decimal::HALF_PI - (Decimal::ONE / self.abs()).atan();
            return if self.is_sign_negative() { -base } else { base };
        }

        // atan(x) = 2 * atan(x / (1 + sqrt(1 + x^2)))
        let mut x = self;
        let mut halvings = 0u32;
        while x.abs() > ATAN_SERIES_LIMIT {
            x /= Decimal::ONE + (Decimal::ONE + x * x).sqrt_or_zero();
            halvings += 1;
        }

        // x - x^3/3 + x^5/5 - ...
        let x2 = x * x;
        let mut power = x;
        let mut sum = x;
        for k in 1..ATAN_MAX_TERMS {
            power = -power * x2;
            let term = power / Decimal::from(2 * k + 1);
            if term.is_zero() {
                break;
            }
            sum += term;
        }

        sum * Decimal::from(1u64 << halvings)
    }

    fn atan2(self, x: Decimal) -> Decimal {
        let y = self;
        if x.is_zero() && y.is_zero() {
            return Decimal::ZERO;
        }

        if x.abs() >= y.abs() {
            let base = (y / x).atan();
            if x.is_sign_positive() {
                base
            } else if y.is_sign_negative() && !y.is_zero() {
                base - Decimal::PI
            } else {
                base + Decimal::PI
            }
        } else {
            let base = (x / y).atan();
            if y.is_sign_positive() {
                Decimal::HALF_PI - base
            } else {
                -Decimal::HALF_PI - base
            }
        }
    }

    fn acos(self) -> Decimal {
        let x = self.clamp(-Decimal::ONE, Decimal::ONE);
        (Decimal::ONE - x * x).sqrt_or_zero().atan2(x)
    }

    fn sqrt_or_zero(self) -> Decimal {
        self.max(Decimal::ZERO).sqrt().unwrap_or(Decimal::ZERO)
    }

    fn round_half_up(self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn ratio_le(self, denominator: Decimal, bound: Decimal) -> bool {
        self.checked_div(denominator)
            .is_some_and(|ratio| ratio <= bound)
    }
}

/// Radians per degree, derived as `acos(0) / 90`.
pub fn degree() -> Decimal {
    Decimal::ZERO.acos() / NINETY
}

/// Converts an angle in degrees to radians.
pub fn to_radians(degrees: Decimal) -> Decimal {
    degrees * degree()
}

/// Converts an angle in radians to degrees.
pub fn to_degrees(radians: Decimal) -> Decimal {
    radians / degree()
}
