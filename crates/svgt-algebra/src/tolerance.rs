//! Approximate comparison of decimal value types.
//!
//! `rust_decimal` does not implement the `approx` traits, so the value types of this crate
//! compare their components here and expose the result through `approx::AbsDiffEq` and
//! `approx::RelativeEq` with a [`Decimal`] epsilon.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Absolute tolerance used when `approx` assertions give no explicit epsilon.
#[cfg_attr(not(feature = "approx"), allow(dead_code))]
pub(crate) const DEFAULT_EPSILON: Decimal = dec!(0.00000000000000000001);

/// Relative tolerance used when `approx` assertions give no explicit bound.
#[cfg_attr(not(feature = "approx"), allow(dead_code))]
pub(crate) const DEFAULT_MAX_RELATIVE: Decimal = dec!(0.00000000000000000001);

#[cfg_attr(not(feature = "approx"), allow(dead_code))]
pub(crate) fn abs_diff_eq(a: Decimal, b: Decimal, epsilon: Decimal) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg_attr(not(feature = "approx"), allow(dead_code))]
pub(crate) fn relative_eq(a: Decimal, b: Decimal, epsilon: Decimal, max_relative: Decimal) -> bool {
    if a == b {
        return true;
    }

    let diff = (a - b).abs();
    if diff <= epsilon {
        return true;
    }

    diff <= a.abs().max(b.abs()) * max_relative
}

/// Implements the `approx` comparison traits for a type with a `to_array` method.
///
/// # Arguments
///
/// * `name` - The value type.
/// * `len`  - The number of decimal components returned by `to_array`.
macro_rules! impl_approx {
    ($name:ident, $len:literal) => {
        #[cfg(feature = "approx")]
        impl approx::AbsDiffEq for $name {
            type Epsilon = rust_decimal::Decimal;

            #[inline]
            fn default_epsilon() -> Self::Epsilon {
                $crate::tolerance::DEFAULT_EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let a: [rust_decimal::Decimal; $len] = self.to_array();
                let b: [rust_decimal::Decimal; $len] = other.to_array();
                a.iter()
                    .zip(b.iter())
                    .all(|(ai, bi)| $crate::tolerance::abs_diff_eq(*ai, *bi, epsilon))
            }
        }

        #[cfg(feature = "approx")]
        impl approx::RelativeEq for $name {
            #[inline]
            fn default_max_relative() -> Self::Epsilon {
                $crate::tolerance::DEFAULT_MAX_RELATIVE
            }

            #[inline]
            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let a: [rust_decimal::Decimal; $len] = self.to_array();
                let b: [rust_decimal::Decimal; $len] = other.to_array();
                a.iter().zip(b.iter()).all(|(ai, bi)| {
                    $crate::tolerance::relative_eq(*ai, *bi, epsilon, max_relative)
                })
            }
        }
    };
}

pub(crate) use impl_approx;
