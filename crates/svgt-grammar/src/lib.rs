#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # svgt grammar
//!
//! Parses the value of an SVG `transform` attribute, such as
//! `translate(10, 20) rotate(45 5 5) scale(2)`, into the ordered list of 6-parameter
//! matrices it is made of. Numbers are read exactly into [`rust_decimal::Decimal`].
//!
//! The grammar follows SVG 1.1 with the leniency browsers apply: commas are optional
//! between numbers and between functions, and `10-5` reads as two numbers.
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use svgt_algebra::Matrix;
//!
//! let matrices = svgt_grammar::parse("translate(10 20) scale(2)").unwrap();
//! assert_eq!(
//!     matrices,
//!     vec![
//!         Matrix::translation(dec!(10), dec!(20)),
//!         Matrix::scale(dec!(2), dec!(2)),
//!     ]
//! );
//! ```

mod error;
pub use error::GrammarError;

mod number;
mod parser;

/// The SVG transform functions.
pub mod primitive;
pub use primitive::Primitive;

use svgt_algebra::Matrix;

/// Parse a transform attribute into its transform functions, in source order.
///
/// # Arguments
///
/// * `input` - The attribute value. An empty or blank value gives an empty list.
///
/// # Returns
///
/// The primitives in the order they appear, or the first error found.
pub fn parse_primitives(input: &str) -> Result<Vec<Primitive>, GrammarError> {
    parser::parse_calls(input)?
        .into_iter()
        .map(|call| {
            let args = call
                .args
                .iter()
                .map(|arg| number::parse_number(arg))
                .collect::<Result<Vec<_>, _>>()?;
            Primitive::from_call(call.name, &args)
        })
        .collect()
}

/// Parse a transform attribute into one matrix per transform function, in source order.
///
/// The matrices are not composed; folding them is left to the caller.
pub fn parse(input: &str) -> Result<Vec<Matrix>, GrammarError> {
    parse_primitives(input)?
        .iter()
        .map(Primitive::to_matrix)
        .collect()
}
