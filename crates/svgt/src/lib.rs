#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use svgt_algebra as algebra;

#[doc(inline)]
pub use svgt_grammar as grammar;

#[doc(inline)]
pub use svgt_transform as transform;

pub use svgt_algebra::{Decimal, Ellipse, EllipseParams, Matrix, Point, Vector};
pub use svgt_grammar::GrammarError;
pub use svgt_transform::Transform;
