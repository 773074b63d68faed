#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # svgt transform
//!
//! A [`Transform`] is the resolved value of an SVG `transform` attribute: one affine map
//! over exact decimals. It is built by resolving the attribute text against the current
//! transformation matrix (CTM) inherited from the parent element, and then applied to
//! points, relative offsets and elliptical arcs.
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use svgt_algebra::Point;
//! use svgt_transform::Transform;
//!
//! let parent = Transform::from_string(Some("scale(2)"), None);
//! let child = Transform::from_string(Some("translate(10 0)"), parent.as_ref()).unwrap();
//!
//! let point = child.apply(Point::new(dec!(1), dec!(1)));
//! assert_eq!(point, Point::new(dec!(22), dec!(2)));
//! assert_eq!(child.to_string(), "matrix(2 0 0 2 20 0)");
//! ```

mod transform;
pub use transform::Transform;

pub use svgt_grammar::GrammarError;
