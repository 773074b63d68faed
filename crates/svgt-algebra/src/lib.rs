#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # svgt algebra
//!
//! Exact 2D affine algebra over [`rust_decimal::Decimal`], following the SVG `transform`
//! attribute conventions.
//!
//! - [`Matrix`]: the 6-parameter affine map `(a, b, c, d, e, f)` and its composition.
//! - [`Point`] and [`Vector`]: absolute positions and translation-free offsets.
//! - [`transform_ellipse`]: the semi-axes and rotation of an ellipse after an affine map.
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use svgt_algebra::{Matrix, Point};
//!
//! let scale = Matrix::scale(dec!(2), dec!(2));
//! let translate = Matrix::translation(dec!(10), dec!(0));
//!
//! // translate first, then scale
//! let combined = scale.compose(&translate);
//! assert_eq!(combined.apply_point(Point::new(dec!(1), dec!(1))), Point::new(dec!(22), dec!(2)));
//! ```

mod tolerance;

/// Ellipses and their image under an affine map.
pub mod ellipse;

/// The 6-parameter affine matrix and its composition rules.
pub mod matrix;

/// Decimal trigonometry and rounding helpers.
pub mod numeric;

/// Points and free vectors.
pub mod vector;

pub use ellipse::{transform_ellipse, Ellipse, EllipseParams};
pub use matrix::{catenate, catenate_all, Matrix};
pub use numeric::DecimalExt;
pub use vector::{Point, Vector};

pub use rust_decimal::Decimal;
