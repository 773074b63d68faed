use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use svgt_algebra::{numeric::to_radians, Matrix};

use crate::error::GrammarError;

/// One SVG transform function with its arguments interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `matrix(a b c d e f)`.
    Matrix([Decimal; 6]),
    /// `translate(tx [ty])`, with `ty` defaulting to zero.
    Translate {
        /// Offset along x.
        tx: Decimal,
        /// Offset along y.
        ty: Decimal,
    },
    /// `scale(sx [sy])`, with `sy` defaulting to `sx`.
    Scale {
        /// Factor along x.
        sx: Decimal,
        /// Factor along y.
        sy: Decimal,
    },
    /// `rotate(angle [cx cy])`, in degrees, about the origin or `(cx, cy)`.
    Rotate {
        /// Angle in degrees, positive from the x-axis towards the y-axis.
        angle: Decimal,
        /// Optional centre of rotation.
        center: Option<(Decimal, Decimal)>,
    },
    /// `skewX(angle)`, in degrees.
    SkewX(Decimal),
    /// `skewY(angle)`, in degrees.
    SkewY(Decimal),
}

fn arity(name: &'static str, expected: &'static str, found: usize) -> GrammarError {
    GrammarError::InvalidArity {
        name,
        expected,
        found,
    }
}

impl Primitive {
    /// Interpret a function name and its numeric arguments.
    ///
    /// Names are case-sensitive, as in SVG.
    pub fn from_call(name: &str, args: &[Decimal]) -> Result<Self, GrammarError> {
        match (name, args) {
            ("matrix", &[a, b, c, d, e, f]) => Ok(Self::Matrix([a, b, c, d, e, f])),
            ("matrix", _) => Err(arity("matrix", "6", args.len())),

            ("translate", &[tx]) => Ok(Self::Translate {
                tx,
                ty: Decimal::ZERO,
            }),
            ("translate", &[tx, ty]) => Ok(Self::Translate { tx, ty }),
            ("translate", _) => Err(arity("translate", "1 or 2", args.len())),

            ("scale", &[s]) => Ok(Self::Scale { sx: s, sy: s }),
            ("scale", &[sx, sy]) => Ok(Self::Scale { sx, sy }),
            ("scale", _) => Err(arity("scale", "1 or 2", args.len())),

            ("rotate", &[angle]) => Ok(Self::Rotate {
                angle,
                center: None,
            }),
            ("rotate", &[angle, cx, cy]) => Ok(Self::Rotate {
                angle,
                center: Some((cx, cy)),
            }),
            ("rotate", _) => Err(arity("rotate", "1 or 3", args.len())),

            ("skewX", &[angle]) => Ok(Self::SkewX(angle)),
            ("skewX", _) => Err(arity("skewX", "1", args.len())),

            ("skewY", &[angle]) => Ok(Self::SkewY(angle)),
            ("skewY", _) => Err(arity("skewY", "1", args.len())),

            _ => Err(GrammarError::UnknownFunction(name.to_string())),
        }
    }

    /// Lower the primitive to its 6-parameter matrix.
    pub fn to_matrix(&self) -> Result<Matrix, GrammarError> {
        match *self {
            Self::Matrix(entries) => Ok(Matrix::from_array(entries)),
            Self::Translate { tx, ty } => Ok(Matrix::translation(tx, ty)),
            Self::Scale { sx, sy } => Ok(Matrix::scale(sx, sy)),
            Self::Rotate { angle, center } => {
                let theta = to_radians(angle);
                let (sin, cos) = (theta.sin(), theta.cos());

                let (e, f) = match center {
                    Some((cx, cy)) => {
                        rotation_offset(cx, cy, sin, cos).ok_or(GrammarError::Overflow)?
                    }
                    None => (Decimal::ZERO, Decimal::ZERO),
                };
                Ok(Matrix::new(cos, sin, -sin, cos, e, f))
            }
            Self::SkewX(angle) => {
                let tan = tangent(angle)?;
                Ok(Matrix::new(
                    Decimal::ONE,
                    Decimal::ZERO,
                    tan,
                    Decimal::ONE,
                    Decimal::ZERO,
                    Decimal::ZERO,
                ))
            }
            Self::SkewY(angle) => {
                let tan = tangent(angle)?;
                Ok(Matrix::new(
                    Decimal::ONE,
                    tan,
                    Decimal::ZERO,
                    Decimal::ONE,
                    Decimal::ZERO,
                    Decimal::ZERO,
                ))
            }
        }
    }
}

/// Translation part of `translate(cx, cy) rotate(t) translate(-cx, -cy)`.
fn rotation_offset(
    cx: Decimal,
    cy: Decimal,
    sin: Decimal,
    cos: Decimal,
) -> Option<(Decimal, Decimal)> {
    let e = cx
        .checked_sub(cos.checked_mul(cx)?)?
        .checked_add(sin.checked_mul(cy)?)?;
    let f = cy
        .checked_sub(sin.checked_mul(cx)?)?
        .checked_sub(cos.checked_mul(cy)?)?;
    Some((e, f))
}

const RIGHT_ANGLE: Decimal = dec!(90);
const STRAIGHT_ANGLE: Decimal = dec!(180);

/// Tangent of an angle in degrees.
///
/// Odd multiples of 90 degrees are rejected before conversion, since the radian value is
/// rounded and would otherwise yield a huge finite tangent.
fn tangent(degrees: Decimal) -> Result<Decimal, GrammarError> {
    if (degrees % STRAIGHT_ANGLE).abs() == RIGHT_ANGLE {
        return Err(GrammarError::UndefinedTangent(degrees));
    }

    to_radians(degrees)
        .checked_tan()
        .ok_or(GrammarError::UndefinedTangent(degrees))
}
