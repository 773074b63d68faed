use rust_decimal::Decimal;

use crate::tolerance::impl_approx;
use crate::vector::{Point, Vector};

/// A 2D affine map stored as the SVG 6-tuple `(a, b, c, d, e, f)`.
///
/// The map sends `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`, i.e. it is the homogeneous
/// matrix
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix([Decimal; 6]);

impl Matrix {
    /// The identity map `(1, 0, 0, 1, 0, 0)`.
    pub const IDENTITY: Self = Self([
        Decimal::ONE,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ONE,
        Decimal::ZERO,
        Decimal::ZERO,
    ]);

    /// Create a new matrix from its six entries in SVG order.
    pub const fn new(
        a: Decimal,
        b: Decimal,
        c: Decimal,
        d: Decimal,
        e: Decimal,
        f: Decimal,
    ) -> Self {
        Self([a, b, c, d, e, f])
    }

    /// Create a new matrix from an `[a, b, c, d, e, f]` array.
    pub const fn from_array(entries: [Decimal; 6]) -> Self {
        Self(entries)
    }

    /// A pure translation by `(tx, ty)`.
    pub const fn translation(tx: Decimal, ty: Decimal) -> Self {
        Self::new(Decimal::ONE, Decimal::ZERO, Decimal::ZERO, Decimal::ONE, tx, ty)
    }

    /// A pure scale by `sx` along x and `sy` along y.
    pub const fn scale(sx: Decimal, sy: Decimal) -> Self {
        Self::new(sx, Decimal::ZERO, Decimal::ZERO, sy, Decimal::ZERO, Decimal::ZERO)
    }

    /// The entries as `[a, b, c, d, e, f]`.
    pub fn to_array(&self) -> [Decimal; 6] {
        self.0
    }

    /// The `a` entry (x scale).
    pub fn a(&self) -> Decimal {
        self.0[0]
    }

    /// The `b` entry (y shear of x).
    pub fn b(&self) -> Decimal {
        self.0[1]
    }

    /// The `c` entry (x shear of y).
    pub fn c(&self) -> Decimal {
        self.0[2]
    }

    /// The `d` entry (y scale).
    pub fn d(&self) -> Decimal {
        self.0[3]
    }

    /// The `e` entry (x translation).
    pub fn e(&self) -> Decimal {
        self.0[4]
    }

    /// The `f` entry (y translation).
    pub fn f(&self) -> Decimal {
        self.0[5]
    }

    /// Compose two maps, `self` after `inner`.
    ///
    /// Applying the result to a point is the same as applying `inner` first and then `self`,
    /// which is the `CTM x local` order used when nesting SVG transforms.
    ///
    /// # Panics
    ///
    /// Panics if an entry leaves the [`Decimal`] range; see [`Matrix::checked_compose`].
    pub fn compose(&self, inner: &Matrix) -> Matrix {
        let [a0, b0, c0, d0, e0, f0] = self.0;
        let [a1, b1, c1, d1, e1, f1] = inner.0;

        Matrix([
            a0 * a1 + b1 * c0,
            a1 * b0 + b1 * d0,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        ])
    }

    /// Compose two maps like [`Matrix::compose`], or `None` if an entry overflows.
    pub fn checked_compose(&self, inner: &Matrix) -> Option<Matrix> {
        let [a0, b0, c0, d0, e0, f0] = self.0;
        let [a1, b1, c1, d1, e1, f1] = inner.0;

        // x0 * x1 + y0 * y1
        let dot = |x0: Decimal, y0: Decimal, x1: Decimal, y1: Decimal| -> Option<Decimal> {
            x0.checked_mul(x1)?.checked_add(y0.checked_mul(y1)?)
        };

        Some(Matrix([
            dot(a0, c0, a1, b1)?,
            dot(b0, d0, a1, b1)?,
            dot(a0, c0, c1, d1)?,
            dot(b0, d0, c1, d1)?,
            dot(a0, c0, e1, f1)?.checked_add(e0)?,
            dot(b0, d0, e1, f1)?.checked_add(f0)?,
        ]))
    }

    /// Map an absolute point.
    ///
    /// Panics if a coordinate leaves the [`Decimal`] range.
    pub fn apply_point(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }

    /// Map a free vector, ignoring the translation entries.
    ///
    /// Panics if a coordinate leaves the [`Decimal`] range.
    pub fn apply_vector(&self, vector: Vector) -> Vector {
        let [a, b, c, d, _, _] = self.0;
        Vector::new(a * vector.x + c * vector.y, b * vector.x + d * vector.y)
    }

    /// Whether the map has off-diagonal terms, i.e. rotates or shears.
    pub fn has_rotation(&self) -> bool {
        !self.b().is_zero() || !self.c().is_zero()
    }

    /// The determinant `a*d - b*c` of the linear part.
    pub fn determinant(&self) -> Decimal {
        self.a() * self.d() - self.b() * self.c()
    }

    /// Whether the map keeps handedness, i.e. the determinant is not negative.
    pub fn orientation_preserving(&self) -> bool {
        self.determinant() >= Decimal::ZERO
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[Decimal; 6]> for Matrix {
    fn from(entries: [Decimal; 6]) -> Self {
        Self(entries)
    }
}

impl From<Matrix> for [Decimal; 6] {
    fn from(matrix: Matrix) -> Self {
        matrix.0
    }
}

impl_approx!(Matrix, 6);

/// Compose two optional maps, `outer` after `inner`.
///
/// A missing operand is a no-op: the other operand is returned as is, and two missing
/// operands give `None`. This is not the same as composing with [`Matrix::IDENTITY`],
/// which always yields a matrix.
///
/// # Panics
///
/// Panics on overflow, as [`Matrix::compose`] does.
pub fn catenate(outer: Option<&Matrix>, inner: Option<&Matrix>) -> Option<Matrix> {
    match (outer, inner) {
        (Some(outer), Some(inner)) => Some(outer.compose(inner)),
        (Some(matrix), None) | (None, Some(matrix)) => Some(*matrix),
        (None, None) => None,
    }
}

/// Compose a list of optional maps into one, folding from the right.
///
/// The accumulator built from the tail of the list is the outer operand at every step, so
/// the first entry is the one applied to points first. Missing entries are skipped; an
/// empty or all-missing list gives `None`.
///
/// # Panics
///
/// Panics on overflow, as [`Matrix::compose`] does.
pub fn catenate_all<'a, I>(matrices: I) -> Option<Matrix>
where
    I: IntoIterator<Item = Option<&'a Matrix>>,
    I::IntoIter: DoubleEndedIterator,
{
    matrices
        .into_iter()
        .rev()
        .fold(None, |acc, matrix| catenate(acc.as_ref(), matrix))
}
