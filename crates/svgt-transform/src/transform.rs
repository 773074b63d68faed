use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use svgt_algebra::{
    catenate_all, transform_ellipse, Ellipse, EllipseParams, Matrix, Point, Vector,
};
use svgt_grammar::GrammarError;

/// A resolved SVG transform.
///
/// Wraps a single [`Matrix`]. Values are immutable; every operation returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Transform {
    matrix: Matrix,
}

impl Transform {
    /// The transform that leaves every point in place.
    pub const IDENTITY: Self = Self::new(Matrix::IDENTITY);

    /// Wrap a matrix.
    pub const fn new(matrix: Matrix) -> Self {
        Self { matrix }
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Resolve a transform attribute against the transform inherited from the parent.
    ///
    /// The functions of `transform` are folded from left to right onto `ctm`, each one
    /// becoming the inner operand, so the rightmost function is applied to points first and
    /// `ctm` last.
    ///
    /// A missing, empty or malformed attribute resolves to `ctm` itself, and so does one whose
    /// composition leaves the decimal range. Such failures are logged at debug level and
    /// otherwise ignored, as browsers ignore an invalid attribute.
    ///
    /// # Arguments
    ///
    /// * `transform` - The attribute text, if any.
    /// * `ctm` - The current transformation matrix of the parent, if any.
    ///
    /// # Returns
    ///
    /// The resolved transform, or `None` when there is neither a CTM nor a function to apply.
    pub fn from_string(transform: Option<&str>, ctm: Option<&Transform>) -> Option<Transform> {
        let text = match transform {
            Some(text) if !text.is_empty() => text,
            _ => return ctm.copied(),
        };

        let matrices = match svgt_grammar::parse(text) {
            Ok(matrices) => matrices,
            Err(err) => {
                log::debug!("ignoring transform {text:?}: {err}");
                return ctm.copied();
            }
        };

        let folded = matrices
            .iter()
            .try_fold(ctm.map(|ctm| ctm.matrix), |acc, matrix| match acc {
                Some(outer) => outer.checked_compose(matrix).map(Some),
                None => Some(Some(*matrix)),
            });

        match folded {
            Some(matrix) => matrix.map(Transform::new),
            None => {
                log::debug!("ignoring transform {text:?}: {}", GrammarError::Overflow);
                ctm.copied()
            }
        }
    }

    /// Map an absolute point.
    pub fn apply(&self, point: Point) -> Point {
        self.matrix.apply_point(point)
    }

    /// Map a relative offset. Translation does not apply.
    pub fn apply_relative(&self, vector: Vector) -> Vector {
        self.matrix.apply_vector(vector)
    }

    /// Map an ellipse with the default [`EllipseParams`].
    ///
    /// The image of an ellipse under an affine map is another ellipse; its semi-axes and
    /// rotation are recovered from the map and the input ellipse. Translation is ignored.
    pub fn apply_ellipse(&self, ellipse: &Ellipse) -> Ellipse {
        self.apply_ellipse_with(ellipse, &EllipseParams::default())
    }

    /// Map an ellipse with explicit tolerance and rounding parameters.
    pub fn apply_ellipse_with(&self, ellipse: &Ellipse, params: &EllipseParams) -> Ellipse {
        transform_ellipse(&self.matrix, ellipse, params)
    }

    /// Compose with `next`, which is applied to points first.
    ///
    /// A missing `next` returns `self` unchanged.
    ///
    /// # Panics
    ///
    /// Panics if an entry overflows; see [`Transform::checked_catenate`].
    pub fn catenate(&self, next: Option<&Transform>) -> Transform {
        match next {
            Some(next) => Transform::new(self.matrix.compose(&next.matrix)),
            None => *self,
        }
    }

    /// Compose with `next` like [`Transform::catenate`], or `None` if an entry overflows.
    pub fn checked_catenate(&self, next: Option<&Transform>) -> Option<Transform> {
        match next {
            Some(next) => self.matrix.checked_compose(&next.matrix).map(Transform::new),
            None => Some(*self),
        }
    }

    /// Compose a list of optional transforms, the first entry being applied to points first.
    ///
    /// Missing entries are skipped; an empty or all-missing list gives `None`.
    ///
    /// # Panics
    ///
    /// Panics if an entry overflows, as [`Transform::catenate`] does.
    pub fn catenate_all<'a, I>(transforms: I) -> Option<Transform>
    where
        I: IntoIterator<Item = Option<&'a Transform>>,
        I::IntoIter: DoubleEndedIterator,
    {
        catenate_all(
            transforms
                .into_iter()
                .map(|transform| transform.map(|transform| &transform.matrix)),
        )
        .map(Transform::new)
    }

    /// Whether the transform rotates or shears.
    pub fn has_rotation(&self) -> bool {
        self.matrix.has_rotation()
    }

    /// Whether the transform keeps the orientation of shapes, i.e. does not mirror them.
    pub fn orientation_preserving(&self) -> bool {
        self.matrix.orientation_preserving()
    }
}

impl From<Matrix> for Transform {
    fn from(matrix: Matrix) -> Self {
        Self::new(matrix)
    }
}

/// Formats as `matrix(a b c d e f)` with trailing zeros removed.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.matrix.to_array().map(|entry: Decimal| entry.normalize());
        write!(f, "matrix({a} {b} {c} {d} {e} {g})")
    }
}

/// Strict parsing: errors are returned, and an empty list is the identity.
impl FromStr for Transform {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        svgt_grammar::parse(s)?
            .iter()
            .try_fold(Matrix::IDENTITY, |acc, matrix| acc.checked_compose(matrix))
            .map(Transform::new)
            .ok_or(GrammarError::Overflow)
    }
}
