use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::matrix::Matrix;
use crate::numeric::{degree, DecimalExt};
use crate::tolerance::impl_approx;

const TWO: Decimal = dec!(2);
const FOUR: Decimal = dec!(4);

/// An ellipse given by its semi-axes and the rotation of its `rx` axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// Semi-axis along the rotated x direction. Never negative.
    pub rx: Decimal,
    /// Semi-axis along the rotated y direction. Never negative.
    pub ry: Decimal,
    /// Rotation in degrees from the positive x-axis to the `rx` axis. `0` for circles.
    pub angle: Decimal,
}

impl Ellipse {
    /// Create a new ellipse.
    pub const fn new(rx: Decimal, ry: Decimal, angle: Decimal) -> Self {
        Self { rx, ry, angle }
    }

    /// A circle of radius `r`.
    pub const fn circle(r: Decimal) -> Self {
        Self::new(r, r, Decimal::ZERO)
    }

    /// The parameters as `[rx, ry, angle]`.
    pub fn to_array(&self) -> [Decimal; 3] {
        [self.rx, self.ry, self.angle]
    }

    /// Whether both semi-axes are equal.
    pub fn is_circle(&self) -> bool {
        self.rx == self.ry
    }

    /// Whether the ellipse has no area.
    pub fn is_degenerate(&self) -> bool {
        self.rx.is_zero() || self.ry.is_zero()
    }
}

impl_approx!(Ellipse, 3);

/// Tuning of [`transform_ellipse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EllipseParams {
    /// Relative tolerance of the near-diagonal, circle, eigenvalue and degeneracy tests.
    pub epsilon: Decimal,
    /// Decimal places the resulting angle is rounded to.
    pub angle_decimal_places: u32,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            epsilon: dec!(0.00000001),
            angle_decimal_places: 8,
        }
    }
}

/// A symmetric 2x2 matrix (contains no storage for the (0, 1) entry).
#[derive(Debug, Clone)]
struct Symmetric2x2 {
    /// The element at row 0, column 0.
    m_00: Decimal,

    /// The element at row 1, column 0, equal to the one at row 0, column 1.
    m_10: Decimal,

    /// The element at row 1, column 1.
    m_11: Decimal,
}

impl Symmetric2x2 {
    /// Build `N * N^T` from the row-major entries of `N`.
    fn gram(n: &[Decimal; 4]) -> Self {
        Self {
            m_00: n[0] * n[0] + n[2] * n[2],
            m_10: n[0] * n[1] + n[2] * n[3],
            m_11: n[1] * n[1] + n[3] * n[3],
        }
    }

    fn trace(&self) -> Decimal {
        self.m_00 + self.m_11
    }

    fn determinant(&self) -> Decimal {
        self.m_00 * self.m_11 - self.m_10 * self.m_10
    }
}

/// Compute the canonical parameters of the image of an ellipse under an affine map.
///
/// Only the linear part of `matrix` is used; translation moves the centre, which an
/// [`Ellipse`] does not carry.
///
/// The image is the conic whose quadratic form is `N * N^T`, where the columns of `N` are
/// the mapped semi-axis vectors. Its eigenvalues are the squared semi-axes of the result and
/// the direction of the larger one gives the angle. Four relative tolerance tests keep the
/// decomposition well defined:
///
/// * off-diagonal terms that are negligible next to the diagonal are zeroed,
/// * a negligible eigenvalue gap returns a circle without computing eigenvectors,
/// * a larger eigenvalue within tolerance of the bottom-right entry is snapped to it,
/// * a negligible eigenvalue ratio returns the degenerate ellipse `(0, 0, 0)`.
///
/// The linear part and the semi-axes are divided by their largest magnitudes before the form
/// is built, which keeps every intermediate square in range whatever the input size.
///
/// # Arguments
///
/// * `matrix` - The affine map.
/// * `ellipse` - The ellipse to map.
/// * `params` - The tolerance and angle rounding.
///
/// # Returns
///
/// The mapped ellipse, with `rx` paired with the larger eigenvalue. Semi-axes too large for
/// a [`Decimal`] saturate at [`Decimal::MAX`].
///
/// Example:
///
/// ```
/// use rust_decimal_macros::dec;
/// use svgt_algebra::{transform_ellipse, Ellipse, EllipseParams, Matrix};
///
/// let scale = Matrix::scale(dec!(2), dec!(3));
/// let image = transform_ellipse(&scale, &Ellipse::circle(dec!(1)), &EllipseParams::default());
/// assert!(image.rx > image.ry);
/// assert_eq!(image.angle, dec!(90));
/// ```
pub fn transform_ellipse(matrix: &Matrix, ellipse: &Ellipse, params: &EllipseParams) -> Ellipse {
    let epsilon = params.epsilon;
    let degree = degree();

    let [a, b, c, d, _, _] = matrix.to_array();
    let matrix_scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    let radius_scale = ellipse.rx.abs().max(ellipse.ry.abs());
    if matrix_scale.is_zero() || radius_scale.is_zero() {
        return Ellipse::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
    }

    // work on unit-sized copies so no square leaves the decimal range
    let (a, b, c, d) = (
        a / matrix_scale,
        b / matrix_scale,
        c / matrix_scale,
        d / matrix_scale,
    );
    let (rx, ry) = (ellipse.rx / radius_scale, ellipse.ry / radius_scale);

    let phi = ellipse.angle * degree;
    let (sin_phi, cos_phi) = (phi.sin(), phi.cos());

    let axes = [
        rx * (a * cos_phi + c * sin_phi),
        rx * (b * cos_phi + d * sin_phi),
        ry * (c * cos_phi - a * sin_phi),
        ry * (d * cos_phi - b * sin_phi),
    ];

    let mut form = Symmetric2x2::gram(&axes);

    // rounding noise would otherwise show up as a spurious tilt
    if form
        .m_10
        .abs()
        .ratio_le(form.m_00.min(form.m_11), epsilon)
    {
        form.m_10 = Decimal::ZERO;
    }

    let trace = form.trace();
    let discriminant = (trace * trace - form.determinant() * FOUR).max(Decimal::ZERO);

    let is_circle = match circle_tolerance(epsilon, matrix_scale.checked_mul(radius_scale)) {
        Some(bound) => discriminant.ratio_le(trace, bound),
        None => !trace.is_zero(),
    };
    if is_circle {
        log::trace!("ellipse image is a circle, normalized trace {trace}");
        let radius = rescale((trace / TWO).sqrt_or_zero(), matrix_scale, radius_scale);
        return Ellipse::circle(radius);
    }

    let delta = discriminant.sqrt_or_zero();
    let lambda1 = {
        let lambda = (trace + delta) / TWO;
        if (lambda - form.m_11).abs().ratio_le(form.m_11, epsilon) {
            form.m_11
        } else {
            lambda
        }
    };
    let lambda2 = (trace - delta) / TWO;

    if lambda2.ratio_le(lambda1, epsilon) {
        log::trace!("ellipse image is degenerate, eigenvalues {lambda1} and {lambda2}");
        return Ellipse::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
    }

    // pick the form whose atan2 arguments are not both close to zero
    let radians = if form.m_10 >= (lambda1 - form.m_11).abs() {
        (lambda1 - form.m_00).atan2(form.m_10)
    } else {
        form.m_10.atan2(lambda1 - form.m_11)
    };
    let angle = (radians / degree).round_half_up(params.angle_decimal_places);

    Ellipse::new(
        rescale(lambda1.sqrt_or_zero(), matrix_scale, radius_scale),
        rescale(lambda2.sqrt_or_zero(), matrix_scale, radius_scale),
        angle,
    )
}

/// Bound of the circle test once the form has been divided by `scale^2`.
///
/// The eigenvalue gap is measured against the trace, so unlike the other tests it carries
/// one power of the form: the bound shrinks with the square of the removed scale. `None`
/// stands for an unbounded test, when the bound is past the decimal range.
fn circle_tolerance(epsilon: Decimal, scale: Option<Decimal>) -> Option<Decimal> {
    match scale {
        // the bound is below the smallest representable step
        None => Some(Decimal::ZERO),
        Some(scale) => epsilon
            .checked_div(scale)
            .and_then(|bound| bound.checked_div(scale)),
    }
}

/// Restore a normalized semi-axis, saturating at [`Decimal::MAX`].
fn rescale(root: Decimal, matrix_scale: Decimal, radius_scale: Decimal) -> Decimal {
    root.checked_mul(radius_scale)
        .and_then(|radius| radius.checked_mul(matrix_scale))
        .unwrap_or_else(|| {
            log::debug!("semi-axis exceeds the decimal range, saturating");
            Decimal::MAX
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::to_radians;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::Rng;

    const EPSILON: Decimal = dec!(0.000000000001);

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} is not within {tolerance} of {expected}"
        );
    }

    fn rotation(degrees: Decimal) -> Matrix {
        let theta = to_radians(degrees);
        let (sin, cos) = (theta.sin(), theta.cos());
        Matrix::new(cos, sin, -sin, cos, Decimal::ZERO, Decimal::ZERO)
    }

    fn apply(matrix: &Matrix, ellipse: Ellipse) -> Ellipse {
        transform_ellipse(matrix, &ellipse, &EllipseParams::default())
    }

    #[test]
    fn test_default_params() {
        let params = EllipseParams::default();
        assert_eq!(params.epsilon, dec!(0.00000001));
        assert_eq!(params.angle_decimal_places, 8);
    }

    #[test]
    fn test_identity() {
        let ellipse = Ellipse::new(dec!(2), dec!(1), dec!(0));
        let image = apply(&Matrix::IDENTITY, ellipse);
        assert_abs_diff_eq!(image, ellipse, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_circle() {
        let image = apply(&Matrix::scale(dec!(2), dec!(3)), Ellipse::circle(dec!(1)));

        // rx goes with the larger eigenvalue, which lies along y
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(3), dec!(2), dec!(90)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_scale_ellipse_along_x() {
        let image = apply(
            &Matrix::scale(dec!(3), dec!(1)),
            Ellipse::new(dec!(2), dec!(1), dec!(0)),
        );
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(6), dec!(1), dec!(0)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_uniform_scale_keeps_circle() {
        let image = apply(&Matrix::scale(dec!(5), dec!(5)), Ellipse::circle(dec!(2)));
        assert_eq!(image.angle, Decimal::ZERO);
        assert_abs_diff_eq!(image, Ellipse::circle(dec!(10)), epsilon = EPSILON);
        assert!(image.is_circle());
    }

    #[test]
    fn test_circle_invariance() {
        let mut rng = rand::rng();
        for _ in 0..10 {
            let degrees = Decimal::new(rng.random_range(-36_000..36_000), 2);
            let radius = Decimal::new(rng.random_range(1..10_000), 2);

            let image = apply(&rotation(degrees), Ellipse::circle(radius));
            assert_eq!(image.angle, Decimal::ZERO);
            assert_abs_diff_eq!(image, Ellipse::circle(radius), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_rotated_ellipse_both_branches() {
        let ellipse = Ellipse::new(dec!(2), dec!(1), dec!(0));

        // q < |l1 - s|: atan2(q, l1 - s)
        let image = apply(&rotation(dec!(30)), ellipse);
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(2), dec!(1), dec!(30)),
            epsilon = EPSILON
        );

        // q >= |l1 - s|: atan2(l1 - p, q)
        let image = apply(&rotation(dec!(60)), ellipse);
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(2), dec!(1), dec!(60)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotation_of_rotated_ellipse() {
        let ellipse = Ellipse::new(dec!(4), dec!(1), dec!(20));
        let image = apply(&rotation(dec!(25)), ellipse);
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(4), dec!(1), dec!(45)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_angle_is_rounded() {
        let ellipse = Ellipse::new(dec!(3), dec!(1), dec!(0));
        let image = apply(&rotation(dec!(10)), ellipse);
        assert!(image.angle.scale() <= 8);
        assert_close(image.angle, dec!(10), dec!(0.00000001));
    }

    #[test]
    fn test_angle_rounding_is_configurable() {
        let params = EllipseParams {
            angle_decimal_places: 2,
            ..Default::default()
        };
        let ellipse = Ellipse::new(dec!(3), dec!(1), dec!(0));
        let image = transform_ellipse(&rotation(dec!(10)), &ellipse, &params);
        assert_eq!(image.angle, dec!(10));
    }

    #[test]
    fn test_translation_is_ignored() {
        let ellipse = Ellipse::new(dec!(2), dec!(1), dec!(30));
        let image = apply(&Matrix::translation(dec!(100), dec!(-50)), ellipse);
        assert_abs_diff_eq!(image, ellipse, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_collapse() {
        let singular = Matrix::new(
            dec!(1),
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(0),
        );

        for ellipse in [
            Ellipse::circle(dec!(1)),
            Ellipse::new(dec!(2), dec!(1), dec!(30)),
            Ellipse::new(dec!(0.5), dec!(7), dec!(-75)),
        ] {
            let image = apply(&singular, ellipse);
            assert_eq!(image, Ellipse::new(dec!(0), dec!(0), dec!(0)));
            assert!(image.is_degenerate());
        }
    }

    #[test]
    fn test_zero_ellipse() {
        let image = apply(&rotation(dec!(30)), Ellipse::default());
        assert_eq!(image, Ellipse::new(dec!(0), dec!(0), dec!(0)));
    }

    #[test]
    fn test_reflection() {
        // a mirror about the x-axis flips the tilt
        let mirror = Matrix::scale(dec!(1), dec!(-1));
        let image = apply(&mirror, Ellipse::new(dec!(2), dec!(1), dec!(30)));
        assert_abs_diff_eq!(
            image,
            Ellipse::new(dec!(2), dec!(1), dec!(-30)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_shear() {
        // skewX(45) on the unit circle: N N^T = [[2, 1], [1, 1]]
        let shear = Matrix::new(dec!(1), dec!(0), dec!(1), dec!(1), dec!(0), dec!(0));
        let image = apply(&shear, Ellipse::circle(dec!(1)));

        let root5 = dec!(5).sqrt_or_zero();
        let lambda1 = (dec!(3) + root5) / TWO;
        let lambda2 = (dec!(3) - root5) / TWO;
        assert_close(image.rx, lambda1.sqrt_or_zero(), EPSILON);
        assert_close(image.ry, lambda2.sqrt_or_zero(), EPSILON);

        // the major axis direction is atan2(1, lambda1 - 1)
        let expected = (Decimal::ONE.atan2(lambda1 - Decimal::ONE) / degree()).round_half_up(8);
        assert_close(image.angle, expected, dec!(0.00000001));
    }

    #[test]
    fn test_diagonal_snap() {
        // N N^T = [[1, 1e-10], [1e-10, 4 + 1e-20]]
        let matrix = Matrix::new(
            dec!(1),
            dec!(0.0000000001),
            dec!(0),
            dec!(2),
            dec!(0),
            dec!(0),
        );
        let circle = Ellipse::circle(dec!(1));
        let tolerance = dec!(0.000000000000000000000001);

        // the coupling is dropped, leaving rx = sqrt(4 + 1e-20)
        let image = apply(&matrix, circle);
        assert_close(image.rx, dec!(2.0000000000000000000025), tolerance);
        assert_eq!(image.angle, dec!(90));

        // kept, it lifts the larger eigenvalue by q^2 / 3
        let exact = EllipseParams {
            epsilon: Decimal::ZERO,
            ..Default::default()
        };
        let image = transform_ellipse(&matrix, &circle, &exact);
        assert_close(image.rx, dec!(2.0000000000000000000033333333), tolerance);
    }

    #[test]
    fn test_eigenvalue_snap() {
        // N N^T = [[1, 1e-5], [1e-5, 4 + 1e-10]], the larger eigenvalue is s + ~3.3e-11
        let matrix = Matrix::new(
            dec!(1),
            dec!(0.00001),
            dec!(0),
            dec!(2),
            dec!(0),
            dec!(0),
        );
        let circle = Ellipse::circle(dec!(1));
        let snapped = dec!(4.0000000001).sqrt_or_zero();

        let image = apply(&matrix, circle);
        assert_close(image.rx, snapped, dec!(0.00000000000000000001));

        let exact = EllipseParams {
            epsilon: Decimal::ZERO,
            ..Default::default()
        };
        let image = transform_ellipse(&matrix, &circle, &exact);
        assert!((image.rx - snapped).abs() > dec!(0.000000000001));
    }

    #[test]
    fn test_large_semi_axes() {
        let ellipse = Ellipse::new(dec!(20000000), dec!(10000000), dec!(0));
        let image = apply(&Matrix::IDENTITY, ellipse);
        assert_abs_diff_eq!(image, ellipse, epsilon = EPSILON);

        // the unscaled form would hold entries around 1e54
        let scale = Matrix::scale(dec!(100000000000000000000), dec!(100000000000000000000));
        let image = apply(&scale, Ellipse::new(dec!(10000000), dec!(5000000), dec!(30)));
        assert_relative_eq!(
            image,
            Ellipse::new(
                dec!(1000000000000000000000000000),
                dec!(500000000000000000000000000),
                dec!(30)
            ),
            max_relative = dec!(0.000000000001)
        );
    }

    #[test]
    fn test_large_circle() {
        let scale = Matrix::scale(dec!(10000000000), dec!(10000000000));
        let image = apply(&scale, Ellipse::circle(dec!(10000000000)));
        assert_eq!(image.angle, Decimal::ZERO);
        assert!(image.is_circle());
        assert_relative_eq!(
            image,
            Ellipse::circle(dec!(100000000000000000000)),
            max_relative = dec!(0.00000000000000000001)
        );
    }

    #[test]
    fn test_semi_axes_saturate() {
        let ellipse = Ellipse::new(
            dec!(1000000000000000000000000000),
            dec!(500000000000000000000000000),
            dec!(30),
        );
        let image = apply(&Matrix::scale(dec!(1000), dec!(1000)), ellipse);
        assert_eq!(image.rx, Decimal::MAX);
        assert_eq!(image.ry, Decimal::MAX);
        assert_close(image.angle, dec!(30), dec!(0.00000001));
    }
}
