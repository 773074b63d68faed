use rust_decimal::Decimal;

use crate::tolerance::impl_approx;

/// An absolute position in user space.
///
/// Points are moved by the full affine map, translation included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: Decimal,
    /// The y coordinate.
    pub y: Decimal,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(Decimal::ZERO, Decimal::ZERO);

    /// Create a new point.
    pub const fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    /// The coordinates as `[x, y]`.
    pub fn to_array(&self) -> [Decimal; 2] {
        [self.x, self.y]
    }
}

impl From<[Decimal; 2]> for Point {
    fn from([x, y]: [Decimal; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(Decimal, Decimal)> for Point {
    fn from((x, y): (Decimal, Decimal)) -> Self {
        Self::new(x, y)
    }
}

/// A direction or offset, such as a relative path segment.
///
/// Vectors are moved by the linear part of the map only; translation does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// The x component.
    pub x: Decimal,
    /// The y component.
    pub y: Decimal,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(Decimal::ZERO, Decimal::ZERO);

    /// Create a new vector.
    pub const fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    /// The components as `[x, y]`.
    pub fn to_array(&self) -> [Decimal; 2] {
        [self.x, self.y]
    }
}

impl From<[Decimal; 2]> for Vector {
    fn from([x, y]: [Decimal; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(Decimal, Decimal)> for Vector {
    fn from((x, y): (Decimal, Decimal)) -> Self {
        Self::new(x, y)
    }
}

impl_approx!(Point, 2);
impl_approx!(Vector, 2);
