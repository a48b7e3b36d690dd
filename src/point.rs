use noisy_float::{
    prelude::Float,
    types::{r32, R32},
};
use std::ops;

/// A [`Point`] on the editor canvas.
///
/// This contains only real values, taken from the [`noisy_float`] library. When compiled these values will panic when they are set to `NaN` or `Infinity`.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    ///
    pub x: R32,
    ///
    pub y: R32,
}

impl Point {
    /// Create a point at `0, 0`
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            x: R32::unchecked_new(0.0),
            y: R32::unchecked_new(0.0),
        }
    }
    /// Create a point at `x, y`. In debug mode this will panic when `x` or `y` are `NaN` or `Infinity`
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: r32(x),
            y: r32(y),
        }
    }

    /// Create a point at `x, y` with `noisy_float`'s [`R32`]
    #[must_use]
    pub const fn new_noisy_float(x: R32, y: R32) -> Self {
        Self { x, y }
    }

    /// Get the squared distance to another point
    #[must_use]
    pub fn distance_squared_to(&self, other: Point) -> R32 {
        let result =
            (self.x.raw() - other.x.raw()).powf(2.0) + (self.y.raw() - other.y.raw()).powf(2.0);
        if let Some(result) = R32::try_new(result) {
            result
        } else {
            R32::max_value()
        }
    }

    /// Get the distance to another point
    #[must_use]
    pub fn distance_to(&self, other: Point) -> R32 {
        self.distance_squared_to(other).sqrt()
    }

    /// Move this point by `amount` on both axes, clamping to the largest finite values instead of overflowing
    #[must_use]
    pub fn saturating_add(self, amount: R32) -> Self {
        Self {
            x: saturate(self.x.raw() + amount.raw()),
            y: saturate(self.y.raw() + amount.raw()),
        }
    }

    /// Move this point by `-amount` on both axes, clamping to the largest finite values instead of overflowing
    #[must_use]
    pub fn saturating_sub(self, amount: R32) -> Self {
        Self {
            x: saturate(self.x.raw() - amount.raw()),
            y: saturate(self.y.raw() - amount.raw()),
        }
    }

    /// Move this point by `dx, dy`
    #[must_use]
    pub fn offset(self, dx: R32, dy: R32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Turn a raw result back into an [`R32`], clamping infinities to the largest finite value with the same sign
pub(crate) fn saturate(value: f32) -> R32 {
    R32::try_new(value).unwrap_or(if value > 0.0 {
        R32::max_value()
    } else {
        R32::min_value()
    })
}

impl ops::Add<R32> for Point {
    type Output = Point;

    fn add(self, rhs: R32) -> Self {
        Self {
            x: self.x + rhs,
            y: self.y + rhs,
        }
    }
}
impl ops::Sub<R32> for Point {
    type Output = Point;

    fn sub(self, rhs: R32) -> Self {
        Self {
            x: self.x - rhs,
            y: self.y - rhs,
        }
    }
}

/// The axis-aligned square of half-width `radius` around a center point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Window {
    top_left: Point,
    bottom_right: Point,
}

impl Window {
    pub fn around(center: Point, radius: R32) -> Self {
        Self {
            top_left: center.saturating_sub(radius),
            bottom_right: center.saturating_add(radius),
        }
    }

    pub fn top(self) -> R32 {
        self.top_left.y
    }

    pub fn bottom(self) -> R32 {
        self.bottom_right.y
    }

    pub fn contains(self, point: Point) -> bool {
        !(self.top_left.x > point.x
            || self.bottom_right.x < point.x
            || self.top_left.y > point.y
            || self.bottom_right.y < point.y)
    }
}

#[test]
fn window_is_inclusive() {
    let window = Window::around(Point::new(0., 0.), r32(2.0));
    assert!(window.contains(Point::new(2., 2.)));
    assert!(window.contains(Point::new(-2., -2.)));
    assert!(!window.contains(Point::new(2.5, 0.)));
    assert!(!window.contains(Point::new(0., -2.5)));
}

#[test]
fn window_saturates() {
    let window = Window::around(Point::new(3.0e38, -3.0e38), r32(1.0e38));
    assert_eq!(window.top(), R32::min_value());
    assert!(window.bottom() > r32(-2.1e38) && window.bottom() < r32(-1.9e38));
    assert!(window.contains(Point::new(3.0e38, -3.0e38)));
    assert!(window.contains(Point::new(f32::MAX, f32::MIN)));

    let everything = Window::around(Point::zero(), R32::max_value());
    assert!(everything.contains(Point::new(f32::MIN, f32::MAX)));
}
