//! Geometric primitives for band diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate Systems
//!
//! Two coordinate systems meet in this crate. Layout output lives in **data
//! space**: `x` is the horizontal position along the junction sequence and `y`
//! is an energy in electron-volts, increasing upward. Renderers map data space
//! onto a **canvas space** consistent with SVG, where the origin is the
//! top-left corner and `y` increases downward.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use bandalign_core::geometry::Point;
/// let point = Point::new(10.0, 1.5);
/// assert_eq!(point.x(), 10.0);
/// assert_eq!(point.y(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds are orientation agnostic: `min_y` is the smallest `y` value whether
/// `y` grows upward (data space) or downward (canvas space).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates zero-sized bounds located at a single point
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Creates the smallest bounds containing every point of `points`.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bandalign_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::enclosing([Point::new(0.0, 1.0), Point::new(20.0, -1.0)]).unwrap();
    /// assert_eq!(bounds.width(), 20.0);
    /// assert_eq!(bounds.height(), 2.0);
    ///
    /// assert!(Bounds::enclosing(std::iter::empty()).is_none());
    /// ```
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |acc, point| acc.include_point(point)))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the smallest bounds containing both `self` and `point`
    pub fn include_point(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Grows each axis by `fraction` of its extent on both sides.
    ///
    /// An axis with zero extent is widened instead, by `min_extent / 2` or by
    /// `fraction` of its magnitude, whichever is larger, so the result always
    /// has a positive, finite extent for finite input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bandalign_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::enclosing([Point::new(0.0, 2.0), Point::new(10.0, 2.0)]).unwrap();
    /// let expanded = bounds.expand(0.1, 1.0);
    /// assert_eq!(expanded.min_x(), -1.0);
    /// assert_eq!(expanded.max_x(), 11.0);
    /// assert_eq!(expanded.min_y(), 1.5);
    /// assert_eq!(expanded.max_y(), 2.5);
    ///
    /// let far = Bounds::from_point(Point::new(0.0, 1e8)).expand(0.05, 1.0);
    /// assert!(far.height() > 0.0);
    /// ```
    pub fn expand(self, fraction: f32, min_extent: f32) -> Self {
        fn grow(min: f32, max: f32, fraction: f32, min_extent: f32) -> (f32, f32) {
            let extent = max - min;
            if extent > 0.0 {
                let pad = extent * fraction;
                return (min - pad, max + pad);
            }

            let half = (min_extent / 2.0).max(min.abs() * fraction);
            let clamp = |value: f32| value.clamp(f32::MIN, f32::MAX);
            let (low, high) = (clamp(min - half), clamp(max + half));
            if high > low {
                (low, high)
            } else {
                // Padding below the precision of the value
                (clamp(min.next_down()), clamp(max.next_up()))
            }
        }

        let (min_x, max_x) = grow(self.min_x, self.max_x, fraction, min_extent);
        let (min_y, max_y) = grow(self.min_y, self.max_y, fraction, min_extent);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Shrinks the bounds by the given insets.
    ///
    /// Used to derive a plot area from a canvas and its margins.
    pub fn shrink(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left(),
            min_y: self.min_y + insets.top(),
            max_x: self.max_x - insets.right(),
            max_y: self.max_y - insets.bottom(),
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_bounds_enclosing() {
        let bounds = Bounds::enclosing([
            Point::new(10.0, 0.5),
            Point::new(0.0, 1.5),
            Point::new(20.0, -1.0),
        ])
        .unwrap();

        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.max_x(), 20.0);
        assert_eq!(bounds.min_y(), -1.0);
        assert_eq!(bounds.max_y(), 1.5);
    }

    #[test]
    fn test_bounds_expand_zero_extent() {
        let bounds = Bounds::from_point(Point::new(5.0, 1.0)).expand(0.05, 1.0);
        assert_eq!(bounds.min_x(), 4.5);
        assert_eq!(bounds.max_x(), 5.5);
        assert_eq!(bounds.min_y(), 0.5);
        assert_eq!(bounds.max_y(), 1.5);
    }

    #[test]
    fn test_bounds_expand_zero_extent_at_large_magnitude() {
        let bounds = Bounds::from_point(Point::new(30.0, 1e8)).expand(0.05, 1.0);
        assert!(bounds.height() > 0.0);
        assert!(bounds.min_y() < 1e8 && bounds.max_y() > 1e8);
        assert!(bounds.min_y().is_finite() && bounds.max_y().is_finite());

        let bounds = Bounds::from_point(Point::new(0.0, f32::MAX)).expand(0.05, 1.0);
        assert!(bounds.height() > 0.0 && bounds.height().is_finite());
        assert_eq!(bounds.max_y(), f32::MAX);
    }

    #[test]
    fn test_bounds_shrink() {
        let canvas = Bounds::enclosing([Point::new(0.0, 0.0), Point::new(640.0, 480.0)]).unwrap();
        let plot = canvas.shrink(Insets::new(20.0, 30.0, 50.0, 70.0));

        assert_eq!(plot.min_x(), 70.0);
        assert_eq!(plot.min_y(), 20.0);
        assert_eq!(plot.max_x(), 610.0);
        assert_eq!(plot.max_y(), 430.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 4.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (point_strategy(), point_strategy())
            .prop_map(|(a, b)| Bounds::from_point(a).include_point(b))
    }

    /// Every point passed to `enclosing` lies inside the result.
    fn check_enclosing_contains_all(points: Vec<Point>) -> Result<(), TestCaseError> {
        let bounds = Bounds::enclosing(points.iter().copied()).unwrap();
        for point in points {
            prop_assert!(bounds.min_x() <= point.x() && point.x() <= bounds.max_x());
            prop_assert!(bounds.min_y() <= point.y() && point.y() <= bounds.max_y());
        }
        Ok(())
    }

    /// Expanding never shrinks and always yields a positive extent.
    fn check_expand_grows(bounds: Bounds, fraction: f32) -> Result<(), TestCaseError> {
        let expanded = bounds.expand(fraction, 1.0);
        prop_assert!(expanded.width() > 0.0);
        prop_assert!(expanded.height() > 0.0);
        prop_assert!(expanded.min_x() <= bounds.min_x());
        prop_assert!(expanded.max_y() >= bounds.max_y());
        if bounds.width() > 0.0 {
            prop_assert!(approx_eq!(
                f32,
                expanded.width(),
                bounds.width() * (1.0 + 2.0 * fraction),
                epsilon = 0.01
            ));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn enclosing_contains_all(points in prop::collection::vec(point_strategy(), 1..20)) {
            check_enclosing_contains_all(points)?;
        }

        #[test]
        fn expand_grows(bounds in bounds_strategy(), fraction in 0.0f32..0.5) {
            check_expand_grows(bounds, fraction)?;
        }
    }
}
