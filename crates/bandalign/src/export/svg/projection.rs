//! Mapping from data space to canvas space.

use bandalign_core::geometry::{Bounds, Point};

/// Maps data coordinates (energy up) into a plot area on the canvas (y down).
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    data: Bounds,
    plot: Bounds,
}

impl Projection {
    /// Both bounds must have a positive width and height.
    pub fn new(data: Bounds, plot: Bounds) -> Self {
        debug_assert!(data.width() > 0.0 && data.height() > 0.0);
        Self { data, plot }
    }

    pub fn data(&self) -> Bounds {
        self.data
    }

    pub fn plot(&self) -> Bounds {
        self.plot
    }

    pub fn x(&self, x: f32) -> f32 {
        self.plot.min_x() + (x - self.data.min_x()) / self.data.width() * self.plot.width()
    }

    pub fn y(&self, y: f32) -> f32 {
        self.plot.max_y() - (y - self.data.min_y()) / self.data.height() * self.plot.height()
    }

    pub fn point(&self, point: Point) -> Point {
        Point::new(self.x(point.x()), self.y(point.y()))
    }
}
