//! Visual definitions for band diagram elements.
//!
//! - [`StrokeDefinition`] describes how a line is stroked.
//! - [`TextDefinition`] and [`Text`] describe and render text.
//! - [`LayeredOutput`] collects SVG nodes by [`RenderLayer`].

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::Point;

/// Something that renders itself to SVG nodes at a canvas position.
pub trait Drawable {
    /// Render to layered SVG nodes with `position` as the anchor point.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
