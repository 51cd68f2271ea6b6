//! The drawing surface a layout is rendered onto.
//!
//! [`Surface`] is the seam between the layout engine and a concrete renderer.
//! The crate ships [`SvgSurface`](crate::SvgSurface); other backends only need
//! to implement the four methods below.

use log::trace;

use bandalign_core::{
    draw::StrokeDefinition,
    geometry::Point,
    primitive::DrawPrimitive,
};

use crate::Layout;

/// A 2D drawing target working in data coordinates.
pub trait Surface {
    /// Draw a straight line from `from` to `to`.
    fn draw_segment(&mut self, from: Point, to: Point, stroke: &StrokeDefinition);

    /// Draw `text` with its baseline starting at `position`.
    fn draw_label(&mut self, position: Point, text: &str);

    /// Replace the x-axis ticks. `positions` and `labels` have equal length.
    fn set_x_ticks(&mut self, positions: &[f32], labels: &[String]);

    /// Set the y-axis title.
    fn set_y_title(&mut self, title: &str);
}

/// Replays `layout` onto `surface` in primitive order, then applies its axis.
pub fn draw_layout<S: Surface + ?Sized>(surface: &mut S, layout: &Layout) {
    for primitive in layout.primitives() {
        match primitive {
            DrawPrimitive::Segment(segment) => {
                surface.draw_segment(segment.from(), segment.to(), segment.stroke());
            }
            DrawPrimitive::Label(label) => surface.draw_label(label.position(), label.text()),
        }
    }

    let axis = layout.axis();
    surface.set_x_ticks(axis.tick_positions(), axis.tick_labels());
    surface.set_y_title(axis.y_title());

    trace!(primitives = layout.primitives().len(); "Layout drawn");
}
