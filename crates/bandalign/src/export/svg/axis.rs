//! Axis rendering: left and bottom spines, inward ticks, tick labels and the
//! y-axis title. Top and right spines are never drawn.

use svg::node::element as svg_element;

use bandalign_core::{
    apply_stroke,
    color::Color,
    draw::{
        Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition,
    },
    geometry::Point,
};

use super::projection::Projection;

/// Length of tick marks in canvas pixels.
const TICK_LENGTH: f32 = 5.0;
/// Gap between the bottom spine and the x tick label baselines.
const X_LABEL_OFFSET: f32 = 16.0;
/// Gap between the left spine and the right edge of y tick labels.
const Y_LABEL_OFFSET: f32 = 6.0;
/// Distance of the y-axis title from the left canvas edge.
const Y_TITLE_OFFSET: f32 = 18.0;
/// Approximate number of y ticks.
const Y_TICK_TARGET: usize = 6;

/// Axis decorations of one rendered document.
pub struct Axis<'a> {
    pub x_ticks: &'a [(f32, String)],
    pub y_title: Option<&'a str>,
    pub text: &'a TextDefinition,
}

impl Axis<'_> {
    pub fn render(&self, projection: &Projection) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let plot = projection.plot();
        let data = projection.data();
        let stroke = StrokeDefinition::solid(Color::default(), 1.0);

        let left = spine(
            Point::new(plot.min_x(), plot.min_y()),
            Point::new(plot.min_x(), plot.max_y()),
            &stroke,
        );
        let bottom = spine(
            Point::new(plot.min_x(), plot.max_y()),
            Point::new(plot.max_x(), plot.max_y()),
            &stroke,
        );
        output.add_to_layer(RenderLayer::Axis, left);
        output.add_to_layer(RenderLayer::Axis, bottom);

        for (x, label) in self.x_ticks {
            if *x < data.min_x() || *x > data.max_x() {
                continue;
            }
            let px = projection.x(*x);
            let tick = spine(
                Point::new(px, plot.max_y()),
                Point::new(px, plot.max_y() - TICK_LENGTH),
                &stroke,
            );
            output.add_to_layer(RenderLayer::Axis, tick);
            output.merge(
                Text::new(self.text, label)
                    .with_anchor(TextAnchor::Middle)
                    .render_to_layers(Point::new(px, plot.max_y() + X_LABEL_OFFSET)),
            );
        }

        let (values, decimals) = nice_ticks(data.min_y(), data.max_y(), Y_TICK_TARGET);
        for value in values {
            let py = projection.y(value);
            let tick = spine(
                Point::new(plot.min_x(), py),
                Point::new(plot.min_x() + TICK_LENGTH, py),
                &stroke,
            );
            output.add_to_layer(RenderLayer::Axis, tick);

            let label = format!("{value:.decimals$}");
            output.merge(
                Text::new(self.text, &label)
                    .with_anchor(TextAnchor::End)
                    .render_to_layers(Point::new(plot.min_x() - Y_LABEL_OFFSET, py + 4.0)),
            );
        }

        if let Some(title) = self.y_title {
            let center_y = (plot.min_y() + plot.max_y()) / 2.0;
            output.merge(
                Text::new(self.text, title)
                    .with_anchor(TextAnchor::Middle)
                    .with_rotation(-90.0)
                    .render_to_layers(Point::new(Y_TITLE_OFFSET, center_y)),
            );
        }

        output
    }
}

fn spine(from: Point, to: Point, stroke: &StrokeDefinition) -> Box<dyn svg::Node> {
    let line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y());
    Box::new(apply_stroke!(line, stroke))
}

/// Tick values at a 1, 2 or 5 × 10ⁿ step covering `[min, max]`, and the
/// number of decimals needed to print them.
///
/// Returns no ticks for an empty or non-finite range.
pub fn nice_ticks(min: f32, max: f32, target: usize) -> (Vec<f32>, usize) {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return (Vec::new(), 0);
    }

    let raw = span / target as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let step = match raw / magnitude {
        norm if norm < 1.5 => 1.0,
        norm if norm < 3.0 => 2.0,
        norm if norm < 7.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let decimals = (-step.log10().floor()).max(0.0) as usize;

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-3).floor() as i64;
    let ticks = (first..=last)
        .map(|i| i as f32 * step)
        // Avoid printing "-0.0"
        .map(|value| if value.abs() < step * 1e-6 { 0.0 } else { value })
        .collect();

    (ticks, decimals)
}
