//! SVG rendering surface.
//!
//! [`SvgSurface`] implements [`Surface`] by recording drawing calls in data
//! space. The document is produced on demand, once the full extent of the
//! drawing is known: data bounds are padded by a small margin and projected
//! onto the plot area of the canvas.

mod axis;
mod projection;

use std::{fs, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use bandalign_core::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Insets, Point},
};

use crate::{config::StyleConfig, export, surface::Surface};

use axis::Axis;
use projection::Projection;

/// Fraction of the data extent added on every side of the plot.
const DATA_MARGIN: f32 = 0.05;
/// Extent given to an axis whose data has zero extent.
const MIN_DATA_EXTENT: f32 = 1.0;

/// Records drawing calls and renders them as an SVG document.
///
/// Several layouts may be drawn onto the same surface; the most recent x
/// ticks and y title win.
///
/// # Examples
///
/// ```
/// use bandalign::{SvgSurface, Surface, config::StyleConfig};
/// use bandalign::{color::Color, draw::StrokeDefinition, geometry::Point};
///
/// let mut surface = SvgSurface::new(&StyleConfig::default());
/// let stroke = StrokeDefinition::solid(Color::new("#F39C12").unwrap(), 5.0);
/// surface.draw_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &stroke);
///
/// let svg = surface.to_svg_string().unwrap();
/// assert!(svg.contains("<line"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgSurface {
    style: StyleConfig,
    text: TextDefinition,
    segments: Vec<(Point, Point, StrokeDefinition)>,
    labels: Vec<(Point, String)>,
    x_ticks: Vec<(f32, String)>,
    y_title: Option<String>,
}

impl SvgSurface {
    /// Creates an empty surface rendered with `style`.
    pub fn new(style: &StyleConfig) -> Self {
        let mut text = TextDefinition::new();
        text.set_font_family(style.font_family());
        text.set_font_size(style.font_size());

        Self {
            style: style.clone(),
            text,
            segments: Vec::new(),
            labels: Vec::new(),
            x_ticks: Vec::new(),
            y_title: None,
        }
    }

    /// Returns `true` if nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.labels.is_empty()
    }

    /// Returns the number of segments drawn so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of labels drawn so far.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the padded data-space region shown on the plot.
    ///
    /// Covers every segment endpoint, label anchor and x tick. An empty
    /// surface shows the unit region around the origin.
    pub fn data_bounds(&self) -> Bounds {
        let points = self
            .segments
            .iter()
            .flat_map(|(from, to, _)| [*from, *to])
            .chain(self.labels.iter().map(|(position, _)| *position));

        let bounds = match Bounds::enclosing(points) {
            Some(bounds) => self
                .x_ticks
                .iter()
                .fold(bounds, |acc, (x, _)| acc.include_point(Point::new(*x, acc.min_y()))),
            None => Bounds::enclosing(self.x_ticks.iter().map(|(x, _)| Point::new(*x, 0.0)))
                .unwrap_or_default(),
        };

        bounds.expand(DATA_MARGIN, MIN_DATA_EXTENT)
    }

    /// Builds the SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a non-positive canvas size, a
    /// canvas too small for its margins, or an invalid background color.
    pub fn to_document(&self) -> Result<Document, export::Error> {
        let (width, height) = (self.style.width(), self.style.height());
        let margins = Insets::new(20.0, 20.0, 50.0, 70.0);

        if !(width > margins.horizontal_sum() && height > margins.vertical_sum()) {
            return Err(export::Error::Render(format!(
                "canvas {width}x{height} is too small for its margins"
            )));
        }

        let canvas =
            Bounds::from_point(Point::default()).include_point(Point::new(width, height));
        let projection = Projection::new(self.data_bounds(), canvas.shrink(margins));
        debug!(width, height; "Rendering SVG document");

        let mut output = LayeredOutput::new();

        if let Some(color) = self
            .style
            .background_color()
            .map_err(export::Error::Render)?
        {
            let background = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        let axis = Axis {
            x_ticks: &self.x_ticks,
            y_title: self.y_title.as_deref(),
            text: &self.text,
        };
        output.merge(axis.render(&projection));

        for (from, to, stroke) in &self.segments {
            let (from, to) = (projection.point(*from), projection.point(*to));
            let line = svg_element::Line::new()
                .set("x1", from.x())
                .set("y1", from.y())
                .set("x2", to.x())
                .set("y2", to.y());
            output.add_to_layer(RenderLayer::Band, Box::new(apply_stroke!(line, stroke)));
        }

        for (position, content) in &self.labels {
            let text = Text::new(&self.text, content);
            output.merge(text.render_to_layers(projection.point(*position)));
        }

        let document = output.render().into_iter().fold(
            Document::new()
                .set("width", width)
                .set("height", height)
                .set("viewBox", (0.0, 0.0, width, height)),
            |document, node| document.add(node),
        );

        Ok(document)
    }

    /// Renders the document to an SVG string.
    pub fn to_svg_string(&self) -> Result<String, export::Error> {
        Ok(self.to_document()?.to_string())
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), export::Error> {
        let path = path.as_ref();
        let content = self.to_svg_string()?;

        info!(path = path.display().to_string(); "Writing SVG file");
        fs::write(path, content).map_err(|err| {
            error!(path = path.display().to_string(), err:% = err; "Failed to write SVG file");
            export::Error::Io(err)
        })
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(&StyleConfig::default())
    }
}

impl Surface for SvgSurface {
    fn draw_segment(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        self.segments.push((from, to, stroke.clone()));
    }

    fn draw_label(&mut self, position: Point, text: &str) {
        self.labels.push((position, text.to_string()));
    }

    fn set_x_ticks(&mut self, positions: &[f32], labels: &[String]) {
        self.x_ticks = positions.iter().copied().zip(labels.iter().cloned()).collect();
    }

    fn set_y_title(&mut self, title: &str) {
        self.y_title = Some(title.to_string());
    }
}
