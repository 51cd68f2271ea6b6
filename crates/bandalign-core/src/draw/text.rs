//! Text rendering for value labels, tick labels and axis titles.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! ```
//! # use bandalign_core::draw::{Drawable, Text, TextAnchor, TextDefinition};
//! # use bandalign_core::geometry::Point;
//! let mut style = TextDefinition::new();
//! style.set_font_size(11);
//!
//! let label = Text::new(&style, "1.5").with_anchor(TextAnchor::Middle);
//! let output = label.render_to_layers(Point::new(10.0, 20.0));
//! assert!(!output.is_empty());
//! ```

use svg::node::element as svg_element;

use crate::{
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::Point,
};

/// Horizontal alignment of text relative to its anchor point.
///
/// Maps to the SVG `text-anchor` attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG text-anchor value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
///
/// Text is filled with the SVG default color.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g. "Helvetica", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
        }
    }
}

/// A single line of text with a style, an anchor and an optional rotation.
///
/// The anchor point is on the text baseline.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    anchor: TextAnchor,
    rotation: Option<f32>,
}

impl<'a> Text<'a> {
    /// Creates a new start-anchored, unrotated text element.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            anchor: TextAnchor::Start,
            rotation: None,
        }
    }

    /// Sets the horizontal anchor (builder style).
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Rotates the text around its anchor by `degrees` (builder style).
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut rendered = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.anchor.to_svg_value())
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(degrees) = self.rotation {
            rendered = rendered.set(
                "transform",
                format!("rotate({degrees} {} {})", position.x(), position.y()),
            );
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered));
        output
    }
}
