//! Stroke and line-style definitions.
//!
//! Every line of a band diagram (marker segments, connectors, vacuum levels,
//! axis spines and ticks) is described by a [`StrokeDefinition`].
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: color, width, pattern and cap of a stroke
//! - [`StrokeStyle`]: line pattern (solid or dashed)
//! - [`StrokeCap`]: how line endpoints are rendered
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#F39C12"`, `1` |
//! | `width` | `stroke-width` | `5.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |
//! | `cap` | `stroke-linecap` | `"butt"`, `"square"` |

use crate::color::Color;

/// Visual pattern of a stroke.
///
/// Vacuum levels are dashed; every other line is solid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// Dash pattern "5,5"
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint
    #[default]
    Butt,
    /// Square cap extending beyond the endpoint by half the stroke width
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Square => "square",
        }
    }
}

/// A stroke definition for rendering lines.
///
/// # Examples
///
/// ```
/// use bandalign_core::draw::{StrokeDefinition, StrokeStyle};
/// use bandalign_core::color::Color;
///
/// let marker = StrokeDefinition::solid(Color::new("#F39C12").unwrap(), 5.0);
/// assert_eq!(marker.width(), 5.0);
///
/// let vacuum = StrokeDefinition::dashed(Color::new("gray").unwrap(), 2.0);
/// assert_eq!(vacuum.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width and a butt cap.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::new(color, width)
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Returns the stroke cap style.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Sets the stroke cap style.
    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Applies color, opacity, width, line cap and the dash pattern (if not solid).
///
/// # Examples
///
/// ```
/// use bandalign_core::draw::StrokeDefinition;
/// use bandalign_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("#3498DB").unwrap(), 5.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 10)
///     .set("x2", 40)
///     .set("y2", 10);
///
/// let line = bandalign_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
