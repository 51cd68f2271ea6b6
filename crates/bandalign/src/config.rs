//! Configuration types for band diagram layout and rendering.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs to name the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Geometry, palette and labelling of the layout engine.
//! - [`StyleConfig`] - Canvas and font settings of the SVG renderer.
//!
//! # Example
//!
//! ```
//! # use bandalign::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().marker_width(), 10.0);
//! assert!(config.layout().validate().is_ok());
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use bandalign_core::color::Color;

use crate::BandAlignError;

/// Default valence-band color (orange).
pub const DEFAULT_VALENCE_COLOR: &str = "#F39C12";
/// Default conduction-band color (blue).
pub const DEFAULT_CONDUCTION_COLOR: &str = "#3498DB";
/// Neutral color used for vacuum levels.
pub const VACUUM_COLOR: &str = "#7F8C8D";

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// What to do with a band that has a value on only one side of a junction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncompletePairPolicy {
    /// Drop the band from the junction and log a warning.
    #[default]
    Skip,
    /// Fail with [`BandAlignError::IncompletePair`].
    Error,
}

/// Colors of the valence and conduction bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    valence: Color,
    conduction: Color,
    vacuum: Color,
}

impl Palette {
    /// Returns the valence-band color.
    pub fn valence(&self) -> Color {
        self.valence
    }

    /// Returns the conduction-band color.
    pub fn conduction(&self) -> Color {
        self.conduction
    }

    /// Returns the neutral vacuum-level color.
    pub fn vacuum(&self) -> Color {
        self.vacuum
    }
}

/// Settings of the layout engine.
///
/// | Key | Meaning | Default |
/// |-----|---------|---------|
/// | `marker_width` | horizontal extent `w` of each half junction | `10.0` |
/// | `spacing` | gap `s` between consecutive junctions | `10.0` |
/// | `marker_line_width` | stroke width of band-edge markers | `5.0` |
/// | `connector_line_width` | stroke width of connectors and vacuum levels | `2.0` |
/// | `valence_color` | valence-band color | `#F39C12` |
/// | `conduction_color` | conduction-band color | `#3498DB` |
/// | `show_labels` | draw the numeric value next to each band edge | `true` |
/// | `label_precision` | fixed decimals for labels, shortest form if unset | unset |
/// | `tick_labels` | one x tick label per junction | `0, 1, 2, ...` |
/// | `incomplete_pairs` | `skip` or `error` | `skip` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    marker_width: f32,
    spacing: f32,
    marker_line_width: f32,
    connector_line_width: f32,
    valence_color: String,
    conduction_color: String,
    show_labels: bool,
    label_precision: Option<usize>,
    tick_labels: Option<Vec<String>>,
    incomplete_pairs: IncompletePairPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_width: 10.0,
            spacing: 10.0,
            marker_line_width: 5.0,
            connector_line_width: 2.0,
            valence_color: DEFAULT_VALENCE_COLOR.to_string(),
            conduction_color: DEFAULT_CONDUCTION_COLOR.to_string(),
            show_labels: true,
            label_precision: None,
            tick_labels: None,
            incomplete_pairs: IncompletePairPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the marker width `w` and the inter-junction spacing `s`.
    pub fn with_geometry(mut self, marker_width: f32, spacing: f32) -> Self {
        self.marker_width = marker_width;
        self.spacing = spacing;
        self
    }

    /// Sets the marker and connector stroke widths.
    pub fn with_line_widths(mut self, marker: f32, connector: f32) -> Self {
        self.marker_line_width = marker;
        self.connector_line_width = connector;
        self
    }

    /// Sets the valence and conduction colors as CSS color strings.
    pub fn with_palette(mut self, valence: &str, conduction: &str) -> Self {
        self.valence_color = valence.to_string();
        self.conduction_color = conduction.to_string();
        self
    }

    /// Enables or disables numeric value labels.
    pub fn with_show_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    /// Sets a fixed number of decimals for value labels.
    pub fn with_label_precision(mut self, precision: Option<usize>) -> Self {
        self.label_precision = precision;
        self
    }

    /// Sets explicit x tick labels, one per junction.
    pub fn with_tick_labels(mut self, labels: Option<Vec<String>>) -> Self {
        self.tick_labels = labels;
        self
    }

    /// Sets the policy for bands with a value on only one side.
    pub fn with_incomplete_pairs(mut self, policy: IncompletePairPolicy) -> Self {
        self.incomplete_pairs = policy;
        self
    }

    /// Enables or disables numeric value labels in place.
    pub fn set_show_labels(&mut self, show_labels: bool) {
        self.show_labels = show_labels;
    }

    /// Sets explicit x tick labels in place.
    pub fn set_tick_labels(&mut self, labels: Option<Vec<String>>) {
        self.tick_labels = labels;
    }

    pub fn marker_width(&self) -> f32 {
        self.marker_width
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn marker_line_width(&self) -> f32 {
        self.marker_line_width
    }

    pub fn connector_line_width(&self) -> f32 {
        self.connector_line_width
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn label_precision(&self) -> Option<usize> {
        self.label_precision
    }

    pub fn tick_labels(&self) -> Option<&[String]> {
        self.tick_labels.as_deref()
    }

    pub fn incomplete_pairs(&self) -> IncompletePairPolicy {
        self.incomplete_pairs
    }

    /// Returns the parsed band [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns [`BandAlignError::InvalidConfig`] if a color string cannot be parsed.
    pub fn palette(&self) -> Result<Palette, BandAlignError> {
        let parse = |key: &str, value: &str| {
            Color::new(value)
                .map_err(|err| BandAlignError::InvalidConfig(format!("`{key}`: {err}")))
        };

        Ok(Palette {
            valence: parse("valence_color", &self.valence_color)?,
            conduction: parse("conduction_color", &self.conduction_color)?,
            vacuum: parse("vacuum color", VACUUM_COLOR)?,
        })
    }

    /// Checks the geometric settings.
    ///
    /// # Errors
    ///
    /// Returns [`BandAlignError::InvalidConfig`] when the marker width or a
    /// line width is not a positive finite number, or the spacing is negative
    /// or not finite.
    pub fn validate(&self) -> Result<(), BandAlignError> {
        let positive = [
            ("marker_width", self.marker_width),
            ("marker_line_width", self.marker_line_width),
            ("connector_line_width", self.connector_line_width),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BandAlignError::InvalidConfig(format!(
                    "`{key}` must be a positive number, got {value}"
                )));
            }
        }

        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(BandAlignError::InvalidConfig(format!(
                "`spacing` must not be negative, got {}",
                self.spacing
            )));
        }

        Ok(())
    }
}

/// Visual styling of the rendered SVG canvas.
///
/// | Key | Default |
/// |-----|---------|
/// | `width` | `640.0` |
/// | `height` | `480.0` |
/// | `background_color` | unset (transparent) |
/// | `font_family` | `"sans-serif"` |
/// | `font_size` | `12` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    width: f32,
    height: f32,
    background_color: Option<String>,
    font_family: String,
    font_size: u16,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            background_color: None,
            font_family: "sans-serif".to_string(),
            font_size: 12,
        }
    }
}

impl StyleConfig {
    /// Sets the canvas size in pixels.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the background color as a CSS color string.
    pub fn with_background_color(mut self, color: Option<&str>) -> Self {
        self.background_color = color.map(str::to_string);
        self
    }

    /// Returns the canvas width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
