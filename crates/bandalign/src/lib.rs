//! Bandalign - Band-alignment diagrams for semiconductor heterojunctions.
//!
//! Layout and rendering of band-edge diagrams: every junction is drawn as a
//! pair of horizontal band-edge markers (left and right material) joined by a
//! vertical connector at the interface, with optional value labels and one
//! x-axis tick per junction.
//!
//! The layout engine ([`layout`]) is a pure function from junction records to
//! data-space drawing primitives. Primitives are replayed onto any
//! [`Surface`]; the crate ships an SVG backend in [`SvgSurface`].

pub mod config;
pub mod export;

mod error;
mod layout;
mod surface;

pub use bandalign_core::{color, draw, geometry, junction, primitive};

pub use error::BandAlignError;
pub use export::svg::SvgSurface;
pub use layout::{Layout, format_energy, layout, records_from_edges};
pub use surface::{Surface, draw_layout};

use log::{info, trace};

use config::{AppConfig, LayoutConfig};
use junction::{EdgeValues, JunctionRecord};

/// Lay out `records` and draw them onto `surface`, or onto a fresh default
/// surface when none is given.
///
/// Returns the surface so that further layouts can be composed onto it.
///
/// # Errors
///
/// Nothing is drawn when layout fails; the surface is handed back untouched
/// together with the [`BandAlignError`].
///
/// # Examples
///
/// ```
/// use bandalign::{SvgSurface, config::LayoutConfig, junction::JunctionRecord, show_edges};
///
/// let records = [JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5)];
/// let config = LayoutConfig::default();
///
/// let surface: SvgSurface = show_edges(&records, None, &config).unwrap();
/// // Draw a second set of junctions on top of the first.
/// let surface = show_edges(&records, Some(surface), &config).unwrap();
/// assert_eq!(surface.segment_count(), 12);
///
/// // A failed layout gives the composed surface back.
/// let bad = [JunctionRecord::from_edges(0.0, f64::NAN, 0.5, 1.5)];
/// let (surface, _err) = show_edges(&bad, Some(surface), &config).unwrap_err();
/// assert_eq!(surface.segment_count(), 12);
/// ```
pub fn show_edges<S: Surface + Default>(
    records: &[JunctionRecord],
    surface: Option<S>,
    config: &LayoutConfig,
) -> Result<S, (S, BandAlignError)> {
    let mut surface = surface.unwrap_or_default();
    match layout(records, config) {
        Ok(layout) => {
            draw_layout(&mut surface, &layout);
            Ok(surface)
        }
        Err(err) => Err((surface, err)),
    }
}

/// Builder for laying out and rendering band diagrams.
///
/// # Examples
///
/// ```
/// use bandalign::{BandDiagram, config::AppConfig, junction::JunctionRecord};
///
/// let records = [
///     JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5),
///     JunctionRecord::from_edges(-1.0, 2.0, 0.0, 1.0),
/// ];
///
/// let diagram = BandDiagram::new(AppConfig::default());
/// let svg = diagram.render_svg(&records).expect("Failed to render");
/// assert!(svg.contains("Energy (eV)"));
/// ```
#[derive(Debug, Default)]
pub struct BandDiagram {
    config: AppConfig,
}

impl BandDiagram {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compute the layout of `records` with the configured layout settings.
    ///
    /// # Errors
    ///
    /// See [`layout()`](crate::layout()).
    pub fn layout(&self, records: &[JunctionRecord]) -> Result<Layout, BandAlignError> {
        info!(junctions = records.len(); "Laying out junctions");
        let layout = layout(records, self.config.layout())?;
        trace!(layout:?; "Computed layout");
        Ok(layout)
    }

    /// Pair up loose edge values and lay them out.
    ///
    /// Incomplete pairs are handled per the configured
    /// [`IncompletePairPolicy`](config::IncompletePairPolicy).
    pub fn layout_edges(&self, edges: &[EdgeValues]) -> Result<Layout, BandAlignError> {
        let records = records_from_edges(edges, self.config.layout().incomplete_pairs())?;
        self.layout(&records)
    }

    /// Lay out `records` and draw them onto `surface`.
    ///
    /// The surface is left untouched when layout fails.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        records: &[JunctionRecord],
        surface: &mut S,
    ) -> Result<(), BandAlignError> {
        let layout = self.layout(records)?;
        draw_layout(surface, &layout);
        Ok(())
    }

    /// Render `records` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `BandAlignError` for layout errors and
    /// [`BandAlignError::Export`] for rendering errors.
    pub fn render_svg(&self, records: &[JunctionRecord]) -> Result<String, BandAlignError> {
        let mut surface = SvgSurface::new(self.config.style());
        self.draw(records, &mut surface)?;

        let svg = surface.to_svg_string()?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
