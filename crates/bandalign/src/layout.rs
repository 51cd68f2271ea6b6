//! Band diagram layout engine.
//!
//! Turns an ordered list of [`JunctionRecord`]s into data-space
//! [`DrawPrimitive`]s and an [`AxisSpec`].
//!
//! Junctions are placed left to right along a running cursor. Each junction
//! occupies `2w` horizontally: the left material spans `[cursor, cursor + w]`
//! and the right material `[cursor + w, cursor + 2w]`, with the interface at
//! `cursor + w`. Consecutive junctions are separated by the spacing `s`.
//!
//! ```text
//!     left     right          left     right
//!   ────────┐                ────────
//!           │                        │
//!           └────────  ...           └────────
//!   |<  w  >|<  w  >|<  s  >|<  w  >|<  w  >|
//!           ^ tick 0                 ^ tick 1
//! ```

use log::{debug, trace, warn};

use bandalign_core::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition},
    geometry::Point,
    junction::{Band, BandPair, EdgeValues, JunctionRecord},
    primitive::{AxisSpec, DrawPrimitive, Label, Segment, SegmentRole},
};

use crate::{
    BandAlignError,
    config::{IncompletePairPolicy, LayoutConfig, Palette},
};

/// Vertical offset of value labels above their band edge, in eV.
const LABEL_RISE: f64 = 0.1;
/// Horizontal offset of left-side labels, as a fraction of `w`.
const LEFT_LABEL_INSET: f32 = 0.1;
/// Horizontal offset of right-side labels from the interface, as a fraction of `w`.
const RIGHT_LABEL_INSET: f32 = 0.2;

/// The result of laying out a sequence of junctions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    primitives: Vec<DrawPrimitive>,
    axis: AxisSpec,
}

impl Layout {
    /// Returns the primitives in drawing order.
    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    /// Returns the axis specification.
    pub fn axis(&self) -> &AxisSpec {
        &self.axis
    }

    /// Iterates over the segment primitives.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.primitives.iter().filter_map(DrawPrimitive::as_segment)
    }

    /// Iterates over the label primitives.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.primitives.iter().filter_map(DrawPrimitive::as_label)
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.axis.is_empty()
    }
}

/// Strokes for every band, resolved once per layout.
struct Strokes {
    palette: Palette,
    marker_width: f32,
    connector_width: f32,
}

impl Strokes {
    fn marker(&self, band: Band) -> StrokeDefinition {
        match band {
            Band::Valence => self.band_marker(self.palette.valence()),
            Band::Conduction => self.band_marker(self.palette.conduction()),
            Band::Vacuum => StrokeDefinition::dashed(self.palette.vacuum(), self.connector_width),
        }
    }

    fn connector(&self, band: Band) -> StrokeDefinition {
        match band {
            Band::Valence => StrokeDefinition::solid(self.palette.valence(), self.connector_width),
            Band::Conduction => {
                StrokeDefinition::solid(self.palette.conduction(), self.connector_width)
            }
            Band::Vacuum => StrokeDefinition::dashed(self.palette.vacuum(), self.connector_width),
        }
    }

    fn band_marker(&self, color: Color) -> StrokeDefinition {
        let mut stroke = StrokeDefinition::solid(color, self.marker_width);
        stroke.set_cap(StrokeCap::Square);
        stroke
    }
}

/// Lay out `records` in input order.
///
/// All validation happens before any primitive is produced.
///
/// # Errors
///
/// - [`BandAlignError::InvalidConfig`] for an invalid geometry, line width or color
/// - [`BandAlignError::TickLabelCountMismatch`] when explicit tick labels do
///   not match the number of records
/// - [`BandAlignError::NonFiniteEnergy`] naming the first junction holding a
///   NaN or infinite energy
///
/// # Examples
///
/// ```
/// # use bandalign::{config::LayoutConfig, junction::JunctionRecord, layout};
/// let records = [
///     JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5),
///     JunctionRecord::from_edges(-1.0, 2.0, 0.0, 1.0),
/// ];
/// let layout = layout(&records, &LayoutConfig::default()).unwrap();
/// assert_eq!(layout.axis().tick_positions(), [10.0, 40.0]);
/// ```
pub fn layout(records: &[JunctionRecord], config: &LayoutConfig) -> Result<Layout, BandAlignError> {
    config.validate()?;
    let strokes = Strokes {
        palette: config.palette()?,
        marker_width: config.marker_line_width(),
        connector_width: config.connector_line_width(),
    };

    let tick_labels = match config.tick_labels() {
        Some(labels) if labels.len() != records.len() => {
            return Err(BandAlignError::TickLabelCountMismatch {
                expected: records.len(),
                actual: labels.len(),
            });
        }
        Some(labels) => labels.to_vec(),
        None => (0..records.len()).map(|index| index.to_string()).collect(),
    };

    for (index, record) in records.iter().enumerate() {
        if let Some((band, _)) = record.pairs().find(|(_, pair)| !is_drawable(*pair)) {
            return Err(BandAlignError::NonFiniteEnergy { index, band });
        }
    }

    let w = config.marker_width();
    let mut primitives = Vec::new();
    let mut tick_positions = Vec::with_capacity(records.len());
    let mut cursor = 0.0;

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            cursor += config.spacing();
        }
        let interface = cursor + w;

        for (band, pair) in record.pairs() {
            let stroke = strokes.marker(band);
            primitives.push(marker(cursor, interface, pair.left(), stroke.clone(), band));
            primitives.push(marker(interface, interface + w, pair.right(), stroke, band));
        }

        for (band, pair) in record.pairs() {
            primitives.push(connector(interface, pair, strokes.connector(band), band));
        }

        if config.show_labels() {
            let precision = config.label_precision();
            let left_x = cursor + LEFT_LABEL_INSET * w;
            let right_x = interface + RIGHT_LABEL_INSET * w;
            let edges = [Band::Valence, Band::Conduction];

            for pair in edges.iter().filter_map(|band| record.pair(*band)) {
                primitives.push(value_label(left_x, pair.left(), precision));
            }
            for pair in edges.iter().filter_map(|band| record.pair(*band)) {
                primitives.push(value_label(right_x, pair.right(), precision));
            }
        }

        trace!(index, interface; "Junction placed");
        tick_positions.push(interface);
        cursor += 2.0 * w;
    }

    debug!(
        junctions = records.len(),
        primitives = primitives.len();
        "Layout calculated"
    );

    Ok(Layout {
        primitives,
        axis: AxisSpec::new(tick_positions, tick_labels),
    })
}

/// Both energies are finite and stay finite in drawing precision.
fn is_drawable(pair: BandPair) -> bool {
    pair.is_finite() && (pair.left() as f32).is_finite() && (pair.right() as f32).is_finite()
}

fn marker(x1: f32, x2: f32, energy: f64, stroke: StrokeDefinition, band: Band) -> DrawPrimitive {
    Segment::new(
        Point::new(x1, energy as f32),
        Point::new(x2, energy as f32),
        stroke,
        band,
        SegmentRole::Marker,
    )
    .into()
}

/// Vertical connector at the interface, ending exactly on the right-side energy.
fn connector(x: f32, pair: BandPair, stroke: StrokeDefinition, band: Band) -> DrawPrimitive {
    Segment::new(
        Point::new(x, pair.left() as f32),
        Point::new(x, pair.right() as f32),
        stroke,
        band,
        SegmentRole::Connector,
    )
    .into()
}

fn value_label(x: f32, energy: f64, precision: Option<usize>) -> DrawPrimitive {
    let position = Point::new(x, (energy + LABEL_RISE) as f32);
    Label::new(position, format_energy(energy, precision)).into()
}

/// Formats an energy for a value label.
///
/// Without a precision the shortest representation that round-trips is used,
/// always with a fractional part (`0.0`, `1.5`, `-1.0`).
pub fn format_energy(energy: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{energy:.digits$}"),
        None => format!("{energy:?}"),
    }
}

/// Builds junction records from loosely structured edge values.
///
/// Bands with a value on only one side are handled per `policy`: dropped
/// with a warning naming the junction, or rejected.
///
/// # Errors
///
/// Returns [`BandAlignError::IncompletePair`] for the first one-sided band
/// under [`IncompletePairPolicy::Error`].
pub fn records_from_edges(
    edges: &[EdgeValues],
    policy: IncompletePairPolicy,
) -> Result<Vec<JunctionRecord>, BandAlignError> {
    edges
        .iter()
        .enumerate()
        .map(|(index, values)| {
            let (record, incomplete) = values.pair_up();
            match (incomplete.first(), policy) {
                (Some(&band), IncompletePairPolicy::Error) => {
                    Err(BandAlignError::IncompletePair { index, band })
                }
                (_, _) => {
                    for band in &incomplete {
                        warn!(index, band = band.name(); "Skipping band with a value on only one side");
                    }
                    Ok(record)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::config::{DEFAULT_CONDUCTION_COLOR, DEFAULT_VALENCE_COLOR, VACUUM_COLOR};

    fn sample_records() -> Vec<JunctionRecord> {
        vec![
            JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5),
            JunctionRecord::from_edges(-1.0, 2.0, 0.0, 1.0),
        ]
    }

    fn segments_of(layout: &Layout, band: Band, role: SegmentRole) -> Vec<&Segment> {
        layout
            .segments()
            .filter(|segment| segment.band() == band && segment.role() == role)
            .collect()
    }

    #[test]
    fn test_sample_tick_positions() {
        let config = LayoutConfig::default().with_geometry(10.0, 10.0);
        let layout = layout(&sample_records(), &config).unwrap();

        assert_eq!(layout.axis().tick_positions(), [10.0, 40.0]);
        assert_eq!(layout.axis().tick_labels(), ["0", "1"]);
        assert_eq!(layout.axis().y_title(), "Energy (eV)");
    }

    #[test]
    fn test_empty_records() {
        let layout = layout(&[], &LayoutConfig::default()).unwrap();
        assert!(layout.primitives().is_empty());
        assert!(layout.axis().is_empty());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_empty_records_with_empty_tick_labels() {
        let config = LayoutConfig::default().with_tick_labels(Some(Vec::new()));
        assert!(layout(&[], &config).unwrap().is_empty());
    }

    #[test]
    fn test_marker_segments_span_halves() {
        let config = LayoutConfig::default().with_geometry(10.0, 10.0);
        let layout = layout(&sample_records(), &config).unwrap();

        let valence = segments_of(&layout, Band::Valence, SegmentRole::Marker);
        assert_eq!(valence.len(), 4);

        // First junction: left half [0, 10], right half [10, 20]
        assert_eq!(valence[0].from(), Point::new(0.0, 0.0));
        assert_eq!(valence[0].to(), Point::new(10.0, 0.0));
        assert_eq!(valence[1].from(), Point::new(10.0, 0.5));
        assert_eq!(valence[1].to(), Point::new(20.0, 0.5));

        // Second junction starts after the spacing: [30, 40] and [40, 50]
        assert_eq!(valence[2].from(), Point::new(30.0, -1.0));
        assert_eq!(valence[2].to(), Point::new(40.0, -1.0));
        assert_eq!(valence[3].from(), Point::new(40.0, 0.0));
        assert_eq!(valence[3].to(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_strokes_follow_palette_and_widths() {
        let config = LayoutConfig::default().with_line_widths(6.0, 1.5);
        let layout = layout(&sample_records()[..1], &config).unwrap();

        let valence = Color::new(DEFAULT_VALENCE_COLOR).unwrap();
        let conduction = Color::new(DEFAULT_CONDUCTION_COLOR).unwrap();

        for segment in layout.segments() {
            let expected_color = match segment.band() {
                Band::Valence => valence,
                Band::Conduction => conduction,
                Band::Vacuum => unreachable!("no vacuum level in sample"),
            };
            let expected_width = match segment.role() {
                SegmentRole::Marker => 6.0,
                SegmentRole::Connector => 1.5,
            };
            assert_eq!(segment.stroke().color(), expected_color);
            assert_eq!(segment.stroke().width(), expected_width);
        }
    }

    #[test]
    fn test_connectors_at_interface() {
        let config = LayoutConfig::default().with_geometry(10.0, 10.0);
        let layout = layout(&sample_records(), &config).unwrap();

        let conduction = segments_of(&layout, Band::Conduction, SegmentRole::Connector);
        assert_eq!(conduction.len(), 2);
        assert_eq!(conduction[0].from(), Point::new(10.0, 1.0));
        assert_eq!(conduction[0].to(), Point::new(10.0, 1.5));
        assert_eq!(conduction[1].from(), Point::new(40.0, 2.0));
        assert_eq!(conduction[1].to(), Point::new(40.0, 1.0));
    }

    #[test]
    fn test_connector_reaches_right_value() {
        let record = JunctionRecord::from_edges(0.1, 1.3, 0.7, 0.2);
        let layout = layout(&[record], &LayoutConfig::default()).unwrap();

        for segment in layout
            .segments()
            .filter(|segment| segment.role() == SegmentRole::Connector)
        {
            let pair = record.pair(segment.band()).unwrap();
            assert_eq!(segment.from().y(), pair.left() as f32);
            assert_eq!(segment.to().y(), pair.right() as f32);
            assert_approx_eq!(
                f32,
                segment.to().y() - segment.from().y(),
                pair.offset() as f32,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_markers_precede_connector_within_pair() {
        let layout = layout(&sample_records(), &LayoutConfig::default()).unwrap();
        let segments: Vec<&Segment> = layout.segments().collect();

        for band in [Band::Valence, Band::Conduction] {
            let positions: Vec<(usize, SegmentRole)> = segments
                .iter()
                .enumerate()
                .filter(|(_, segment)| segment.band() == band)
                .map(|(position, segment)| (position, segment.role()))
                .collect();

            for junction in positions.chunks(3) {
                assert_eq!(junction[0].1, SegmentRole::Marker);
                assert_eq!(junction[1].1, SegmentRole::Marker);
                assert_eq!(junction[2].1, SegmentRole::Connector);
            }
        }
    }

    #[test]
    fn test_valence_only_record() {
        let record = JunctionRecord::default().with_valence(BandPair::new(0.0, 0.5));
        let layout = layout(&[record], &LayoutConfig::default()).unwrap();

        assert_eq!(layout.segments().count(), 3);
        assert!(layout.segments().all(|segment| segment.band() == Band::Valence));

        let labels: Vec<&str> = layout.labels().map(Label::text).collect();
        assert_eq!(labels, ["0.0", "0.5"]);
        assert_eq!(layout.axis().tick_positions(), [10.0]);
    }

    #[test]
    fn test_vacuum_level_uses_neutral_thin_stroke() {
        let record = JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5)
            .with_vacuum(BandPair::new(4.0, 4.5));
        let layout = layout(&[record], &LayoutConfig::default()).unwrap();

        let vacuum: Vec<&Segment> = layout
            .segments()
            .filter(|segment| segment.band() == Band::Vacuum)
            .collect();
        assert_eq!(vacuum.len(), 3);

        let neutral = Color::new(VACUUM_COLOR).unwrap();
        for segment in &vacuum {
            assert_eq!(segment.stroke().color(), neutral);
            assert_eq!(segment.stroke().width(), 2.0);
        }

        // Vacuum levels never get value labels
        assert_eq!(layout.labels().count(), 4);
    }

    #[test]
    fn test_labels_positions_and_text() {
        let config = LayoutConfig::default().with_geometry(10.0, 10.0);
        let layout = layout(&sample_records()[..1], &config).unwrap();
        let labels: Vec<&Label> = layout.labels().collect();

        assert_eq!(labels.len(), 4);
        let texts: Vec<&str> = labels.iter().map(|label| label.text()).collect();
        assert_eq!(texts, ["0.0", "1.0", "0.5", "1.5"]);

        assert_approx_eq!(f32, labels[0].position().x(), 1.0);
        assert_approx_eq!(f32, labels[0].position().y(), 0.1);
        assert_approx_eq!(f32, labels[1].position().y(), 1.1);
        assert_approx_eq!(f32, labels[2].position().x(), 12.0);
        assert_approx_eq!(f32, labels[3].position().y(), 1.6);
    }

    #[test]
    fn test_labels_disabled() {
        let config = LayoutConfig::default().with_show_labels(false);
        let layout = layout(&sample_records(), &config).unwrap();
        assert_eq!(layout.labels().count(), 0);
        assert_eq!(layout.segments().count(), 12);
    }

    #[test]
    fn test_label_precision() {
        assert_eq!(format_energy(1.0, None), "1.0");
        assert_eq!(format_energy(-0.25, None), "-0.25");
        assert_eq!(format_energy(1.0, Some(2)), "1.00");
        assert_eq!(format_energy(0.456, Some(1)), "0.5");
    }

    #[test]
    fn test_labels_keep_full_precision() {
        let edges: EdgeValues = "ev1=0.1234567891,ec1=3.14159265,ev2=-0.0025,ec2=2"
            .parse()
            .unwrap();
        let records = records_from_edges(&[edges], IncompletePairPolicy::Error).unwrap();
        let layout = layout(&records, &LayoutConfig::default()).unwrap();

        let labels: Vec<&str> = layout.labels().map(Label::text).collect();
        assert_eq!(labels, ["0.1234567891", "3.14159265", "-0.0025", "2.0"]);

        // Segments are drawn in single precision
        let first = layout.segments().next().unwrap();
        assert_eq!(first.from().y(), 0.1234567891f64 as f32);
    }

    #[test]
    fn test_custom_tick_labels() {
        let labels = vec!["GaAs/AlAs".to_string(), "Si/Ge".to_string()];
        let config = LayoutConfig::default().with_tick_labels(Some(labels.clone()));
        let layout = layout(&sample_records(), &config).unwrap();
        assert_eq!(layout.axis().tick_labels(), labels.as_slice());
    }

    #[test]
    fn test_tick_label_count_mismatch() {
        let config = LayoutConfig::default().with_tick_labels(Some(vec!["only".to_string()]));
        let err = layout(&sample_records(), &config).unwrap_err();
        assert!(matches!(
            err,
            BandAlignError::TickLabelCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig::default().with_geometry(0.0, 10.0);
        assert!(matches!(
            layout(&sample_records(), &config),
            Err(BandAlignError::InvalidConfig(_))
        ));

        let config = LayoutConfig::default().with_geometry(10.0, -1.0);
        assert!(matches!(
            layout(&sample_records(), &config),
            Err(BandAlignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_finite_energy_names_junction() {
        let records = [
            JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5),
            JunctionRecord::from_edges(0.0, f64::NAN, 0.5, 1.5),
        ];
        let err = layout(&records, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BandAlignError::NonFiniteEnergy {
                index: 1,
                band: Band::Conduction
            }
        ));
    }

    #[test]
    fn test_energy_beyond_drawing_range_rejected() {
        let record = JunctionRecord::from_edges(0.0, 1.0, 1e300, 1.5);
        let err = layout(&[record], &LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BandAlignError::NonFiniteEnergy {
                index: 0,
                band: Band::Valence
            }
        ));
    }

    #[test]
    fn test_physically_implausible_order_accepted() {
        // Conduction below valence is drawn as given
        let record = JunctionRecord::from_edges(2.0, 1.0, 3.0, 0.0);
        assert!(layout(&[record], &LayoutConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_length_connector() {
        let record = JunctionRecord::from_edges(0.0, 1.0, 0.0, 1.0);
        let layout = layout(&[record], &LayoutConfig::default()).unwrap();
        let connectors: Vec<&Segment> = layout
            .segments()
            .filter(|segment| segment.role() == SegmentRole::Connector)
            .collect();
        assert_eq!(connectors.len(), 2);
        assert!(connectors.iter().all(|segment| segment.from() == segment.to()));
    }

    #[test]
    fn test_records_from_edges_skip() {
        let edges = [
            "ev1=0,ec1=1,ev2=0.5,ec2=1.5".parse::<EdgeValues>().unwrap(),
            "ev1=0,ev2=0.5,ec1=1".parse::<EdgeValues>().unwrap(),
        ];
        let records = records_from_edges(&edges, IncompletePairPolicy::Skip).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[1].pair(Band::Valence).is_some());
        assert!(records[1].pair(Band::Conduction).is_none());
    }

    #[test]
    fn test_records_from_edges_error() {
        let edges = [
            "ev1=0,ec1=1,ev2=0.5,ec2=1.5".parse::<EdgeValues>().unwrap(),
            "ev1=0,ec1=1,ev2=0.5,ec2=1.5,vac1=4".parse::<EdgeValues>().unwrap(),
        ];
        let err = records_from_edges(&edges, IncompletePairPolicy::Error).unwrap_err();
        assert!(matches!(
            err,
            BandAlignError::IncompletePair {
                index: 1,
                band: Band::Vacuum
            }
        ));
        assert_eq!(
            err.to_string(),
            "Junction 1: vacuum band has a value on only one side"
        );
    }
}
