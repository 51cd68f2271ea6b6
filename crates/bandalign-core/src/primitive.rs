//! Drawable primitives produced by the layout engine.
//!
//! Primitives are expressed in data space (see [`crate::geometry`]): `x` is
//! the position along the junction sequence, `y` an energy in eV.

use crate::{draw::StrokeDefinition, geometry::Point, junction::Band};

/// The y-axis title used by every band diagram.
pub const ENERGY_AXIS_TITLE: &str = "Energy (eV)";

/// What a segment represents within its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    /// Horizontal line at one side's energy
    Marker,
    /// Vertical line joining the left and right energies at the interface
    Connector,
}

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
    band: Band,
    role: SegmentRole,
}

impl Segment {
    pub fn new(
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
        band: Band,
        role: SegmentRole,
    ) -> Self {
        Self {
            from,
            to,
            stroke,
            band,
            role,
        }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn role(&self) -> SegmentRole {
        self.role
    }
}

/// A text label anchored at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    position: Point,
    text: String,
}

impl Label {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Segment(Segment),
    Label(Label),
}

impl DrawPrimitive {
    /// Returns the segment, if this primitive is one.
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(segment) => Some(segment),
            Self::Label(_) => None,
        }
    }

    /// Returns the label, if this primitive is one.
    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            Self::Segment(_) => None,
        }
    }
}

impl From<Segment> for DrawPrimitive {
    fn from(segment: Segment) -> Self {
        Self::Segment(segment)
    }
}

impl From<Label> for DrawPrimitive {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

/// X-axis ticks and the y-axis title of a diagram.
///
/// `tick_positions` and `tick_labels` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    tick_positions: Vec<f32>,
    tick_labels: Vec<String>,
    y_title: String,
}

impl AxisSpec {
    /// Creates an axis spec with the energy y-axis title.
    ///
    /// # Panics
    ///
    /// Panics if the positions and labels differ in length.
    pub fn new(tick_positions: Vec<f32>, tick_labels: Vec<String>) -> Self {
        assert_eq!(
            tick_positions.len(),
            tick_labels.len(),
            "one tick label per tick position"
        );
        Self {
            tick_positions,
            tick_labels,
            y_title: ENERGY_AXIS_TITLE.to_string(),
        }
    }

    pub fn tick_positions(&self) -> &[f32] {
        &self.tick_positions
    }

    pub fn tick_labels(&self) -> &[String] {
        &self.tick_labels
    }

    pub fn y_title(&self) -> &str {
        &self.y_title
    }

    pub fn is_empty(&self) -> bool {
        self.tick_positions.is_empty()
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_spec_default_is_empty() {
        let axis = AxisSpec::default();
        assert!(axis.is_empty());
        assert!(axis.tick_labels().is_empty());
        assert_eq!(axis.y_title(), "Energy (eV)");
    }

    #[test]
    fn test_axis_spec_accessors() {
        let axis = AxisSpec::new(vec![10.0, 40.0], vec!["0".to_string(), "1".to_string()]);
        assert!(!axis.is_empty());
        assert_eq!(axis.tick_positions(), [10.0, 40.0]);
        assert_eq!(axis.tick_labels(), ["0", "1"]);
    }

    #[test]
    #[should_panic(expected = "one tick label per tick position")]
    fn test_axis_spec_length_mismatch_panics() {
        AxisSpec::new(vec![10.0], Vec::new());
    }

    #[test]
    fn test_primitive_accessors() {
        let segment = Segment::new(
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
            StrokeDefinition::default(),
            Band::Conduction,
            SegmentRole::Marker,
        );
        let primitive = DrawPrimitive::from(segment.clone());
        assert_eq!(primitive.as_segment(), Some(&segment));
        assert!(primitive.as_label().is_none());

        let label = DrawPrimitive::from(Label::new(Point::new(1.0, 1.1), "1.0"));
        assert_eq!(label.as_label().map(Label::text), Some("1.0"));
    }
}
