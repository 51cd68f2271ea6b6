//! Heterojunction data model.
//!
//! A [`JunctionRecord`] describes one interface between two materials: for
//! each [`Band`] it optionally carries a [`BandPair`] holding the energy on the
//! left and on the right side of the junction. Because a pair is either fully
//! present or absent, a record can never hold a one-sided band edge.
//!
//! One-sided values can still arrive from loosely structured input. That
//! input is modelled by [`EdgeValues`], whose fields mirror the conventional
//! `ev1`/`ec1`/`ev2`/`ec2`/`vac1`/`vac2` keys, and which reports incomplete
//! pairs when converted with [`EdgeValues::pair_up`].

use std::{fmt, str::FromStr};

use thiserror::Error;

/// The energy levels a junction can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Valence band edge
    Valence,
    /// Conduction band edge
    Conduction,
    /// Vacuum level
    Vacuum,
}

impl Band {
    /// All bands in drawing order.
    pub const ALL: [Band; 3] = [Band::Valence, Band::Conduction, Band::Vacuum];

    /// Returns a human-readable name for this band.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Conduction => "conduction",
            Self::Vacuum => "vacuum",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Energies of one band on both sides of a junction, in eV.
///
/// Energies are kept in double precision so that labels can show every digit
/// the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPair {
    left: f64,
    right: f64,
}

impl BandPair {
    /// Creates a pair from the left-side and right-side energies.
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Returns the energy on the left side of the junction.
    pub fn left(self) -> f64 {
        self.left
    }

    /// Returns the energy on the right side of the junction.
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the band offset `right - left`.
    pub fn offset(self) -> f64 {
        self.right - self.left
    }

    /// Returns `true` when both energies are finite.
    pub fn is_finite(self) -> bool {
        self.left.is_finite() && self.right.is_finite()
    }
}

/// One heterojunction interface.
///
/// # Examples
///
/// ```
/// # use bandalign_core::junction::{Band, BandPair, JunctionRecord};
/// let record = JunctionRecord::new(BandPair::new(0.0, 0.5), BandPair::new(1.0, 1.5))
///     .with_vacuum(BandPair::new(4.0, 4.2));
///
/// let bands: Vec<Band> = record.pairs().map(|(band, _)| band).collect();
/// assert_eq!(bands, [Band::Valence, Band::Conduction, Band::Vacuum]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JunctionRecord {
    valence: Option<BandPair>,
    conduction: Option<BandPair>,
    vacuum: Option<BandPair>,
}

impl JunctionRecord {
    /// Creates a record with both band edges and no vacuum level.
    pub fn new(valence: BandPair, conduction: BandPair) -> Self {
        Self {
            valence: Some(valence),
            conduction: Some(conduction),
            vacuum: None,
        }
    }

    /// Creates a record from the four band-edge energies.
    ///
    /// Argument order follows the conventional `ev1, ec1, ev2, ec2` naming:
    /// valence and conduction on the left, then on the right.
    pub fn from_edges(ev1: f64, ec1: f64, ev2: f64, ec2: f64) -> Self {
        Self::new(BandPair::new(ev1, ev2), BandPair::new(ec1, ec2))
    }

    /// Sets the valence pair (builder style).
    pub fn with_valence(mut self, pair: BandPair) -> Self {
        self.valence = Some(pair);
        self
    }

    /// Sets the conduction pair (builder style).
    pub fn with_conduction(mut self, pair: BandPair) -> Self {
        self.conduction = Some(pair);
        self
    }

    /// Sets the vacuum-level pair (builder style).
    pub fn with_vacuum(mut self, pair: BandPair) -> Self {
        self.vacuum = Some(pair);
        self
    }

    /// Returns the pair for `band`, if present.
    pub fn pair(&self, band: Band) -> Option<BandPair> {
        match band {
            Band::Valence => self.valence,
            Band::Conduction => self.conduction,
            Band::Vacuum => self.vacuum,
        }
    }

    /// Iterates over the present pairs in [`Band::ALL`] order.
    pub fn pairs(&self) -> impl Iterator<Item = (Band, BandPair)> + '_ {
        Band::ALL
            .into_iter()
            .filter_map(|band| self.pair(band).map(|pair| (band, pair)))
    }

    fn set_pair(&mut self, band: Band, pair: BandPair) {
        match band {
            Band::Valence => self.valence = Some(pair),
            Band::Conduction => self.conduction = Some(pair),
            Band::Vacuum => self.vacuum = Some(pair),
        }
    }
}

/// Loosely structured junction energies where any value may be missing.
///
/// Text form is a comma-separated list of `key=value` items:
///
/// ```
/// # use bandalign_core::junction::{Band, EdgeValues};
/// let edges: EdgeValues = "ev1=0, ec1=1, ev2=0.5, ec2=1.5, vac1=4".parse().unwrap();
/// let (record, incomplete) = edges.pair_up();
///
/// assert_eq!(record.pair(Band::Valence).unwrap().right(), 0.5);
/// assert_eq!(incomplete, [Band::Vacuum]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeValues {
    pub ev1: Option<f64>,
    pub ec1: Option<f64>,
    pub ev2: Option<f64>,
    pub ec2: Option<f64>,
    pub vac1: Option<f64>,
    pub vac2: Option<f64>,
}

impl EdgeValues {
    fn sides(&self, band: Band) -> (Option<f64>, Option<f64>) {
        match band {
            Band::Valence => (self.ev1, self.ev2),
            Band::Conduction => (self.ec1, self.ec2),
            Band::Vacuum => (self.vac1, self.vac2),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Option<f64>> {
        match key {
            "ev1" => Some(&mut self.ev1),
            "ec1" => Some(&mut self.ec1),
            "ev2" => Some(&mut self.ev2),
            "ec2" => Some(&mut self.ec2),
            "vac1" => Some(&mut self.vac1),
            "vac2" => Some(&mut self.vac2),
            _ => None,
        }
    }

    /// Builds a [`JunctionRecord`] from the complete pairs.
    ///
    /// Returns the record together with the bands that had exactly one side
    /// present. Those bands are left out of the record; bands with neither
    /// side present are simply absent and not reported.
    pub fn pair_up(&self) -> (JunctionRecord, Vec<Band>) {
        let mut record = JunctionRecord::default();
        let mut incomplete = Vec::new();

        for band in Band::ALL {
            match self.sides(band) {
                (Some(left), Some(right)) => record.set_pair(band, BandPair::new(left, right)),
                (None, None) => {}
                _ => incomplete.push(band),
            }
        }

        (record, incomplete)
    }
}

/// Errors produced when parsing the text form of [`EdgeValues`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseEdgeError {
    #[error("no band edges given")]
    Empty,

    #[error("expected `key=value`, found `{0}`")]
    MissingValue(String),

    #[error("unknown key `{0}`, valid keys: ev1, ec1, ev2, ec2, vac1, vac2")]
    UnknownKey(String),

    #[error("key `{0}` given more than once")]
    DuplicateKey(String),

    #[error("value `{value}` for `{key}` is not a number")]
    InvalidNumber { key: String, value: String },
}

impl FromStr for EdgeValues {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut edges = EdgeValues::default();
        let mut seen_any = false;

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (key, value) = item
                .split_once('=')
                .ok_or_else(|| ParseEdgeError::MissingValue(item.to_string()))?;
            let (key, value) = (key.trim(), value.trim());

            let slot = edges
                .slot(key)
                .ok_or_else(|| ParseEdgeError::UnknownKey(key.to_string()))?;
            if slot.is_some() {
                return Err(ParseEdgeError::DuplicateKey(key.to_string()));
            }

            let number = value
                .parse::<f64>()
                .map_err(|_| ParseEdgeError::InvalidNumber {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            *slot = Some(number);
            seen_any = true;
        }

        if !seen_any {
            return Err(ParseEdgeError::Empty);
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_pair_offset() {
        let pair = BandPair::new(-1.0, 0.0);
        assert_eq!(pair.left(), -1.0);
        assert_eq!(pair.right(), 0.0);
        assert_eq!(pair.offset(), 1.0);
        assert!(pair.is_finite());
        assert!(!BandPair::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_record_from_edges() {
        let record = JunctionRecord::from_edges(0.0, 1.0, 0.5, 1.5);

        assert_eq!(record.pair(Band::Valence), Some(BandPair::new(0.0, 0.5)));
        assert_eq!(record.pair(Band::Conduction), Some(BandPair::new(1.0, 1.5)));
        assert_eq!(record.pair(Band::Vacuum), None);
    }

    #[test]
    fn test_record_pairs_skip_absent() {
        let record = JunctionRecord::default().with_conduction(BandPair::new(1.0, 2.0));
        let pairs: Vec<_> = record.pairs().collect();
        assert_eq!(pairs, [(Band::Conduction, BandPair::new(1.0, 2.0))]);
    }

    #[test]
    fn test_pair_up_reports_one_sided_bands() {
        let edges = EdgeValues {
            ev1: Some(0.0),
            ev2: Some(0.5),
            ec1: Some(1.0),
            vac2: Some(4.0),
            ..EdgeValues::default()
        };

        let (record, incomplete) = edges.pair_up();

        assert_eq!(record.pair(Band::Valence), Some(BandPair::new(0.0, 0.5)));
        assert_eq!(record.pair(Band::Conduction), None);
        assert_eq!(record.pair(Band::Vacuum), None);
        assert_eq!(incomplete, [Band::Conduction, Band::Vacuum]);
    }

    #[test]
    fn test_parse_edge_values() {
        let edges: EdgeValues = "ev1=-1, ec1=2,ev2=0 ,ec2=1".parse().unwrap();
        assert_eq!(edges.ev1, Some(-1.0));
        assert_eq!(edges.ec1, Some(2.0));
        assert_eq!(edges.ev2, Some(0.0));
        assert_eq!(edges.ec2, Some(1.0));
        assert_eq!(edges.vac1, None);
    }

    #[test]
    fn test_parse_edge_values_keeps_double_precision() {
        let edges: EdgeValues = "ev1=0.1234567891,ev2=3.14159265358979".parse().unwrap();
        let (record, _) = edges.pair_up();
        let valence = record.pair(Band::Valence).unwrap();

        assert_eq!(valence.left(), 0.1234567891);
        assert_eq!(valence.right().to_string(), "3.14159265358979");
    }

    #[test]
    fn test_parse_edge_values_errors() {
        assert_eq!("".parse::<EdgeValues>(), Err(ParseEdgeError::Empty));
        assert_eq!(
            "ev1".parse::<EdgeValues>(),
            Err(ParseEdgeError::MissingValue("ev1".to_string()))
        );
        assert_eq!(
            "ev3=1".parse::<EdgeValues>(),
            Err(ParseEdgeError::UnknownKey("ev3".to_string()))
        );
        assert_eq!(
            "ev1=1,ev1=2".parse::<EdgeValues>(),
            Err(ParseEdgeError::DuplicateKey("ev1".to_string()))
        );
        assert_eq!(
            "ec2=high".parse::<EdgeValues>(),
            Err(ParseEdgeError::InvalidNumber {
                key: "ec2".to_string(),
                value: "high".to_string(),
            })
        );
    }
}
