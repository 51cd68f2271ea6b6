//! Error adapter for converting BandAlignError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! A malformed `--junction` argument is rendered with the argument text as
//! source code and a label under the offending `key=value` item.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use bandalign::{BandAlignError, junction::ParseEdgeError};

/// Adapter for a junction argument that failed to parse.
pub struct JunctionAdapter<'a> {
    err: &'a BandAlignError,
    input: &'a str,
    reason: &'a ParseEdgeError,
}

impl fmt::Debug for JunctionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JunctionAdapter")
            .field("input", &self.input)
            .field("reason", &self.reason)
            .finish()
    }
}

impl fmt::Display for JunctionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for JunctionAdapter<'_> {}

impl MietteDiagnostic for JunctionAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("bandalign::junction"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "write junctions as `ev1=0,ec1=1,ev2=0.5,ec2=1.5`; \
             vacuum levels use `vac1` and `vac2`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.input as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, message) = reason_span(self.input, self.reason)?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.to_string()), span),
        )))
    }
}

/// Locates the part of `input` a parse failure refers to.
///
/// Items are found the same way the junction parser reads them, so a key is
/// never matched inside another key or value.
fn reason_span(input: &str, reason: &ParseEdgeError) -> Option<(SourceSpan, &'static str)> {
    let ((text, start), message) = match reason {
        ParseEdgeError::Empty => return None,
        ParseEdgeError::MissingValue(expected) => (
            items(input).find(|(item, _)| item == expected)?,
            "missing `=value`",
        ),
        ParseEdgeError::UnknownKey(expected) => (
            keys_and_values(input)
                .map(|(key, _)| key)
                .find(|(key, _)| key == expected)?,
            "unknown key",
        ),
        // The parser stops at the second occurrence
        ParseEdgeError::DuplicateKey(expected) => (
            keys_and_values(input)
                .map(|(key, _)| key)
                .filter(|(key, _)| key == expected)
                .nth(1)?,
            "repeated here",
        ),
        ParseEdgeError::InvalidNumber { key: expected, .. } => (
            keys_and_values(input)
                .find(|((key, _), _)| key == expected)
                .map(|(_, value)| value)?,
            "not a number",
        ),
    };

    Some((SourceSpan::new(start.into(), text.len()), message))
}

/// Non-empty comma-separated items of `input`, trimmed, with their byte offsets.
fn items(input: &str) -> impl Iterator<Item = (&str, usize)> {
    input
        .split(',')
        .scan(0, |offset, raw| {
            let item = trimmed(raw, *offset);
            *offset += raw.len() + 1;
            Some(item)
        })
        .filter(|(item, _)| !item.is_empty())
}

/// Trimmed keys and values of the `key=value` items in `input`.
fn keys_and_values(input: &str) -> impl Iterator<Item = ((&str, usize), (&str, usize))> {
    items(input).filter_map(|(item, start)| {
        let (key, value) = item.split_once('=')?;
        Some((
            trimmed(key, start),
            trimmed(value, start + key.len() + 1),
        ))
    })
}

fn trimmed(text: &str, offset: usize) -> (&str, usize) {
    let leading = text.len() - text.trim_start().len();
    (text.trim(), offset + leading)
}

/// Adapter for [`BandAlignError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a BandAlignError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BandAlignError::Io(_) => "bandalign::io",
            BandAlignError::InvalidConfig(_) => "bandalign::config",
            BandAlignError::TickLabelCountMismatch { .. } => "bandalign::tick_labels",
            BandAlignError::IncompletePair { .. } => "bandalign::incomplete_pair",
            BandAlignError::NonFiniteEnergy { .. } => "bandalign::energy",
            BandAlignError::InvalidJunction { .. } => "bandalign::junction",
            BandAlignError::Export(_) => "bandalign::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BandAlignError::TickLabelCountMismatch { .. } => {
                "pass one `--tick-label` per `--junction`"
            }
            BandAlignError::IncompletePair { .. } => {
                "give the band on both sides, or set `incomplete_pairs = \"skip\"` in [layout]"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A junction argument with the offending item labelled.
    Junction(JunctionAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Junction(j) => fmt::Display::fmt(j, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Junction(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Junction(j) => j.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Junction(j) => j.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Junction(j) => j.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Junction(j) => j.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`BandAlignError`] into a list of reportable errors.
pub fn to_reportables(err: &BandAlignError) -> Vec<Reportable<'_>> {
    match err {
        BandAlignError::InvalidJunction { input, source } => {
            vec![Reportable::Junction(JunctionAdapter {
                err,
                input,
                reason: source,
            })]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
