//! Error types for band diagram operations.
//!
//! This module provides the main error type [`BandAlignError`].

use std::io;

use thiserror::Error;

use bandalign_core::junction::{Band, ParseEdgeError};

/// The main error type for bandalign operations.
///
/// Validation errors are raised before any drawing call is made, so a failed
/// operation never leaves a partially drawn surface behind.
#[derive(Debug, Error)]
pub enum BandAlignError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Got {actual} tick labels for {expected} junctions")]
    TickLabelCountMismatch { expected: usize, actual: usize },

    #[error("Junction {index}: {band} band has a value on only one side")]
    IncompletePair { index: usize, band: Band },

    #[error("Junction {index}: {band} energy is not a finite number")]
    NonFiniteEnergy { index: usize, band: Band },

    #[error("Invalid junction `{input}`: {source}")]
    InvalidJunction {
        input: String,
        #[source]
        source: ParseEdgeError,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for BandAlignError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl BandAlignError {
    /// Create a new `InvalidJunction` error for a junction given in text form.
    pub fn new_invalid_junction(input: impl Into<String>, source: ParseEdgeError) -> Self {
        Self::InvalidJunction {
            input: input.into(),
            source,
        }
    }
}
