//! CLI logic for the band-alignment diagram tool.
//!
//! Junctions arrive as `--junction` arguments, are laid out with the loaded
//! configuration and written to an SVG file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use bandalign::{
    BandAlignError, BandDiagram,
    config::AppConfig,
    junction::{EdgeValues, JunctionRecord},
    records_from_edges,
};

/// Run the bandalign CLI application
///
/// Parses the junction arguments, renders the diagram and writes the SVG to
/// the output file.
///
/// # Errors
///
/// Returns `BandAlignError` for:
/// - Malformed junction arguments
/// - Configuration loading errors
/// - Layout errors
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<(), BandAlignError> {
    info!(
        junctions = args.junctions.len(),
        output_path = args.output;
        "Processing junctions"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    // Parse junction arguments
    let edges = parse_junctions(&args.junctions)?;
    let records: Vec<JunctionRecord> =
        records_from_edges(&edges, app_config.layout().incomplete_pairs())?;
    debug!(records = records.len(); "Junctions parsed");

    // Render diagram using BandDiagram API
    let builder = BandDiagram::new(app_config);
    let svg = builder.render_svg(&records)?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Command-line settings take precedence over the configuration file.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let layout = config.layout_mut();
    if args.no_labels {
        layout.set_show_labels(false);
    }
    if !args.tick_labels.is_empty() {
        layout.set_tick_labels(Some(args.tick_labels.clone()));
    }
}

fn parse_junctions(specs: &[String]) -> Result<Vec<EdgeValues>, BandAlignError> {
    specs
        .iter()
        .map(|spec| {
            spec.parse::<EdgeValues>()
                .map_err(|err| BandAlignError::new_invalid_junction(spec.as_str(), err))
        })
        .collect()
}
