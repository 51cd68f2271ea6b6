//! Command-line argument definitions for the bandalign CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments supply the junctions to draw, the output path,
//! configuration file selection, layout overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the band-alignment diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Band edges of one junction, e.g. `ev1=0,ec1=1,ev2=0.5,ec2=1.5`.
    ///
    /// Keys are ev1, ec1, ev2, ec2, vac1 and vac2 (valence, conduction and
    /// vacuum level of the left (1) and right (2) material, in eV).
    /// Repeat the flag once per junction, in drawing order.
    #[arg(short, long = "junction", value_name = "SPEC")]
    pub junctions: Vec<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// X-axis label of each junction; overrides the configuration file
    #[arg(long = "tick-label", value_name = "LABEL")]
    pub tick_labels: Vec<String>,

    /// Do not draw energy values next to the band edges
    #[arg(long)]
    pub no_labels: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_junctions() {
        let args = Args::parse_from([
            "bandalign",
            "--junction",
            "ev1=0,ec1=1,ev2=0.5,ec2=1.5",
            "-j",
            "ev1=-1,ec1=2,ev2=0,ec2=1",
            "--tick-label",
            "A/B",
            "--tick-label",
            "C/D",
            "--no-labels",
        ]);

        assert_eq!(args.junctions.len(), 2);
        assert_eq!(args.tick_labels, ["A/B", "C/D"]);
        assert!(args.no_labels);
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }
}
