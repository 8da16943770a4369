//! Command-line argument parsing
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Replay input lines several times, reading every line only once.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Read lines from this file instead of standard input
    pub file: Option<PathBuf>,

    /// Number of times to output the input
    #[arg(short, long, default_value_t = 2)]
    pub passes: usize,

    /// Number of threads that read the input in each pass
    ///
    /// All threads of a pass see the same lines.
    #[arg(short, long, default_value = "1")]
    pub threads: NonZeroUsize,

    /// Output only the number of lines in each pass
    #[arg(short, long)]
    pub count: bool,

    /// Prefix each line with its position, starting from 0
    #[arg(short, long)]
    pub number: bool,
}
