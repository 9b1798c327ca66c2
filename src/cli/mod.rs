pub mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{Commands, GenerateArgs};

/// codebrowser: annotated source views from static-analysis reports
///
/// Reads checkstyle, PMD, CPD, Padawan and Clover coverage XML reports
/// and renders one page per source file with every reported line range
/// highlighted.
#[derive(Parser, Debug)]
#[command(
    name = "codebrowser",
    version,
    about = "codebrowser: annotated source views from static-analysis reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub logfile: Option<PathBuf>,
}
