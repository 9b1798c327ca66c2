use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render annotated source pages from a directory of XML reports
    Generate(GenerateArgs),

    /// Initialize a .codebrowser.toml config file in the current directory
    Init,

    /// List the supported report formats
    ListAdapters,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory holding the XML report files
    #[arg(long = "log", value_name = "DIR")]
    pub log_dir: PathBuf,

    /// Directory the pages are written to (must exist)
    #[arg(long = "output", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Project source tree. When given, every file below it is rendered,
    /// otherwise only the files named in the reports.
    #[arg(long = "source", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Adapters to run (comma-separated). Default: all
    #[arg(long)]
    pub adapters: Option<String>,

    /// Glob patterns to exclude from the source tree (can be repeated)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Ignore .codebrowser.toml config files
    #[arg(long)]
    pub no_config: bool,
}
