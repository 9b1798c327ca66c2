use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codebrowser::cli::{self, Cli};
use codebrowser::diagnostics::TracingReporter;
use codebrowser::engine::Generator;
use codebrowser::{config, listing, report};

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("codebrowser=debug")
    } else if cli.quiet {
        EnvFilter::new("codebrowser=error")
    } else {
        EnvFilter::new("codebrowser=info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match cli.logfile {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.without_time().init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    info!("codebrowser v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        cli::Commands::Generate(args) => {
            let generator = Generator::new(args)?;
            let run = generator.run(&TracingReporter)?;
            if !cli.quiet {
                report::terminal::render(&run);
            }
        }
        cli::Commands::Init => {
            config::init_config()?;
        }
        cli::Commands::ListAdapters => {
            listing::list_adapters();
        }
    }

    Ok(())
}
