//! pahmctl - command line front end for the PAHM progress engine
//!
//! Reads and writes the JSON record store in the data directory and prints
//! progress, streaks and level access.

use anyhow::Result;
use clap::Parser;
use pahmctl::{commands, Cli};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured,
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(&cli)?;
    init_logging(cli.verbose, &config.log.level);

    debug!("pahmctl v{} starting", env!("CARGO_PKG_VERSION"));
    commands::run(cli, config)
}
