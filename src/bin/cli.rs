// src/bin/cli.rs
use blind_scrape::cli::{self, Args};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let default_level = if args.verbose { "blind_scrape=debug" } else { "blind_scrape=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli::run(&args)?;
    Ok(())
}
