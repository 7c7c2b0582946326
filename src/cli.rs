// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::consts::DEFAULT_CONFIG_PATH;
use crate::config::Config;
use crate::core::net::HttpSource;
use crate::csv::write_row;
use crate::error::{Error, Result};
use crate::progress::ConsoleProgress;
use crate::runner::{self, RunSummary};
use crate::store::Store;
use crate::tier::{TierCalculator, TierKind};

#[derive(Debug, Parser)]
#[command(name = "blind_scrape", version, about = "Scrape Blind company pages into a tiered CSV report")]
pub struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Tier calculator: simple | extended (overrides TIER_CALCULATOR)
    #[arg(long)]
    pub tier: Option<TierKind>,

    /// Request budget for this run (overrides MAX_REQUESTS)
    #[arg(long, allow_negative_numbers = true)]
    pub max_requests: Option<i64>,

    /// Print cached companies as CSV (name,last_updated,tier) and exit
    #[arg(long)]
    pub list_cache: bool,

    /// Debug logging (same as RUST_LOG=blind_scrape=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file with command-line overrides applied.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(kind) = self.tier {
            config.tier_calculator = kind;
        }
        if let Some(n) = self.max_requests {
            config.max_requests = n;
        }
        Ok(config)
    }
}

pub fn run(args: &Args) -> Result<()> {
    let config = args.load_config()?;
    let calculator = config.tier_calculator.build(config.tier_exclusions.as_ref());

    if args.list_cache {
        let store = Store::load(&config.database_file_path, config.max_age)?;
        return list_cache(&store, calculator.as_ref(), io::stdout().lock()).map_err(|source| Error::Output {
            path: PathBuf::from("<stdout>"),
            source,
        });
    }

    let mut source = HttpSource::new(&config.http_headers)?;
    let mut progress = ConsoleProgress::default();
    let summary: RunSummary = runner::run(&config, &mut source, calculator.as_ref(), Some(&mut progress))?;

    info!(
        "wrote {} rows to {}, cache at {}",
        summary.rows_written,
        config.output_file_path.display(),
        config.database_file_path.display()
    );
    Ok(())
}

/// One CSV line per cached company. Does not evict anything.
pub fn list_cache<W: Write>(store: &Store, calculator: &dyn TierCalculator, mut out: W) -> io::Result<()> {
    write_row(&mut out, &["name", "last_updated", "tier"])?;
    for (name, record) in store.iter() {
        let tier = calculator.tier(record);
        write_row(&mut out, &[name, record.last_updated.as_str(), tier.label()])?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CompanyRecord;
    use crate::store::Entries;
    use crate::tier::Simple;
    use std::path::Path;

    #[test]
    fn args_parse_overrides() {
        let args = Args::try_parse_from(["blind_scrape", "--tier", "extended", "--max-requests", "0", "-v"]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(args.tier, Some(TierKind::Extended));
        assert_eq!(args.max_requests, Some(0));
        assert!(args.verbose);
        assert!(!args.list_cache);

        assert!(Args::try_parse_from(["blind_scrape", "--tier", "fancy"]).is_err());

        let args = Args::try_parse_from(["blind_scrape", "--max-requests", "-1"]).unwrap();
        assert_eq!(args.max_requests, Some(-1));
    }

    #[test]
    fn cache_listing_is_csv() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put(
            "Acme",
            CompanyRecord { overall: s!("4.3"), last_updated: s!("2024-01-01"), ..Default::default() },
        );
        store.put("Beta, Inc", CompanyRecord { last_updated: s!("2024-02-01"), ..Default::default() });

        let mut buf = Vec::new();
        list_cache(&store, &Simple, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "name,last_updated,tier\r\nAcme,2024-01-01,$\r\n\"Beta, Inc\",2024-02-01,N/A\r\n"
        );
    }
}
