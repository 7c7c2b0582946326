// src/runner.rs
use std::thread;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::{
    config::Config,
    core::net::PageSource,
    error::{Error, Result},
    file::{create_report, read_company_names},
    progress::Progress,
    record::CompanyRecord,
    report::ReportWriter,
    scrape::fetch_company_at,
    store::{Lookup, Store},
    tier::TierCalculator,
};

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Data rows written (one per input line).
    pub rows_written: usize,
    pub from_cache: usize,
    pub fetched: usize,
    /// Fetch attempts, successful or not.
    pub requests_made: u64,
    /// Input names we got no data for, in input order.
    pub failed: Vec<String>,
}

/// A negative budget allows no requests at all.
fn budget_spent(made: u64, max: i64) -> bool {
    u64::try_from(max).map_or(true, |max| made >= max)
}

/// Top-level runner: input → cache/fetch → report, then persist the cache.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    config: &Config,
    source: &mut dyn PageSource,
    calculator: &dyn TierCalculator,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    run_on(config, source, calculator, progress, Local::now().date_naive())
}

/// `run` with an explicit "today" for staleness and record stamps.
pub fn run_on(
    config: &Config,
    source: &mut dyn PageSource,
    calculator: &dyn TierCalculator,
    mut progress: Option<&mut dyn Progress>,
    today: NaiveDate,
) -> Result<RunSummary> {
    let names = read_company_names(&config.input_file_path)?;
    let mut store = Store::load(&config.database_file_path, config.max_age)?;

    let output_err = |source: std::io::Error| Error::Output { path: config.output_file_path.clone(), source };
    let mut report = ReportWriter::new(
        create_report(&config.output_file_path)?,
        &config.output_file_headers,
        calculator,
    );
    report.write_header().map_err(output_err)?;

    info!(
        "processing {} input lines, {} cached companies, budget {} requests",
        names.len(),
        store.len(),
        config.max_requests
    );
    if let Some(p) = progress.as_deref_mut() {
        p.begin(names.len());
    }

    let mut summary = RunSummary::default();

    for (i, name) in names.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.item_start(i, name);
        }
        let mut say = |msg: &str| {
            if let Some(p) = progress.as_deref_mut() {
                p.log(msg);
            }
        };

        if name.is_empty() {
            say("SKIPPED: Empty company name");
            report.write_empty().map_err(output_err)?;
            summary.rows_written += 1;
            continue;
        }

        let cached: Option<CompanyRecord> = match store.lookup_at(name, today) {
            Lookup::Fresh(record) => Some(record.clone()),
            Lookup::Evicted => {
                say(&format!("Data for {name} is stale. Fetching new data."));
                None
            }
            Lookup::Missing => None,
        };

        let record = match cached {
            Some(record) => {
                say("SUCCESS: Got data from database");
                summary.from_cache += 1;
                Some(record)
            }
            None if budget_spent(summary.requests_made, config.max_requests) => {
                say("SKIPPED: Maximum number of requests reached");
                None
            }
            None => {
                summary.requests_made += 1;
                let fetched = match fetch_company_at(source, &mut store, &config.base_url, name, today) {
                    Ok(record) => {
                        say("SUCCESS: Got data from Blind");
                        summary.fetched += 1;
                        Some(record)
                    }
                    Err(e) => {
                        warn!("{name}: {e}");
                        say(&format!("FAILURE: {e}"));
                        None
                    }
                };
                thread::sleep(config.time_delay());
                fetched
            }
        };

        match record {
            Some(record) => report.write_record(&record).map_err(output_err)?,
            None => {
                summary.failed.push(name.clone());
                report.write_empty().map_err(output_err)?;
            }
        }
        summary.rows_written += 1;
    }

    report.finish().map_err(output_err)?;
    store.save()?;

    info!(
        "done: {} from cache, {} fetched, {} failed",
        summary.from_cache,
        summary.fetched,
        summary.failed.len()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary.failed);
    }
    Ok(summary)
}
