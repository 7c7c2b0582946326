// src/scrape.rs
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::consts::COMPANY_PATH;
use crate::core::net::PageSource;
use crate::core::sanitize::company_slug;
use crate::error::FetchError;
use crate::record::CompanyRecord;
use crate::specs::company;
use crate::store::Store;

/// `<base>/company/<slug>`
pub fn company_url(base_url: &str, name: &str) -> String {
    join!(base_url.trim_end_matches('/'), COMPANY_PATH, &company_slug(name))
}

/// Fetch and parse one company page.
///
/// On success the record is also written into `store` under `name`
/// (the input spelling, not the scraped display name).
pub fn fetch_company(
    source: &mut dyn PageSource,
    store: &mut Store,
    base_url: &str,
    name: &str,
) -> Result<CompanyRecord, FetchError> {
    fetch_company_at(source, store, base_url, name, Local::now().date_naive())
}

pub fn fetch_company_at(
    source: &mut dyn PageSource,
    store: &mut Store,
    base_url: &str,
    name: &str,
    today: NaiveDate,
) -> Result<CompanyRecord, FetchError> {
    let url = company_url(base_url, name);
    debug!("GET {url}");

    let page = source.get(&url)?;
    if page.status != 200 {
        return Err(FetchError::Status(page.status));
    }

    let record = company::parse(&page.body, today)?;
    store.put(name, record.clone());
    Ok(record)
}
