// src/specs/company.rs
//! Scraping *spec* for a Blind company page (`/company/<slug>`).
//!
//! Everything comes from fixed structural selectors on the page's utility
//! classes. Multi-class selectors match the whole `class` attribute exactly,
//! so a restyled element is reported as missing instead of silently matching
//! something else.
//!
//! Required: overview, review and compensation blocks. A missing one fails
//! the whole page with `ParseError::ElementNotFound`.
//! Optional: the display name and the canonical link.

use chrono::NaiveDate;
use scraper::ElementRef;

use crate::core::html::{first_attr, first_text, nth, nth_text, parse_document};
use crate::error::ParseError;
use crate::record::CompanyRecord;

// general
const NAME: &str = r#"div[class="text-center text-2xl font-bold lg:text-left"]"#;
const CANONICAL: &str = r#"link[rel~="canonical"]"#;

// overview
const WEBSITE: &str = r#"h3[class="text-base font-semibold sm:text-lg"]"#;
const OVERVIEW_ITEM: &str = r#"div[class="text-base font-semibold sm:text-lg"]"#;

// reviews
const OVERALL_BOX: &str =
    r#"div[class="flex items-start gap-2 border-b border-gray-300 pb-1 pr-4 lg:flex-col lg:border-b-0 lg:border-r"]"#;
const OVERALL_SCORE: &str = r#"div[class="text-xl font-semibold"]"#;
const REVIEW_GRID: &str = r#"div[class="grid grid-flow-row grid-cols-1 gap-x-10 gap-y-4 lg:ml-9 lg:grid-cols-2"]"#;
const REVIEW_SCORE: &str = "div.font-semibold";

// compensation
const MEDIAN_TC: &str = r#"p[class="font-bold text-blue-system sm:text-lg"]"#;
const PERCENTILE: &str = r#"h5[class="text-md font-semibold"]"#;

/// Parse a company page into a record stamped with `today`.
pub fn parse(html: &str, today: NaiveDate) -> Result<CompanyRecord, ParseError> {
    let doc = parse_document(html);
    let root = doc.root_element();

    let overview = |i| nth_text(root, OVERVIEW_ITEM, i);
    let overall_box = nth(root, OVERALL_BOX, 0)?;
    let grid = nth(root, REVIEW_GRID, 0)?;
    let review = |i| nth_text(grid, REVIEW_SCORE, i);
    let percentile = |i| nth_text(root, PERCENTILE, i);

    let mut record = CompanyRecord {
        // general
        company_name: first_text(root, NAME)?,
        url: first_attr(root, CANONICAL, "href")?,
        // overview
        website: nth_text(root, WEBSITE, 0)?,
        industry: overview(0)?,
        locations: overview(1)?,
        founded: overview(2)?,
        size: overview(3)?,
        salary: overview(4)?,
        // reviews
        overall: overall_score(overall_box)?,
        career_growth: review(0)?,
        work_life_balance: review(1)?,
        compensation_benefits: review(2)?,
        company_culture: review(3)?,
        management: review(4)?,
        // compensation
        median_total_compensation: nth_text(root, MEDIAN_TC, 0)?,
        percentile_25th: percentile(0)?,
        percentile_70th: percentile(1)?,
        percentile_90th: percentile(2)?,
        ..Default::default()
    };
    record.stamp(today);
    Ok(record)
}

fn overall_score(overall_box: ElementRef<'_>) -> Result<String, ParseError> {
    nth_text(overall_box, OVERALL_SCORE, 0)
}
