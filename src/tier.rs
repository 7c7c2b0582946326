// src/tier.rs
//! Tier labels derived from a company record.
//!
//! Two calculators ship:
//! - [`Simple`]: buckets on the overall score only.
//! - [`Extended`]: overall, work-life balance, culture and size, plus an
//!   exclusion list that forces `X`.
//!
//! Buckets are checked from worst to best and the first match wins.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::record::{parse_score, CompanyRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    C,
    B,
    A,
    Top,
    /// Simple calculator: no overall score.
    NotAvailable,
    /// Extended calculator: excluded, or a required score is missing.
    Excluded,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::C => "C",
            Tier::B => "B",
            Tier::A => "A",
            Tier::Top => "$",
            Tier::NotAvailable => "N/A",
            Tier::Excluded => "X",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait TierCalculator {
    fn tier(&self, record: &CompanyRecord) -> Tier;
}

/* ---------------- Simple ---------------- */

#[derive(Clone, Copy, Debug, Default)]
pub struct Simple;

impl TierCalculator for Simple {
    fn tier(&self, record: &CompanyRecord) -> Tier {
        let overall = match parse_score("overall", &record.overall) {
            Ok(Some(v)) => v,
            Ok(None) => return Tier::NotAvailable,
            Err(e) => {
                tracing::debug!("{}: {e}", record.company_name.as_deref().unwrap_or("?"));
                return Tier::NotAvailable;
            }
        };

        if overall < 3.4 {
            Tier::C
        } else if overall < 3.8 {
            Tier::B
        } else if overall < 4.2 {
            Tier::A
        } else {
            Tier::Top
        }
    }
}

/* ---------------- Extended ---------------- */

const SMALL_SIZES: [&str; 2] = ["1 to 50 employees", "51 to 200 employees"];

const DEFAULT_EXCLUSIONS: &[(&str, &str)] = &[
    ("Audible", "fully onsite"),
    ("Dell", "fully onsite"),
    ("Discover Financial Services", "bad location (Riverwoods, IL)"),
    ("IMC", "bad location (Chicago, IL)"),
    ("Lululemon", "bad location (Seattle, WA)"),
    ("Nike", "bad location (Beaverton, OR)"),
    ("Nintendo", "bad location (Redmond, WA)"),
    ("Redfin", "bad location (Seattle, WA)"),
    ("Riot Games", "bad location (Los Angeles, CA)"),
    ("Vertex Pharmaceuticals", "bad location (Boston, MA)"),
    ("Viasat", "bad location (Carlsbad, CA)"),
    ("World Wide Technology", "bad location (St. Louis, MO)"),
];

/// Multi-criteria calculator.
///
/// Within each band the criteria are OR'ed: missing any one of them demotes
/// the company to that band.
#[derive(Clone, Debug)]
pub struct Extended {
    /// Scraped company name → reason.
    exclusions: BTreeMap<String, String>,
}

impl Default for Extended {
    fn default() -> Self {
        Self::with_exclusions(DEFAULT_EXCLUSIONS.iter().map(|(n, r)| (s!(*n), s!(*r))).collect())
    }
}

impl Extended {
    pub fn with_exclusions(exclusions: BTreeMap<String, String>) -> Self {
        Self { exclusions }
    }

    pub fn exclusion_reason(&self, company_name: &str) -> Option<&str> {
        self.exclusions.get(company_name).map(String::as_str)
    }
}

impl TierCalculator for Extended {
    fn tier(&self, record: &CompanyRecord) -> Tier {
        if let Some(reason) = record.company_name.as_deref().and_then(|n| self.exclusion_reason(n)) {
            tracing::debug!("{}: excluded ({reason})", record.company_name.as_deref().unwrap_or_default());
            return Tier::Excluded;
        }

        let scores = (
            parse_score("overall", &record.overall),
            parse_score("work_life_balance", &record.work_life_balance),
            parse_score("company_culture", &record.company_culture),
        );
        let (overall, wlb, culture) = match scores {
            (Ok(Some(o)), Ok(Some(w)), Ok(Some(c))) => (o, w, c),
            _ => return Tier::Excluded,
        };

        if overall < 3.2 || wlb < 3.4 || culture < 3.1 || SMALL_SIZES.contains(&record.size.as_str()) {
            Tier::C
        } else if overall < 3.5 || wlb < 3.8 || culture < 3.5 {
            Tier::B
        } else if overall < 3.8 || wlb < 4.2 || culture < 3.9 {
            Tier::A
        } else {
            Tier::Top
        }
    }
}

/* ---------------- Selection ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    #[default]
    Simple,
    Extended,
}

impl TierKind {
    /// `exclusions` only applies to `Extended`; `None` keeps the built-in list.
    pub fn build(self, exclusions: Option<&BTreeMap<String, String>>) -> Box<dyn TierCalculator> {
        match self {
            TierKind::Simple => Box::new(Simple),
            TierKind::Extended => match exclusions {
                Some(list) => Box::new(Extended::with_exclusions(list.clone())),
                None => Box::new(Extended::default()),
            },
        }
    }
}

impl FromStr for TierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TierKind::Simple),
            "extended" => Ok(TierKind::Extended),
            other => Err(format!("unknown tier calculator: {other} (expected simple or extended)")),
        }
    }
}
