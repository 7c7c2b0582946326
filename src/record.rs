// src/record.rs
use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::consts::DATE_FORMAT;
use crate::error::ParseError;

/// One scraped company page. Values are kept as the page shows them.
///
/// Cache files edited by hand may hold numbers or booleans where a string is
/// expected; those load as their JSON text instead of failing the whole cache.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    // general
    #[serde(deserialize_with = "lenient_opt")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub url: Option<String>,
    // overview
    #[serde(deserialize_with = "lenient")]
    pub website: String,
    #[serde(deserialize_with = "lenient")]
    pub industry: String,
    #[serde(deserialize_with = "lenient")]
    pub locations: String,
    #[serde(deserialize_with = "lenient")]
    pub founded: String,
    #[serde(deserialize_with = "lenient")]
    pub size: String,
    #[serde(deserialize_with = "lenient")]
    pub salary: String,
    // reviews
    #[serde(deserialize_with = "lenient")]
    pub overall: String,
    #[serde(deserialize_with = "lenient")]
    pub career_growth: String,
    #[serde(deserialize_with = "lenient")]
    pub work_life_balance: String,
    #[serde(deserialize_with = "lenient")]
    pub compensation_benefits: String,
    #[serde(deserialize_with = "lenient")]
    pub company_culture: String,
    #[serde(deserialize_with = "lenient")]
    pub management: String,
    // compensation
    #[serde(deserialize_with = "lenient")]
    pub median_total_compensation: String,
    #[serde(rename = "25th_percentile", deserialize_with = "lenient")]
    pub percentile_25th: String,
    #[serde(rename = "70th_percentile", deserialize_with = "lenient")]
    pub percentile_70th: String,
    #[serde(rename = "90th_percentile", deserialize_with = "lenient")]
    pub percentile_90th: String,
    // other
    #[serde(deserialize_with = "lenient")]
    pub last_updated: String,

    /// Keys this version does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CompanyRecord {
    /// Look up a field by its cache-file key.
    ///
    /// Outer `None`: the record has no such key.
    /// `Some(None)`: the key exists but holds no value (`null`).
    /// Extra keys that are not strings come back as their JSON text.
    pub fn field(&self, key: &str) -> Option<Option<Cow<'_, str>>> {
        let v = match key {
            "company_name" => return Some(self.company_name.as_deref().map(Cow::Borrowed)),
            "url" => return Some(self.url.as_deref().map(Cow::Borrowed)),
            "website" => &self.website,
            "industry" => &self.industry,
            "locations" => &self.locations,
            "founded" => &self.founded,
            "size" => &self.size,
            "salary" => &self.salary,
            "overall" => &self.overall,
            "career_growth" => &self.career_growth,
            "work_life_balance" => &self.work_life_balance,
            "compensation_benefits" => &self.compensation_benefits,
            "company_culture" => &self.company_culture,
            "management" => &self.management,
            "median_total_compensation" => &self.median_total_compensation,
            "25th_percentile" => &self.percentile_25th,
            "70th_percentile" => &self.percentile_70th,
            "90th_percentile" => &self.percentile_90th,
            "last_updated" => &self.last_updated,
            other => {
                return self.extra.get(other).map(|value| match value {
                    Value::Null => None,
                    Value::String(text) => Some(Cow::Borrowed(text.as_str())),
                    other => Some(Cow::Owned(other.to_string())),
                });
            }
        };
        Some(Some(Cow::Borrowed(v.as_str())))
    }

    /// `last_updated` as a date.
    pub fn last_updated_date(&self) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(self.last_updated.trim(), DATE_FORMAT).map_err(|_| {
            ParseError::UnexpectedFormat { field: "last_updated", value: self.last_updated.clone() }
        })
    }

    pub fn stamp(&mut self, today: NaiveDate) {
        self.last_updated = today.format(DATE_FORMAT).to_string();
    }
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// Parse a score such as `"3.9"`.
/// `Ok(None)` when the page left it blank.
pub fn parse_score(field: &'static str, raw: &str) -> Result<Option<f64>, ParseError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    t.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| ParseError::UnexpectedFormat { field, value: s!(raw) })
}
