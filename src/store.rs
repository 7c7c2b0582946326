// src/store.rs
//! Local cache of scraped companies.
//!
//! One JSON object on disk, `input name → record`, read fully at startup and
//! rewritten fully by `save`. Single process, single pass: no locking.

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::config::consts::JSON_INDENT;
use crate::error::StoreError;
use crate::file::ensure_parent;
use crate::record::CompanyRecord;

/// Cached records in file order. New names go to the end, so a rewritten
/// file only differs where data changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entries(Vec<(String, CompanyRecord)>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&CompanyRecord> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, record)| record)
    }

    /// Replace in place, or append.
    pub fn insert(&mut self, name: String, record: CompanyRecord) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = record,
            None => self.0.push((name, record)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<CompanyRecord> {
        let at = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(at).1)
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompanyRecord)> {
        self.0.iter().map(|(n, record)| (n.as_str(), record))
    }
}

impl FromIterator<(String, CompanyRecord)> for Entries {
    fn from_iter<I: IntoIterator<Item = (String, CompanyRecord)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (name, record) in iter {
            entries.insert(name, record);
        }
        entries
    }
}

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, record)| (n, record)))
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of company name to record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Entries(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((name, record)) = map.next_entry::<String, CompanyRecord>()? {
                    entries.insert(name, record);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Fresh(&'a CompanyRecord),
    /// Was cached but too old; now removed.
    Evicted,
    Missing,
}

pub struct Store {
    path: PathBuf,
    max_age_days: i64,
    entries: Entries,
}

impl Store {
    /// Read the cache file. A missing file is an empty cache.
    pub fn load(path: &Path, max_age_days: i64) -> Result<Self, StoreError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no cache at {}, starting empty", path.display());
                Entries::new()
            }
            Err(source) => return Err(StoreError::Read { path: path.to_path_buf(), source }),
        };
        Ok(Self::with_entries(path, max_age_days, entries))
    }

    pub fn with_entries(path: &Path, max_age_days: i64, entries: Entries) -> Self {
        Self { path: path.to_path_buf(), max_age_days, entries }
    }

    pub fn get(&mut self, name: &str) -> Option<&CompanyRecord> {
        self.get_at(name, Local::now().date_naive())
    }

    /// Fresh record for `name` as of `today`.
    /// A stale or undated entry is dropped and reported as absent.
    pub fn get_at(&mut self, name: &str, today: NaiveDate) -> Option<&CompanyRecord> {
        match self.lookup_at(name, today) {
            Lookup::Fresh(record) => Some(record),
            Lookup::Evicted | Lookup::Missing => None,
        }
    }

    /// Like `get_at`, but tells an evicted entry apart from one never cached.
    pub fn lookup_at(&mut self, name: &str, today: NaiveDate) -> Lookup<'_> {
        let stale = match self.entries.get(name).map(CompanyRecord::last_updated_date) {
            None => return Lookup::Missing,
            Some(Ok(updated)) => (today - updated).num_days() > self.max_age_days,
            Some(Err(e)) => {
                debug!("{name}: {e}");
                true
            }
        };
        if stale {
            debug!("{name}: cached data is stale, evicting");
            self.entries.remove(name);
            return Lookup::Evicted;
        }
        match self.entries.get(name) {
            Some(record) => Lookup::Fresh(record),
            None => Lookup::Missing,
        }
    }

    pub fn put(&mut self, name: &str, record: CompanyRecord) {
        self.entries.insert(s!(name), record);
    }

    /// Rewrite the whole cache file.
    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write { path: self.path.clone(), source };

        ensure_parent(&self.path).map_err(write_err)?;
        let file = fs::File::create(&self.path).map_err(write_err)?;
        let mut out = BufWriter::new(file);

        let fmt = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
        self.entries
            .serialize(&mut ser)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;

        out.flush().map_err(write_err)?;
        debug!("saved {} cached companies to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// All entries in file order, fresh or not. Does not evict.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompanyRecord)> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &Entries { &self.entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(updated: &str) -> CompanyRecord {
        CompanyRecord { company_name: Some(s!("Acme")), last_updated: s!(updated), ..Default::default() }
    }

    #[test]
    fn entry_older_than_max_age_is_evicted() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put("Acme", record("2024-01-01"));

        assert!(store.get_at("Acme", day(2024, 2, 1)).is_none()); // 31 days
        assert!(store.is_empty());
        assert!(store.get_at("Acme", day(2024, 2, 1)).is_none());
    }

    #[test]
    fn entry_exactly_max_age_old_is_fresh() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put("Acme", record("2024-01-01"));
        assert!(store.get_at("Acme", day(2024, 1, 31)).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn undated_entry_counts_as_stale() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put("Acme", record(""));
        store.put("Beta", record("yesterday"));
        assert!(store.get_at("Acme", day(2024, 1, 1)).is_none());
        assert!(store.get_at("Beta", day(2024, 1, 1)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn lookup_tells_evicted_from_missing() {
        let mut store = Store::with_entries(Path::new("unused.json"), 0, Entries::new());
        store.put("Acme", record("2024-01-01"));
        assert!(matches!(store.lookup_at("Acme", day(2024, 1, 1)), Lookup::Fresh(_)));
        assert_eq!(store.lookup_at("Acme", day(2024, 1, 2)), Lookup::Evicted);
        assert_eq!(store.lookup_at("Acme", day(2024, 1, 2)), Lookup::Missing);
    }

    #[test]
    fn refetched_entry_moves_to_the_end() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put("Acme", record("2023-01-01"));
        store.put("Beta", record("2024-01-01"));
        store.put("Beta", record("2024-01-02"));

        assert!(store.get_at("Acme", day(2024, 1, 3)).is_none());
        store.put("Acme", record("2024-01-03"));

        let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Beta", "Acme"]);
    }

    #[test]
    fn lookup_uses_input_name_verbatim() {
        let mut store = Store::with_entries(Path::new("unused.json"), 30, Entries::new());
        store.put("AT & T", record("2024-01-01"));
        assert!(store.get_at("AT&T", day(2024, 1, 2)).is_none());
        assert!(store.get_at("AT & T", day(2024, 1, 2)).is_some());
    }
}
