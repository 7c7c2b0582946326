// src/report.rs
use std::borrow::Cow;
use std::io::{self, Write};

use crate::config::consts::TIER_COLUMN;
use crate::config::OutputColumns;
use crate::csv::{write_empty_row, write_row};
use crate::record::CompanyRecord;
use crate::tier::TierCalculator;

/// Streams the report: header once, then one row per input line.
pub struct ReportWriter<'a, W: Write> {
    out: W,
    columns: Vec<String>,
    calculator: &'a dyn TierCalculator,
}

impl<'a, W: Write> ReportWriter<'a, W> {
    pub fn new(out: W, columns: &OutputColumns, calculator: &'a dyn TierCalculator) -> Self {
        Self {
            out,
            columns: columns.enabled().map(String::from).collect(),
            calculator,
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        write_row(&mut self.out, self.columns.as_slice())
    }

    /// Blank input line, or a company we have no data for.
    pub fn write_empty(&mut self) -> io::Result<()> {
        write_empty_row(&mut self.out)
    }

    pub fn write_record(&mut self, record: &CompanyRecord) -> io::Result<()> {
        let row = self.build_row(record);
        write_row(&mut self.out, row.as_slice())
    }

    pub fn build_row(&self, record: &CompanyRecord) -> Vec<String> {
        self.columns
            .iter()
            .map(|col| {
                if col == TIER_COLUMN {
                    s!(self.calculator.tier(record).label())
                } else {
                    record.field(col).flatten().map(Cow::into_owned).unwrap_or_default()
                }
            })
            .collect()
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
