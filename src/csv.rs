// src/csv.rs
//! Minimal CSV writer. std-only.
//!
//! Dialect: `,` separator, `"` quoting only when needed, `\r\n` row ends.

use std::io::{self, Write};

const SEP: char = ',';
const EOL: &str = "\r\n";

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    // A lone empty field must be visible, otherwise it reads back as no row.
    if let [only] = row {
        if only.as_ref().is_empty() {
            return write!(w, "\"\"{EOL}");
        }
    }

    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", SEP)?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "{EOL}")
}

/// An empty line, as written for blank or failed input rows.
pub fn write_empty_row<W: Write>(mut w: W) -> io::Result<()> {
    write!(w, "{EOL}")
}
