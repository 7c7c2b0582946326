// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
};

use crate::error::Error;

/// Read the input list: one company name per line, trimmed.
/// Blank lines are kept so output rows stay aligned with input lines.
pub fn read_company_names(path: &Path) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Input { path: path.to_path_buf(), source })?;
    Ok(parse_company_names(&text))
}

pub fn parse_company_names(text: &str) -> Vec<String> {
    text.lines().map(|line| s!(line.trim())).collect()
}

/// Create/truncate the report file, creating its directory if needed.
pub fn create_report(path: &Path) -> Result<BufWriter<File>, Error> {
    let output_err = |source: std::io::Error| Error::Output { path: path.to_path_buf(), source };
    ensure_parent(path).map_err(output_err)?;
    let file = File::create(path).map_err(output_err)?;
    Ok(BufWriter::new(file))
}

/// Make sure the directory a file will be written into exists.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_kept_in_place() {
        let names = parse_company_names("Acme\n\n  Beta Corp  \r\nAT & T\n");
        assert_eq!(names, ["Acme", "", "Beta Corp", "AT & T"]);
    }

    #[test]
    fn empty_file_has_no_names() {
        assert!(parse_company_names("").is_empty());
    }
}
