// src/error.rs
//! Error types.
//!
//! Per-company failures (`FetchError`) are collected by the runner and never
//! abort a run. Everything else in `Error` is fatal to the run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal, run-level errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("cache store error: {0}")]
    Store(#[from] StoreError),

    #[error("could not read input file {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write report {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cache file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a single company could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("status code = {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// HTML structure did not match what the page parser expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("element not found: {selector} (index {index})")]
    ElementNotFound { selector: &'static str, index: usize },

    #[error("unexpected value for {field}: {value:?}")]
    UnexpectedFormat { field: &'static str, value: String },

    #[error("invalid selector: {0}")]
    InvalidSelector(&'static str),
}
