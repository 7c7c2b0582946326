// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod error;
pub mod file;
pub mod progress;
pub mod record;
pub mod report;
pub mod runner;
pub mod scrape;
pub mod store;
pub mod tier;

pub use error::{Error, Result};
