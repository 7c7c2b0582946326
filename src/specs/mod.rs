// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific scraping specifications. Each spec owns *where the ground
//! truth lives in the HTML* for one page and turns a fetched document into a
//! typed value.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a page body already in memory.
//! - **Selector choice**: the fixed structural selectors of the page.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`) and **URL building** (`scrape`).
//! - **Caching** (`store`) and **tiering/export** (`tier`, `report`).
//!
//! Specs are testable offline against captured or synthetic fixtures.
pub mod company;
