// src/config/consts.rs

// Net config
pub const DEFAULT_BASE_URL: &str = "https://www.teamblind.com";
pub const COMPANY_PATH: &str = "/company/";

// Startup
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

// Cache
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const JSON_INDENT: &[u8] = b"    ";

// Report
pub const TIER_COLUMN: &str = "tier";
