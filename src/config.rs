// src/config.rs

use crate::error::ConfigError;
use crate::fetch::FetchMode;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_URL: &str = "https://www.capitoltrades.com/trades";
pub const DEFAULT_OUTPUT: &str = "congressional_trades.csv";
pub const DEFAULT_LOG_FILE: &str = "scraping_log.txt";
pub const DEFAULT_WAIT_SECS: u64 = 10;
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;

/// Settings for one scrape run.
///
/// Every field has a default matching the single hardcoded page the scraper
/// was written against; `TRADES_*` environment variables override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub output: PathBuf,
    pub log_file: PathBuf,
    pub fetch_mode: FetchMode,
    /// Bounded wait for the table element in browser mode.
    pub wait_timeout: Duration,
    pub max_pages: usize,
    pub fetch_retries: usize,
    /// Minimum similarity score (0..=100) a name must exceed to be merged.
    pub fuzzy_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL should parse"),
            output: PathBuf::from(DEFAULT_OUTPUT),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            fetch_mode: FetchMode::Http,
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_SECS),
            max_pages: 1,
            fetch_retries: 0,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value source. Unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TRADES_URL") {
            cfg.url = Url::parse(v.trim()).map_err(|e| invalid("TRADES_URL", &v, e))?;
        }
        if let Some(v) = get("TRADES_OUTPUT") {
            cfg.output = PathBuf::from(v);
        }
        if let Some(v) = get("TRADES_LOG_FILE") {
            cfg.log_file = PathBuf::from(v);
        }
        if let Some(v) = get("TRADES_FETCH_MODE") {
            cfg.fetch_mode = v
                .parse()
                .map_err(|e: String| invalid("TRADES_FETCH_MODE", &v, e))?;
        }
        if let Some(v) = get("TRADES_WAIT_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|e| invalid("TRADES_WAIT_SECS", &v, e))?;
            cfg.wait_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get("TRADES_MAX_PAGES") {
            let pages: usize = v
                .trim()
                .parse()
                .map_err(|e| invalid("TRADES_MAX_PAGES", &v, e))?;
            if pages == 0 {
                return Err(invalid("TRADES_MAX_PAGES", &v, "must be at least 1"));
            }
            cfg.max_pages = pages;
        }
        if let Some(v) = get("TRADES_FETCH_RETRIES") {
            cfg.fetch_retries = v
                .trim()
                .parse()
                .map_err(|e| invalid("TRADES_FETCH_RETRIES", &v, e))?;
        }
        if let Some(v) = get("TRADES_FUZZY_THRESHOLD") {
            let t: u8 = v
                .trim()
                .parse()
                .map_err(|e| invalid("TRADES_FUZZY_THRESHOLD", &v, e))?;
            if t > 100 {
                return Err(invalid("TRADES_FUZZY_THRESHOLD", &v, "must be within 0..=100"));
            }
            cfg.fuzzy_threshold = t;
        }

        Ok(cfg)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
