// src/fetch/mod.rs

use crate::config::Config;
use anyhow::Result;
use std::{fmt, str::FromStr};
use url::Url;

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;

pub use http::HttpFetcher;

/// How the listing page is turned into HTML.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Plain GET; misses anything injected by client-side script.
    Http,
    /// Headless browser; waits for a `table` element before capturing the DOM.
    Browser,
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(FetchMode::Http),
            "browser" => Ok(FetchMode::Browser),
            other => Err(format!("unknown fetch mode {other:?}, expected http or browser")),
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchMode::Http => "http",
            FetchMode::Browser => "browser",
        })
    }
}

pub enum Fetcher {
    Http(HttpFetcher),
    #[cfg(feature = "browser")]
    Browser(browser::BrowserFetcher),
}

impl Fetcher {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        match cfg.fetch_mode {
            FetchMode::Http => Ok(Fetcher::Http(HttpFetcher::new(cfg.fetch_retries)?)),
            #[cfg(feature = "browser")]
            FetchMode::Browser => Ok(Fetcher::Browser(browser::BrowserFetcher::new(
                cfg.wait_timeout,
            ))),
            #[cfg(not(feature = "browser"))]
            FetchMode::Browser => {
                anyhow::bail!("fetch mode `browser` needs a build with the `browser` feature")
            }
        }
    }

    /// Fetch one page and return its (rendered) HTML.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        match self {
            Fetcher::Http(f) => f.fetch(url).await,
            #[cfg(feature = "browser")]
            Fetcher::Browser(f) => f.fetch(url).await,
        }
    }
}

/// URL of the `page`-th listing page (1-based). Page 1 is the base URL as given.
pub fn page_url(base: &Url, page: usize) -> Url {
    if page <= 1 {
        return base.clone();
    }
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("page", &page.to_string());
    }
    url
}
