// src/fetch/http.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Direct GET of the listing page; the body is used verbatim.
pub struct HttpFetcher {
    client: Client,
    retries: usize,
}

impl HttpFetcher {
    /// `retries` is the number of extra attempts after the first failure.
    pub fn new(retries: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .cookie_store(true)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, retries })
    }

    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_text(url).await {
                Ok(html) => {
                    debug!(%url, bytes = html.len(), attempt, "fetched page");
                    return Ok(html);
                }
                Err(e) if attempt <= self.retries => {
                    warn!("GET {} failed (attempt {}): {:#}", url, attempt, e);
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_text(&self, url: &Url) -> Result<String> {
        self.client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()
            .with_context(|| format!("GET {}", url))?
            .text()
            .await
            .with_context(|| format!("reading body from {}", url))
    }
}
