// src/fetch/browser.rs

use anyhow::{anyhow, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::{sync::Arc, time::Duration};
use tracing::debug;
use url::Url;

const TABLE_SELECTOR: &str = "table";

/// Renders the page in headless Chrome so script-injected rows are present.
pub struct BrowserFetcher {
    wait: Duration,
}

impl BrowserFetcher {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let target = url.to_string();
        let wait = self.wait;
        tokio::task::spawn_blocking(move || render(&target, wait))
            .await
            .context("browser task panicked")?
            .with_context(|| format!("rendering {}", url))
    }
}

/// Owns the browser process and its tab. Dropping it closes both, so every
/// return path out of `render` releases the browser.
struct BrowserSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession {
    fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| anyhow!("invalid browser launch options: {}", e))?;
        let browser =
            Browser::new(options).map_err(|e| anyhow!("failed to launch browser: {}", e))?;
        let tab = browser
            .new_tab()
            .map_err(|e| anyhow!("failed to create tab: {}", e))?;
        Ok(Self {
            tab,
            _browser: browser,
        })
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(true) {
            debug!("closing tab: {}", e);
        }
        debug!("browser session released");
    }
}

fn render(url: &str, wait: Duration) -> Result<String> {
    let session = BrowserSession::launch()?;
    session
        .tab
        .navigate_to(url)
        .map_err(|e| anyhow!("navigation to {} failed: {}", url, e))?;
    session
        .tab
        .wait_for_element_with_custom_timeout(TABLE_SELECTOR, wait)
        .map_err(|e| anyhow!("no <{}> within {:?}: {}", TABLE_SELECTOR, wait, e))?;
    let html = session
        .tab
        .get_content()
        .map_err(|e| anyhow!("failed to read rendered content: {}", e))?;
    debug!(url, bytes = html.len(), "rendered page");
    Ok(html)
}
