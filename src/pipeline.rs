// src/pipeline.rs

use crate::{
    config::Config,
    extract::{RawRecord, RowExtractor},
    fetch::{page_url, Fetcher},
    process::process_records,
    write::{write_trades, Summary},
};
use anyhow::{bail, Context, Result};
use tracing::info;

/// Raw rows gathered from every fetched page.
#[derive(Debug, Default)]
pub struct Scraped {
    pub pages: usize,
    pub records: Vec<RawRecord>,
    pub rows_seen: usize,
    pub skipped: usize,
}

/// What one run did, for the caller to report.
#[derive(Debug)]
pub struct RunReport {
    pub pages: usize,
    pub rows_seen: usize,
    /// Rows skipped during extraction or field parsing.
    pub skipped: usize,
    /// Rows dropped for missing required fields.
    pub dropped: usize,
    pub summary: Summary,
}

/// Fetch, extract, normalize and write. Any `Err` is fatal and leaves the
/// previous output file untouched; bad rows are logged and skipped instead.
pub async fn run(cfg: &Config) -> Result<RunReport> {
    let fetcher = Fetcher::from_config(cfg)?;
    info!("fetching with {} strategy", cfg.fetch_mode);
    let scraped = scrape_trades(cfg, &fetcher).await?;
    finish(cfg, scraped)
}

/// Walk the listing pages in order, stopping after `max_pages` or at the
/// first page without any body rows. A first page without rows is an error:
/// the table was never rendered, and writing an empty file would clobber
/// the last good output.
pub async fn scrape_trades(cfg: &Config, fetcher: &Fetcher) -> Result<Scraped> {
    let mut extractor = RowExtractor::new();
    let mut scraped = Scraped::default();

    for page in 1..=cfg.max_pages {
        let url = page_url(&cfg.url, page);
        info!("fetching page {}: {}", page, url);
        let html = fetcher
            .fetch(&url)
            .await
            .with_context(|| format!("fetching page {}", page))?;

        let seen_before = extractor.rows_seen();
        let rows = extractor.extract(&html);
        if extractor.rows_seen() == seen_before {
            if page == 1 {
                bail!("no trade table on {}", url);
            }
            info!("page {} has no trade rows; stopping", page);
            break;
        }
        scraped.pages = page;
        scraped.records.extend(rows);
    }

    scraped.rows_seen = extractor.rows_seen();
    scraped.skipped = extractor.skipped().len();
    info!(
        "extracted {} rows from {} page(s), {} skipped",
        scraped.records.len(),
        scraped.pages,
        scraped.skipped
    );
    Ok(scraped)
}

/// Run everything after fetching on already-downloaded pages.
pub fn run_on_pages<S: AsRef<str>>(cfg: &Config, pages: &[S]) -> Result<RunReport> {
    let mut extractor = RowExtractor::new();
    let mut scraped = Scraped::default();
    for html in pages {
        scraped.records.extend(extractor.extract(html.as_ref()));
        scraped.pages += 1;
        if scraped.pages == 1 && extractor.rows_seen() == 0 {
            bail!("no trade table on the first page");
        }
    }
    scraped.rows_seen = extractor.rows_seen();
    scraped.skipped = extractor.skipped().len();
    finish(cfg, scraped)
}

fn finish(cfg: &Config, scraped: Scraped) -> Result<RunReport> {
    let normalized = process_records(&scraped.records, cfg.fuzzy_threshold);

    write_trades(&cfg.output, &normalized.trades)
        .with_context(|| format!("writing {}", cfg.output.display()))?;
    info!("wrote {}", cfg.output.display());

    let summary = Summary::from_trades(&normalized.trades);
    summary.log();

    Ok(RunReport {
        pages: scraped.pages,
        rows_seen: scraped.rows_seen,
        skipped: scraped.skipped + normalized.errors.len(),
        dropped: normalized.dropped,
        summary,
    })
}
