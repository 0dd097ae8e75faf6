// src/extract.rs

use crate::error::RowError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error};

static BODY_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody > tr").expect("body row selector should parse"));
static STOCK_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".stock-name").expect("stock name selector should parse"));
static STOCK_TICKER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".stock-ticker").expect("stock ticker selector should parse"));

// Cell positions within a body row.
const DATE_CELL: usize = 0;
const POLITICIAN_CELL: usize = 1;
const STOCK_CELL: usize = 2;
const TRANSACTION_CELL: usize = 3;
const AMOUNT_CELL: usize = 4;

/// The six untyped fields of one table row, as they appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based position among all body rows read so far, across pages.
    pub row: usize,
    pub date: String,
    pub politician: String,
    pub stock_name: String,
    pub stock_ticker: String,
    pub transaction: String,
    /// Either a single figure or a range such as `$1,001 - $15,000`.
    pub amount: String,
}

/// Pulls `RawRecord`s out of one or more documents.
///
/// Row numbers run on across documents, so a row error points at the
/// same row no matter which page it came from.
#[derive(Debug, Default)]
pub struct RowExtractor {
    rows_seen: usize,
    skipped: Vec<RowError>,
}

impl RowExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract every body row of every `tbody` in `html`, in document order.
    /// Rows that cannot be read are logged, remembered in `skipped` and left out.
    pub fn extract(&mut self, html: &str) -> Vec<RawRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for row in document.select(&BODY_ROWS) {
            let cells: Vec<ElementRef> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "td")
                .collect();
            if cells.is_empty() {
                // header-style row inside tbody
                continue;
            }
            self.rows_seen += 1;

            match read_row(self.rows_seen, &cells) {
                Ok(record) => records.push(record),
                Err(err) => {
                    error!("skipping row: {}", err);
                    self.skipped.push(err);
                }
            }
        }

        debug!(rows = records.len(), skipped = self.skipped.len(), "extracted page");
        records
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn skipped(&self) -> &[RowError] {
        &self.skipped
    }
}

/// Extract all rows of a single document.
pub fn extract_rows(html: &str) -> Vec<RawRecord> {
    RowExtractor::new().extract(html)
}

/// Extract and concatenate the rows of several documents, keeping page order.
pub fn extract_pages<I, S>(pages: I) -> Vec<RawRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = RowExtractor::new();
    pages
        .into_iter()
        .flat_map(|html| extractor.extract(html.as_ref()))
        .collect()
}

fn read_row(row: usize, cells: &[ElementRef]) -> Result<RawRecord, RowError> {
    let cell = |idx: usize, field: &'static str| {
        cells
            .get(idx)
            .copied()
            .ok_or(RowError::MissingField { row, field })
    };
    let stock = cell(STOCK_CELL, "stock cell")?;
    let stock_name = stock
        .select(&STOCK_NAME)
        .next()
        .ok_or(RowError::MissingField { row, field: "stock name" })?;
    let stock_ticker = stock
        .select(&STOCK_TICKER)
        .next()
        .ok_or(RowError::MissingField { row, field: "stock ticker" })?;

    Ok(RawRecord {
        row,
        date: element_text(cell(DATE_CELL, "date cell")?),
        politician: element_text(cell(POLITICIAN_CELL, "politician cell")?),
        stock_name: element_text(stock_name),
        stock_ticker: element_text(stock_ticker),
        transaction: element_text(cell(TRANSACTION_CELL, "transaction cell")?),
        amount: element_text(cell(AMOUNT_CELL, "amount cell")?),
    })
}

/// All descendant text, whitespace runs collapsed to one space.
fn element_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
