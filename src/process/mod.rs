// src/process/mod.rs
pub mod amount;
pub mod date_parser;
pub mod fuzzy;
pub mod names;

pub use amount::parse_amount;
pub use date_parser::parse_trade_date;
pub use fuzzy::{fuzzy_match, reconcile_names, similarity_ratio};
pub use names::clean_name;

use crate::error::RowError;
use crate::extract::RawRecord;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

pub const UNKNOWN_TICKER: &str = "UNKNOWN";

/// One normalized trade, as written to the output CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Politician")]
    pub politician: String,
    #[serde(rename = "Stock Name")]
    pub stock_name: String,
    #[serde(rename = "Stock Ticker")]
    pub stock_ticker: String,
    #[serde(rename = "Transaction")]
    pub transaction: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

/// Result of normalizing a batch of raw records.
#[derive(Debug, Default)]
pub struct Normalized {
    pub trades: Vec<Trade>,
    /// Rows left out because a required field was missing or the date didn't parse.
    pub dropped: usize,
    /// Rows left out because a field failed to parse.
    pub errors: Vec<RowError>,
}

/// Normalize one record. `Ok(None)` means the row is dropped for a missing
/// date, politician, stock name or transaction; those checks come before the
/// amount, so a row that is dropped anyway never reports an amount error.
pub fn normalize_record(raw: &RawRecord) -> Result<Option<Trade>, RowError> {
    let Some(date) = parse_trade_date(&raw.date) else {
        return Ok(None);
    };
    let politician = clean_name(&raw.politician);
    let stock_name = raw.stock_name.trim();
    let transaction = raw.transaction.trim();
    if politician.is_empty() || stock_name.is_empty() || transaction.is_empty() {
        return Ok(None);
    }

    let amount = parse_amount(&raw.amount).map_err(|source| RowError::Amount {
        row: raw.row,
        source,
    })?;

    let ticker = raw.stock_ticker.trim();
    Ok(Some(Trade {
        date,
        politician,
        stock_name: stock_name.to_string(),
        stock_ticker: if ticker.is_empty() {
            UNKNOWN_TICKER.to_string()
        } else {
            ticker.to_string()
        },
        transaction: transaction.to_string(),
        amount,
    }))
}

/// Normalize every record. Parse failures skip only their own row.
pub fn normalize(records: &[RawRecord]) -> Normalized {
    let mut out = Normalized::default();
    for raw in records {
        match normalize_record(raw) {
            Ok(Some(trade)) => out.trades.push(trade),
            Ok(None) => out.dropped += 1,
            Err(err) => {
                error!("skipping row: {}", err);
                out.errors.push(err);
            }
        }
    }
    if out.dropped > 0 {
        info!("dropped {} rows with missing fields", out.dropped);
    }
    out
}

/// Normalize then reconcile politician spellings.
pub fn process_records(records: &[RawRecord], threshold: u8) -> Normalized {
    let mut normalized = normalize(records);
    let merged = reconcile_names(&mut normalized.trades, threshold);
    if merged > 0 {
        info!("reconciled {} politician name variants", merged);
    }
    normalized
}
