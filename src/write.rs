// src/write.rs

use crate::process::Trade;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{collections::HashSet, path::Path};
use tempfile::NamedTempFile;
use tracing::info;

pub const HEADER: [&str; 6] = [
    "Date",
    "Politician",
    "Stock Name",
    "Stock Ticker",
    "Transaction",
    "Amount",
];

/// Write `trades` as CSV to `path`, header included.
///
/// The rows go to a temp file next to `path` which is then renamed over it,
/// so an earlier output survives any failure here.
pub fn write_trades(path: &Path, trades: &[Trade]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;

    {
        let mut wtr = csv::Writer::from_writer(tmp.as_file());
        if trades.is_empty() {
            // serde only emits the header alongside the first row
            wtr.write_record(HEADER)?;
        }
        for trade in trades {
            wtr.serialize(trade)
                .with_context(|| format!("serializing trade {:?}", trade))?;
        }
        wtr.flush().context("flushing CSV writer")?;
    }

    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

/// Figures logged after a successful write. They never feed back into the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub politicians: usize,
    pub tickers: usize,
    pub amount_range: Option<(f64, f64)>,
}

impl Summary {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let date_range = trades
            .iter()
            .map(|t| t.date)
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            });
        let amount_range = trades
            .iter()
            .map(|t| t.amount)
            .fold(None, |acc: Option<(f64, f64)>, a| match acc {
                None => Some((a, a)),
                Some((lo, hi)) => Some((lo.min(a), hi.max(a))),
            });

        Self {
            rows: trades.len(),
            date_range,
            politicians: trades
                .iter()
                .map(|t| t.politician.as_str())
                .collect::<HashSet<_>>()
                .len(),
            tickers: trades
                .iter()
                .map(|t| t.stock_ticker.as_str())
                .collect::<HashSet<_>>()
                .len(),
            amount_range,
        }
    }

    pub fn log(&self) {
        info!("Scraped and processed {} trades", self.rows);
        match (self.date_range, self.amount_range) {
            (Some((first, last)), Some((low, high))) => {
                info!("Date range: {} to {}", first, last);
                info!("Number of unique politicians: {}", self.politicians);
                info!("Number of unique stocks: {}", self.tickers);
                info!("Amount range: ${} to ${}", low, high);
            }
            _ => info!("no trades to summarize"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn trade(date: (i32, u32, u32), who: &str, ticker: &str, amount: f64) -> Trade {
        Trade {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            politician: who.into(),
            stock_name: "Apple Inc".into(),
            stock_ticker: ticker.into(),
            transaction: "buy".into(),
            amount,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_trades(
            &path,
            &[
                trade((2024, 1, 2), "nancy pelosi", "AAPL", 8000.5),
                trade((2024, 1, 3), "jane doe", "UNKNOWN", 500.0),
            ],
        )
        .unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(
            body,
            "Date,Politician,Stock Name,Stock Ticker,Transaction,Amount\n\
             2024-01-02,nancy pelosi,Apple Inc,AAPL,buy,8000.5\n\
             2024-01-03,jane doe,Apple Inc,UNKNOWN,buy,500.0\n"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_trades(&path, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Date,Politician,Stock Name,Stock Ticker,Transaction,Amount\n"
        );
    }

    #[test]
    fn replaces_previous_output_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale").unwrap();
        write_trades(&path, &[trade((2024, 1, 2), "a", "T", 1.0)]).unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with("Date,"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(write_trades(&path, &[]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn summary_figures() {
        let trades = [
            trade((2024, 3, 1), "a", "AAPL", 500.0),
            trade((2024, 1, 2), "b", "AAPL", 8000.5),
            trade((2024, 2, 9), "a", "UNKNOWN", 100.0),
        ];
        let s = Summary::from_trades(&trades);
        assert_eq!(s.rows, 3);
        assert_eq!(
            s.date_range,
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
            ))
        );
        assert_eq!(s.politicians, 2);
        assert_eq!(s.tickers, 2);
        assert_eq!(s.amount_range, Some((100.0, 8000.5)));
    }

    #[test]
    fn summary_of_nothing() {
        let s = Summary::from_trades(&[]);
        assert_eq!(s.rows, 0);
        assert_eq!(s.date_range, None);
        assert_eq!(s.amount_range, None);
    }
}
