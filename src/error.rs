use thiserror::Error;

/// Why a single table row was left out of the output.
///
/// Row errors never abort a run: the pipeline logs them and carries on with
/// the remaining rows.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: {source}")]
    Amount {
        row: usize,
        #[source]
        source: AmountError,
    },
}

impl RowError {
    pub fn row(&self) -> usize {
        match self {
            RowError::MissingField { row, .. } | RowError::Amount { row, .. } => *row,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("unparseable amount {0:?}")]
    NotNumeric(String),
    #[error("malformed amount range {0:?}")]
    BadRange(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}
