use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("required column '{column}' is missing from the header row")]
    MissingColumn { column: &'static str },

    #[error("sheet ends before the header row (expected at row index {row})")]
    HeaderNotFound { row: usize },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("failed to assemble readings frame: {source}")]
    Frame {
        #[from]
        source: PolarsError,
    },
}
