use sensordash_parser::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("sheet schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
