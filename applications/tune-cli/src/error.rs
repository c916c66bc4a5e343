/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] tune_catalog::CatalogError),

    #[error(transparent)]
    Tune(#[from] tune_core::TuneError),

    #[error("Nothing found for \"{0}\"")]
    NoResults(String),
}
