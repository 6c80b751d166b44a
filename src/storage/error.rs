use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid store document")]
    Json(#[from] serde_json::Error),
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
}
