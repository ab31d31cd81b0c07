use std::{error::Error as StdError, io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Signal handling error")]
    SignalHandling {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[cfg(windows)]
    #[error(transparent)]
    Ctrlc(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
