//! Error types for sheetcalc core.

use sheetcalc_engine::AddressError;
use thiserror::Error;

/// Errors that can occur while editing or storing a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Clipboard is empty")]
    EmptyClipboard,
}

impl From<AddressError> for SheetError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::InvalidAddress(text) => SheetError::InvalidAddress(text),
            AddressError::InvalidRange(text) => SheetError::InvalidRange(text),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
