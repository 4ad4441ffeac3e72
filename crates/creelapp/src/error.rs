use crate::model::RecordId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreelError {
    #[error("Invalid time '{0}': use HH:MM (e.g. 06:30)")]
    InvalidTimeFormat(String),

    #[error(
        "Cannot write {}: the file is locked or read-only (is it open in another program?)",
        .0.display()
    )]
    StoreLocked(PathBuf),

    #[error("Catch not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Position {position} is out of range ({len} catches logged)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Unsupported photo type: {0} (expected .jpg, .jpeg or .png)")]
    UnsupportedPhoto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table error: {0}")]
    Table(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CreelError>;
