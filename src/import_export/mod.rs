use crate::task_validation::TaskValidationError;
use std::io;
use thiserror::Error;

pub mod file;

pub use file::{
    load_metadata_from_json, load_tasks_from_csv, load_tasks_from_json, parse_date, save_gantt_to_csv,
    save_gantt_to_json, save_metadata_to_json, save_tasks_to_csv, save_tasks_to_json,
};

#[derive(Debug, Error)]
pub enum ImportExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type ImportExportResult<T> = Result<T, ImportExportError>;
