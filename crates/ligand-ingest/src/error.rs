//! Error types for ligand and pharmacology file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a known sheet format.
    #[error("unsupported sheet format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Sheet Parsing Errors ===
    /// Failed to parse a delimited text sheet.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open or decode a workbook.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Workbook contains no worksheet.
    #[error("workbook has no worksheet: {path}")]
    NoWorksheet { path: PathBuf },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
