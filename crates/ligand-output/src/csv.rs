//! CSV serialization of tables.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ligand_model::Table;
use polars::prelude::{CsvWriter, SerWriter};
use tracing::info;

use crate::error::{OutputError, Result};
use crate::frame::table_to_dataframe;
use crate::naming::{full_table_file_name, measurement_file_name};

/// Render a table as CSV text with a header row. Nulls are empty fields.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut df = table_to_dataframe(table)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write a table as CSV to `path`.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table)?;
    let file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut df)?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Which of the two derived tables a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Full,
    Measurement,
}

/// One file written by [`export_tables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// Tables of one run to be written under a shared prefix.
#[derive(Debug, Clone, Copy)]
pub struct ExportSet<'a> {
    pub prefix: &'a str,
    pub full: Option<&'a Table>,
    /// Selected parameter and its measurement table.
    pub measurement: Option<(&'a str, &'a Table)>,
}

/// Write every available table into `dir`, creating it when needed.
pub fn export_tables(set: ExportSet<'_>, dir: &Path) -> Result<Vec<ExportedFile>> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();
    if let Some(full) = set.full {
        let path = dir.join(full_table_file_name(set.prefix));
        write_csv(full, &path)?;
        info!(path = %path.display(), rows = full.height(), "wrote full merged table");
        written.push(ExportedFile {
            kind: ExportKind::Full,
            path,
            rows: full.height(),
        });
    }
    if let Some((parameter, table)) = set.measurement {
        let path = dir.join(measurement_file_name(set.prefix, parameter));
        write_csv(table, &path)?;
        info!(path = %path.display(), rows = table.height(), "wrote measurement table");
        written.push(ExportedFile {
            kind: ExportKind::Measurement,
            path,
            rows: table.height(),
        });
    }
    Ok(written)
}
