//! Headerless pharmacology sheet loading.
//!
//! The sheet is returned exactly as a grid of cells; header detection
//! happens later, against the configured identifier label.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use ligand_model::{Cell, RawGrid};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Supported sheet file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Tsv,
    /// Any workbook calamine can open (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" | "txt" => Some(Self::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Read the first worksheet (or the whole delimited file) as a raw grid.
pub fn read_sheet(path: &Path) -> Result<RawGrid> {
    let format = SheetFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let grid = match format {
        SheetFormat::Csv => read_delimited(path, b',')?,
        SheetFormat::Tsv => read_delimited(path, b'\t')?,
        SheetFormat::Workbook => read_workbook(path)?,
    };
    debug!(
        path = %path.display(),
        rows = grid.height(),
        columns = grid.width(),
        "loaded pharmacology sheet"
    );
    Ok(grid)
}

fn normalize_cell(raw: &str) -> Cell {
    let value = raw.trim_matches('\u{feff}');
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<RawGrid> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_error)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(RawGrid::new(rows))
}

fn read_workbook(path: &Path) -> Result<RawGrid> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(data_cell).collect())
        .collect();
    Ok(RawGrid::new(rows))
}

fn data_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => None,
        Data::String(value) => normalize_cell(value),
        Data::Float(value) => Some(format_numeric(*value)),
        Data::Int(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        other => normalize_cell(&other.to_string()),
    }
}

/// Whole numbers print without a fractional part.
fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
