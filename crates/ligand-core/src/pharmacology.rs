//! Pharmacology sheet reshaping and parameter discovery.
//!
//! Exported sheets carry a free-form preamble above the real header. The
//! header is the first row whose first cell equals the identifier label;
//! everything below it is data.

use std::collections::BTreeSet;

use ligand_model::{Cell, PharmacologyRecord, PharmacologySheet, PipelineOptions, RawGrid};
use tracing::{debug, warn};

use crate::identity::normalize;

/// Index of the header row, scanning the first column top-down.
pub fn find_header_row(grid: &RawGrid, label: &str) -> Option<usize> {
    (0..grid.height()).find(|row| grid.cell(*row, 0) == Some(label))
}

/// Turn a raw grid into a pharmacology sheet, or `None` when the header
/// label is not found.
pub fn reshape_sheet(grid: &RawGrid, options: &PipelineOptions) -> Option<PharmacologySheet> {
    let label = options.sheet_identifier_label.as_str();
    let Some(header_row) = find_header_row(grid, label) else {
        warn!(label, "pharmacology header row not found");
        return None;
    };
    let width = grid.width();
    let columns = header_names(&grid.rows[header_row], width);

    let records: Vec<PharmacologyRecord> = grid.rows[header_row + 1..]
        .iter()
        .map(|row| {
            let mut values: Vec<Cell> = row.iter().take(width).cloned().collect();
            values.resize(width, None);
            let join_key = normalize(values[0].as_deref());
            PharmacologyRecord { values, join_key }
        })
        .collect();
    debug!(
        header_row,
        columns = columns.len(),
        records = records.len(),
        "reshaped pharmacology sheet"
    );
    Some(PharmacologySheet {
        columns,
        identifier_index: 0,
        records,
    })
}

/// Column names from the header row. Blank cells become `Unnamed: <idx>`
/// and repeated names get `.1`, `.2`, ... appended.
fn header_names(header: &[Cell], width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);
    for idx in 0..width {
        let base = header
            .get(idx)
            .and_then(Option::as_deref)
            .map_or_else(|| format!("Unnamed: {idx}"), str::to_string);
        let mut name = base.clone();
        let mut counter = 1;
        while names.contains(&name) {
            name = format!("{base}.{counter}");
            counter += 1;
        }
        names.push(name);
    }
    names
}

/// Distinct non-null `Parameter` values, sorted.
pub fn parameter_options(sheet: &PharmacologySheet, options: &PipelineOptions) -> Vec<String> {
    let Some(idx) = sheet.column_index(&options.parameter_column) else {
        return Vec::new();
    };
    let values: BTreeSet<&str> = sheet
        .records
        .iter()
        .filter_map(|record| record.values[idx].as_deref())
        .collect();
    values.into_iter().map(str::to_string).collect()
}

/// Target parameter for the measurement table: an explicit choice wins,
/// then the preferred parameter when offered, then the first option.
pub fn select_parameter(
    available: &[String],
    explicit: Option<&str>,
    options: &PipelineOptions,
) -> Option<String> {
    if let Some(choice) = explicit {
        return Some(choice.to_string());
    }
    available
        .iter()
        .find(|candidate| **candidate == options.preferred_parameter)
        .or_else(|| available.first())
        .cloned()
}

/// Measurement columns the sheet lacks, in `Parameter`, `Value` order.
pub fn missing_measurement_columns(
    sheet: &PharmacologySheet,
    options: &PipelineOptions,
) -> Vec<String> {
    [&options.parameter_column, &options.value_column]
        .into_iter()
        .filter(|column| !sheet.has_column(column))
        .cloned()
        .collect()
}
