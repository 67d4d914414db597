//! User-visible outcomes of a merge run.
//!
//! Every failure the pipeline can hit is reported as a [`StatusSignal`]; the
//! display layer never has to handle an error it was not told about.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusSignal {
    /// Structure records were collected.
    RecordsParsed { records: usize, sources: usize },
    /// Some records failed to decode and were dropped.
    RecordsDropped { dropped: usize },
    /// A source file could not be read at all.
    SourceUnreadable { source_name: String, reason: String },
    /// No source yielded a single record; nothing else ran.
    NoRecords,
    /// The identifier property never occurs; nothing can match.
    MissingIdentifierColumn { property: String },
    /// The full merged table was built.
    FullTableBuilt { rows: usize, columns: usize },
    /// No pharmacology sheet was supplied.
    NoPharmacologySupplied,
    /// The pharmacology sheet could not be read; treated as not supplied.
    PharmacologyUnreadable { reason: String },
    /// The sentinel header label was not found in the first sheet column.
    HeaderNotFound { label: String },
    /// Pharmacology rows were aggregated and merged.
    PharmacologyMerged { records: usize, keys: usize },
    /// The sheet lacks the Parameter and/or Value column.
    MeasurementColumnsMissing { missing: Vec<String> },
    /// No target parameter was chosen.
    NoParameterSelected,
    /// The chosen parameter matched no sheet row.
    ParameterNoMatches { parameter: String },
    /// The measurement-focused table was built.
    MeasurementTableCreated { parameter: String, rows: usize },
    /// A table could not be assembled from the configured columns.
    TableRejected { table: String, reason: String },
}

impl StatusSignal {
    pub fn severity(&self) -> Severity {
        match self {
            StatusSignal::RecordsParsed { .. }
            | StatusSignal::FullTableBuilt { .. }
            | StatusSignal::MeasurementTableCreated { .. } => Severity::Success,
            StatusSignal::RecordsDropped { .. }
            | StatusSignal::NoPharmacologySupplied
            | StatusSignal::PharmacologyMerged { .. } => Severity::Info,
            StatusSignal::SourceUnreadable { .. }
            | StatusSignal::MissingIdentifierColumn { .. }
            | StatusSignal::PharmacologyUnreadable { .. }
            | StatusSignal::MeasurementColumnsMissing { .. }
            | StatusSignal::NoParameterSelected
            | StatusSignal::ParameterNoMatches { .. }
            | StatusSignal::TableRejected { .. } => Severity::Warning,
            StatusSignal::NoRecords | StatusSignal::HeaderNotFound { .. } => Severity::Error,
        }
    }

    /// Short machine-friendly name of the signal.
    pub fn code(&self) -> &'static str {
        match self {
            StatusSignal::RecordsParsed { .. } => "records_parsed",
            StatusSignal::RecordsDropped { .. } => "records_dropped",
            StatusSignal::SourceUnreadable { .. } => "source_unreadable",
            StatusSignal::NoRecords => "no_records",
            StatusSignal::MissingIdentifierColumn { .. } => "missing_identifier_column",
            StatusSignal::FullTableBuilt { .. } => "full_table_built",
            StatusSignal::NoPharmacologySupplied => "no_pharmacology_supplied",
            StatusSignal::PharmacologyUnreadable { .. } => "pharmacology_unreadable",
            StatusSignal::HeaderNotFound { .. } => "header_not_found",
            StatusSignal::PharmacologyMerged { .. } => "pharmacology_merged",
            StatusSignal::MeasurementColumnsMissing { .. } => "measurement_columns_missing",
            StatusSignal::NoParameterSelected => "no_parameter_selected",
            StatusSignal::ParameterNoMatches { .. } => "parameter_no_matches",
            StatusSignal::MeasurementTableCreated { .. } => "measurement_table_created",
            StatusSignal::TableRejected { .. } => "table_rejected",
        }
    }
}

impl fmt::Display for StatusSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusSignal::RecordsParsed { records, sources } => {
                write!(f, "Parsed {records} molecules from {sources} SD file(s).")
            }
            StatusSignal::RecordsDropped { dropped } => {
                write!(f, "{dropped} record(s) could not be parsed and were skipped.")
            }
            StatusSignal::SourceUnreadable {
                source_name,
                reason,
            } => write!(f, "Could not read '{source_name}': {reason}"),
            StatusSignal::NoRecords => {
                f.write_str("No valid molecules were found in the uploaded SD file(s).")
            }
            StatusSignal::MissingIdentifierColumn { property } => write!(
                f,
                "Column '{property}' not found in SD properties; identifier-based merge will be empty."
            ),
            StatusSignal::FullTableBuilt { rows, columns } => {
                write!(f, "Full merged table: {rows} rows x {columns} columns.")
            }
            StatusSignal::NoPharmacologySupplied => f.write_str(
                "No pharmacology file supplied; showing only SD-derived data (no parameter-focused table).",
            ),
            StatusSignal::PharmacologyUnreadable { reason } => {
                write!(f, "Could not read pharmacology file: {reason}")
            }
            StatusSignal::HeaderNotFound { label } => write!(
                f,
                "No row starting with '{label}' found in the pharmacology sheet; pharmacology skipped."
            ),
            StatusSignal::PharmacologyMerged { records, keys } => write!(
                f,
                "Merged {records} pharmacology record(s) aggregated over {keys} identifier(s); \
                 multiple entries per identifier are combined as 'value1 | value2 | ...'."
            ),
            StatusSignal::MeasurementColumnsMissing { missing } => write!(
                f,
                "Column(s) {} not found in the pharmacology file; parameter-focused table not created.",
                missing
                    .iter()
                    .map(|name| format!("'{name}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            StatusSignal::NoParameterSelected => {
                f.write_str("No Parameter selected; parameter-focused table not created.")
            }
            StatusSignal::ParameterNoMatches { parameter } => write!(
                f,
                "No rows with Parameter == '{parameter}' found in the pharmacology file."
            ),
            StatusSignal::MeasurementTableCreated { parameter, rows } => write!(
                f,
                "'{parameter}' table created with {rows} rows (one row per pharmacology record matching a ligand)."
            ),
            StatusSignal::TableRejected { table, reason } => {
                write!(f, "Could not build the {table} table: {reason}")
            }
        }
    }
}
