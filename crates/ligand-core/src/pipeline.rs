//! The merge pipeline driver.
//!
//! A run never fails: every problem becomes a [`StatusSignal`] and the run
//! continues on the safe path. Only [`StatusSignal::NoRecords`] stops it
//! before any table is built.

use ligand_model::{
    PharmacologySheet, PipelineOptions, PropertyTable, RawGrid, RecordSource, Severity,
    StatusSignal, Table,
};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::aggregate::aggregate;
use crate::collect::collect_records;
use crate::join::{join_full, join_measurements, measurement_table};
use crate::pharmacology::{
    missing_measurement_columns, parameter_options, reshape_sheet, select_parameter,
};
use crate::property_table::{build_property_table, has_identifier};

/// A source file that could not be opened at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableSource {
    pub name: String,
    pub reason: String,
}

/// The pharmacology side of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PharmacologyInput {
    #[default]
    NotSupplied,
    /// The sheet was loaded as a raw, headerless grid.
    Loaded(RawGrid),
    /// A sheet was supplied but could not be read.
    Unreadable { reason: String },
}

/// Everything a run consumes.
#[derive(Debug, Clone)]
pub struct PipelineInput<S> {
    pub sources: Vec<S>,
    pub unreadable_sources: Vec<UnreadableSource>,
    pub pharmacology: PharmacologyInput,
    /// Explicitly chosen measurement parameter.
    pub parameter: Option<String>,
}

impl<S> PipelineInput<S> {
    pub fn new(sources: Vec<S>) -> Self {
        Self {
            sources,
            unreadable_sources: Vec::new(),
            pharmacology: PharmacologyInput::NotSupplied,
            parameter: None,
        }
    }

    #[must_use]
    pub fn with_pharmacology(mut self, pharmacology: PharmacologyInput) -> Self {
        self.pharmacology = pharmacology;
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    #[must_use]
    pub fn with_unreadable_source(
        mut self,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.unreadable_sources.push(UnreadableSource {
            name: name.into(),
            reason: reason.into(),
        });
        self
    }

    /// Number of supplied source files, readable or not.
    pub fn source_count(&self) -> usize {
        self.sources.len() + self.unreadable_sources.len()
    }
}

/// Outcome of a run: status signals in emission order plus whatever tables
/// could be built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub signals: Vec<StatusSignal>,
    pub records: usize,
    pub dropped: usize,
    pub parameter_options: Vec<String>,
    pub selected_parameter: Option<String>,
    pub full_table: Option<Table>,
    pub measurement_table: Option<Table>,
}

impl PipelineReport {
    fn push(&mut self, signal: StatusSignal) {
        match signal.severity() {
            Severity::Success | Severity::Info => info!(code = signal.code(), "{signal}"),
            Severity::Warning | Severity::Error => warn!(code = signal.code(), "{signal}"),
        }
        self.signals.push(signal);
    }

    /// True when the run stopped before building any table.
    pub fn aborted(&self) -> bool {
        self.signals
            .iter()
            .any(|signal| matches!(signal, StatusSignal::NoRecords))
    }

    /// Highest severity among the emitted signals.
    pub fn worst_severity(&self) -> Severity {
        self.signals
            .iter()
            .map(StatusSignal::severity)
            .max()
            .unwrap_or(Severity::Success)
    }
}

/// Run the merge over `input`.
pub fn run<S: RecordSource>(
    input: &PipelineInput<S>,
    options: &PipelineOptions,
) -> PipelineReport {
    let run_span = info_span!("merge", sources = input.source_count());
    let _run_guard = run_span.enter();
    let mut report = PipelineReport::default();

    // =========================================================================
    // Stage 1: Collect structure records
    // =========================================================================
    for source in &input.unreadable_sources {
        report.push(StatusSignal::SourceUnreadable {
            source_name: source.name.clone(),
            reason: source.reason.clone(),
        });
    }
    let collection = info_span!("collect").in_scope(|| collect_records(&input.sources));
    report.records = collection.records.len();
    report.dropped = collection.dropped;
    if collection.dropped > 0 {
        report.push(StatusSignal::RecordsDropped {
            dropped: collection.dropped,
        });
    }
    if collection.is_empty() {
        report.push(StatusSignal::NoRecords);
        return report;
    }
    report.push(StatusSignal::RecordsParsed {
        records: collection.records.len(),
        sources: input.source_count(),
    });

    // =========================================================================
    // Stage 2: Flatten into the property table
    // =========================================================================
    let table = info_span!("flatten")
        .in_scope(|| build_property_table(&collection.records, options));
    if !has_identifier(&table, options) {
        report.push(StatusSignal::MissingIdentifierColumn {
            property: options.identifier_property.clone(),
        });
    }

    // =========================================================================
    // Stage 3: Pharmacology and the full merged table
    // =========================================================================
    let sheet = info_span!("pharmacology").in_scope(|| load_sheet(input, options, &mut report));
    let aggregated = sheet.as_ref().map(|sheet| aggregate(sheet, options));
    if let (Some(sheet), Some(aggregated)) = (&sheet, &aggregated) {
        report.push(StatusSignal::PharmacologyMerged {
            records: sheet.len(),
            keys: aggregated.rows.len(),
        });
    }
    match join_full(&table, aggregated.as_ref(), options) {
        Ok(full) => {
            report.push(StatusSignal::FullTableBuilt {
                rows: full.height(),
                columns: full.width(),
            });
            report.full_table = Some(full);
        }
        Err(error) => report.push(StatusSignal::TableRejected {
            table: "full merged".to_string(),
            reason: error.to_string(),
        }),
    }

    // =========================================================================
    // Stage 4: Measurement-focused table
    // =========================================================================
    if let Some(sheet) = &sheet {
        info_span!("measurement").in_scope(|| {
            build_measurements(&table, sheet, input.parameter.as_deref(), options, &mut report);
        });
    }
    report
}

fn load_sheet<S>(
    input: &PipelineInput<S>,
    options: &PipelineOptions,
    report: &mut PipelineReport,
) -> Option<PharmacologySheet> {
    match &input.pharmacology {
        PharmacologyInput::NotSupplied => {
            report.push(StatusSignal::NoPharmacologySupplied);
            None
        }
        PharmacologyInput::Unreadable { reason } => {
            report.push(StatusSignal::PharmacologyUnreadable {
                reason: reason.clone(),
            });
            None
        }
        PharmacologyInput::Loaded(grid) => {
            let sheet = reshape_sheet(grid, options);
            if sheet.is_none() {
                report.push(StatusSignal::HeaderNotFound {
                    label: options.sheet_identifier_label.clone(),
                });
            }
            sheet
        }
    }
}

fn build_measurements(
    table: &PropertyTable,
    sheet: &PharmacologySheet,
    explicit: Option<&str>,
    options: &PipelineOptions,
    report: &mut PipelineReport,
) {
    let missing = missing_measurement_columns(sheet, options);
    if !missing.is_empty() {
        report.push(StatusSignal::MeasurementColumnsMissing { missing });
        return;
    }
    report.parameter_options = parameter_options(sheet, options);
    let Some(target) = select_parameter(&report.parameter_options, explicit, options) else {
        report.push(StatusSignal::NoParameterSelected);
        return;
    };
    report.selected_parameter = Some(target.clone());
    match join_measurements(table, sheet, &target, options) {
        None => report.push(StatusSignal::ParameterNoMatches { parameter: target }),
        Some(rows) => match measurement_table(&rows, options) {
            Ok(measurement) => {
                report.push(StatusSignal::MeasurementTableCreated {
                    parameter: target,
                    rows: rows.len(),
                });
                report.measurement_table = Some(measurement);
            }
            Err(error) => report.push(StatusSignal::TableRejected {
                table: format!("'{target}'"),
                reason: error.to_string(),
            }),
        },
    }
}

/// Parameter options of a sheet without running the merge, for listing.
pub fn list_parameters(grid: &RawGrid, options: &PipelineOptions) -> Option<Vec<String>> {
    reshape_sheet(grid, options).map(|sheet| parameter_options(&sheet, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryRecord, MemorySource};

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn sources() -> Vec<MemorySource> {
        vec![MemorySource::new(
            "lig.sdf",
            vec![MemoryRecord::new("C").with("cas.rn", "50-00-0")],
        )]
    }

    #[test]
    fn no_records_aborts() {
        let source = MemorySource::new("empty.sdf", vec![]).with_failure("bad");
        let input = PipelineInput::new(vec![source]);
        let report = run(&input, &PipelineOptions::default());
        assert!(report.aborted());
        assert_eq!(
            report.signals,
            vec![
                StatusSignal::RecordsDropped { dropped: 1 },
                StatusSignal::NoRecords
            ]
        );
        assert!(report.full_table.is_none());
        assert_eq!(report.worst_severity(), Severity::Error);
    }

    #[test]
    fn unreadable_pharmacology_follows_no_sheet_path() {
        let input =
            PipelineInput::new(sources()).with_pharmacology(PharmacologyInput::Unreadable {
                reason: "corrupt".into(),
            });
        let report = run(&input, &PipelineOptions::default());
        assert!(report.signals.contains(&StatusSignal::PharmacologyUnreadable {
            reason: "corrupt".into()
        }));
        assert!(report.full_table.is_some());
        assert!(report.measurement_table.is_none());
    }

    #[test]
    fn missing_parameter_column_is_reported() {
        let grid = RawGrid::new(vec![
            vec![cell("Ligand CAS RN"), cell("Value")],
            vec![cell("50-00-0"), cell("1")],
        ]);
        let input =
            PipelineInput::new(sources()).with_pharmacology(PharmacologyInput::Loaded(grid));
        let report = run(&input, &PipelineOptions::default());
        assert!(report.signals.contains(&StatusSignal::MeasurementColumnsMissing {
            missing: vec!["Parameter".into()]
        }));
    }

    #[test]
    fn default_parameter_is_selected() {
        let grid = RawGrid::new(vec![
            vec![cell("Ligand CAS RN"), cell("Parameter"), cell("Value")],
            vec![cell("50-00-0"), cell("MIC"), cell("1")],
            vec![cell("50-00-0"), cell("IC50"), cell("2")],
        ]);
        let input =
            PipelineInput::new(sources()).with_pharmacology(PharmacologyInput::Loaded(grid));
        let report = run(&input, &PipelineOptions::default());
        assert_eq!(report.parameter_options, vec!["IC50", "MIC"]);
        assert_eq!(report.selected_parameter.as_deref(), Some("IC50"));
        let table = report.measurement_table.unwrap();
        assert_eq!(table.column("Value").unwrap(), vec![Some("2")]);
    }

    #[test]
    fn clashing_measurement_columns_reject_only_that_table() {
        let grid = RawGrid::new(vec![
            vec![cell("Ligand CAS RN"), cell("Parameter"), cell("Value")],
            vec![cell("50-00-0"), cell("IC50"), cell("2")],
        ]);
        let input =
            PipelineInput::new(sources()).with_pharmacology(PharmacologyInput::Loaded(grid));
        let options = PipelineOptions::default().with_display_name_property("cas.rn");
        let report = run(&input, &options);
        assert!(report.full_table.is_some());
        assert!(report.measurement_table.is_none());
        assert!(report.signals.contains(&StatusSignal::TableRejected {
            table: "'IC50'".into(),
            reason: "duplicate column 'cas.rn'".into(),
        }));
        assert!(
            !report
                .signals
                .iter()
                .any(|signal| matches!(signal, StatusSignal::MeasurementTableCreated { .. }))
        );
    }

    #[test]
    fn list_parameters_needs_header() {
        let grid = RawGrid::new(vec![vec![cell("nothing")]]);
        assert_eq!(list_parameters(&grid, &PipelineOptions::default()), None);
    }
}
