use ligand_core::test_support::{MemoryRecord, MemorySource};
use ligand_core::{PharmacologyInput, PipelineInput, run};
use ligand_ingest::{SdfSource, export_prefix};
use ligand_model::{PipelineOptions, RawGrid, RecordSource, StatusSignal};

fn cell(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn pharmacology(rows: &[[Option<&str>; 3]]) -> RawGrid {
    let mut grid = vec![
        vec![cell("CAS BioFinder export"), None, None],
        vec![cell("Ligand Pharmacology Data"), None, None],
        vec![None, None, None],
        vec![cell("Ligand CAS RN"), cell("Parameter"), cell("Value")],
    ];
    for row in rows {
        grid.push(row.iter().map(|value| value.map(str::to_string)).collect());
    }
    RawGrid::new(grid)
}

#[test]
fn test_scenario_a_multiple_sources_without_pharmacology() {
    let sources = vec![
        MemorySource::new(
            "source1.sdf",
            vec![
                MemoryRecord::new("C=O").with("cas.rn", "50-00-0"),
                MemoryRecord::new("CCO").with("cas.rn", "64-17-5"),
            ],
        ),
        MemorySource::new(
            "source2.sdf",
            vec![MemoryRecord::new("C=O").with("cas.rn", "50-00-0")],
        ),
    ];
    let names: Vec<&str> = sources.iter().map(RecordSource::name).collect();
    assert_eq!(export_prefix(&names), "source1_and_others");

    let report = run(&PipelineInput::new(sources), &PipelineOptions::default());
    let full = report.full_table.expect("full table");
    assert_eq!(full.height(), 3);
    assert_eq!(
        full.columns,
        vec!["ID", "SourceFile", "SMILES", "cas.rn", "cas_norm"]
    );
    assert_eq!(
        full.column("SourceFile").expect("column"),
        vec![Some("source1.sdf"), Some("source1.sdf"), Some("source2.sdf")]
    );
    assert_eq!(
        full.column("ID").expect("column"),
        vec![Some("1"), Some("2"), Some("3")]
    );
    assert!(report.signals.contains(&StatusSignal::NoPharmacologySupplied));
    assert!(report.measurement_table.is_none());
}

#[test]
fn test_scenario_b_duplicate_values_collapse() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![MemoryRecord::new("C=O").with("cas.rn", "50-00-0")],
    )];
    let grid = pharmacology(&[
        [Some("50-00-0"), Some("IC50"), Some("10")],
        [Some("50-00-0"), Some("IC50"), Some("10")],
    ]);
    let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
    let report = run(&input, &PipelineOptions::default());

    let full = report.full_table.expect("full table");
    assert_eq!(full.column("Parameter").expect("column"), vec![Some("IC50")]);
    assert_eq!(full.column("Value").expect("column"), vec![Some("10")]);
    assert!(report.signals.contains(&StatusSignal::PharmacologyMerged {
        records: 2,
        keys: 1
    }));

    // Both observations survive in the measurement table.
    let measurements = report.measurement_table.expect("measurement table");
    assert_eq!(measurements.height(), 2);
}

#[test]
fn test_scenario_c_unmatched_parameter_is_distinct_warning() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![MemoryRecord::new("C=O").with("cas.rn", "50-00-0")],
    )];
    let grid = pharmacology(&[[Some("50-00-0"), Some("IC50"), Some("10")]]);
    let input = PipelineInput::new(sources)
        .with_pharmacology(PharmacologyInput::Loaded(grid))
        .with_parameter("MIC");
    let report = run(&input, &PipelineOptions::default());

    assert!(report.measurement_table.is_none());
    assert!(report.signals.contains(&StatusSignal::ParameterNoMatches {
        parameter: "MIC".into()
    }));
    assert!(!report.signals.contains(&StatusSignal::NoParameterSelected));
}

#[test]
fn test_scenario_d_missing_identifiers_match_each_other() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![
            MemoryRecord::new("C=O").with("cas.rn", "50-00-0"),
            MemoryRecord::new("O"),
        ],
    )];
    let grid = pharmacology(&[[None, Some("IC50"), Some("99")]]);
    let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
    let report = run(&input, &PipelineOptions::default());

    let full = report.full_table.expect("full table");
    assert_eq!(
        full.column("cas_norm").expect("column"),
        vec![Some("50-00-0"), Some("nan")]
    );
    assert_eq!(full.column("Value").expect("column"), vec![None, Some("99")]);
}

#[test]
fn test_missing_header_skips_pharmacology() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![MemoryRecord::new("C").with("cas.rn", "74-82-8")],
    )];
    let grid = RawGrid::new(vec![vec![cell("CAS"), cell("Parameter")]]);
    let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
    let report = run(&input, &PipelineOptions::default());

    assert!(report.signals.contains(&StatusSignal::HeaderNotFound {
        label: "Ligand CAS RN".into()
    }));
    let full = report.full_table.expect("full table");
    assert_eq!(full.width(), 5);
    assert!(report.measurement_table.is_none());
}

#[test]
fn test_missing_identifier_property_warns() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![MemoryRecord::new("C").with("name", "methane")],
    )];
    let grid = pharmacology(&[[Some("74-82-8"), Some("IC50"), Some("1")]]);
    let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
    let report = run(&input, &PipelineOptions::default());

    assert!(report.signals.contains(&StatusSignal::MissingIdentifierColumn {
        property: "cas.rn".into()
    }));
    let full = report.full_table.expect("full table");
    assert_eq!(full.column("cas_norm").expect("column"), vec![None]);
    assert_eq!(full.column("Value").expect("column"), vec![None]);
    let measurements = report.measurement_table.expect("measurement table");
    assert_eq!(measurements.height(), 0);
}

#[test]
fn test_unreadable_source_counts_toward_sources() {
    let sources = vec![MemorySource::new(
        "ok.sdf",
        vec![MemoryRecord::new("C").with("cas.rn", "74-82-8")],
    )];
    let input = PipelineInput::new(sources).with_unreadable_source("gone.sdf", "not found");
    let report = run(&input, &PipelineOptions::default());
    assert_eq!(
        report.signals[0],
        StatusSignal::SourceUnreadable {
            source_name: "gone.sdf".into(),
            reason: "not found".into()
        }
    );
    assert!(report.signals.contains(&StatusSignal::RecordsParsed {
        records: 1,
        sources: 2
    }));
}

#[test]
fn test_end_to_end_with_sd_text() {
    let text = "\
formaldehyde


  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.2000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  2  0
M  END
>  <cas.index.name>
Formaldehyde

>  <cas.rn>
50-00-0

$$$$
pentavalent carbon


  6  5  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.0000    0.0000    0.0000 F   0  0  0  0  0  0  0  0  0  0  0  0
    2.0000    0.0000    0.0000 F   0  0  0  0  0  0  0  0  0  0  0  0
    3.0000    0.0000    0.0000 F   0  0  0  0  0  0  0  0  0  0  0  0
    4.0000    0.0000    0.0000 F   0  0  0  0  0  0  0  0  0  0  0  0
    5.0000    0.0000    0.0000 F   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  1  3  1  0
  1  4  1  0
  1  5  1  0
  1  6  1  0
M  END
>  <cas.rn>
0-00-0

$$$$
";
    let sources = vec![SdfSource::from_text("mixed.sdf", text)];
    let grid = pharmacology(&[
        [Some("50-00-0"), Some("IC50"), Some("4.2")],
        [Some("50-00-0"), Some("ic50"), Some("5.0")],
        [Some("0-00-0"), Some("IC50"), Some("1")],
    ]);
    let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
    let report = run(&input, &PipelineOptions::default());

    assert_eq!(report.records, 1);
    assert_eq!(report.dropped, 1);
    let measurements = report.measurement_table.expect("measurement table");
    assert_eq!(
        measurements.column("SMILES").expect("column"),
        vec![Some("C=O"), Some("C=O")]
    );
    assert_eq!(
        measurements.column("cas.index.name").expect("column"),
        vec![Some("Formaldehyde"), Some("Formaldehyde")]
    );
    assert_eq!(
        measurements.column("Value").expect("column"),
        vec![Some("4.2"), Some("5.0")]
    );
}

#[test]
fn test_report_serializes_signals_and_tables() {
    let sources = vec![MemorySource::new(
        "lig.sdf",
        vec![MemoryRecord::new("C").with("cas.rn", "74-82-8")],
    )];
    let report = run(&PipelineInput::new(sources), &PipelineOptions::default());
    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["records"], 1);
    assert_eq!(json["signals"][0]["kind"], "records_parsed");
    assert_eq!(json["signals"][1]["kind"], "no_pharmacology_supplied");
    assert_eq!(json["full_table"]["columns"][3], "cas.rn");
    assert!(json["measurement_table"].is_null());
}
