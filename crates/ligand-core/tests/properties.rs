use ligand_core::test_support::{MemoryRecord, MemorySource};
use ligand_core::{
    PharmacologyInput, PipelineInput, VALUE_SEPARATOR, aggregate, build_property_table,
    collect_records, reshape_sheet, run,
};
use ligand_model::{PipelineOptions, RawGrid};
use proptest::prelude::*;

const PROPERTY_NAMES: [&str; 4] = ["cas.rn", "cas.index.name", "mw", "note"];
const IDENTIFIERS: [&str; 3] = ["50-00-0", "64-17-5", "7732-18-5"];
const PARAMETERS: [&str; 3] = ["IC50", "ic50", "MIC"];

fn record_strategy() -> impl Strategy<Value = MemoryRecord> {
    (
        proptest::collection::vec((0..PROPERTY_NAMES.len(), 0..IDENTIFIERS.len()), 0..4),
        any::<bool>(),
    )
        .prop_map(|(properties, has_smiles)| {
            let mut record = MemoryRecord::new("C");
            for (name, value) in properties {
                if record.properties.iter().all(|(n, _)| n != PROPERTY_NAMES[name]) {
                    record = record.with(PROPERTY_NAMES[name], IDENTIFIERS[value]);
                }
            }
            if has_smiles {
                record
            } else {
                record.without_smiles()
            }
        })
}

fn sources_strategy() -> impl Strategy<Value = Vec<MemorySource>> {
    proptest::collection::vec(proptest::collection::vec(record_strategy(), 0..5), 1..3).prop_map(
        |groups| {
            groups
                .into_iter()
                .enumerate()
                .map(|(idx, records)| MemorySource::new(&format!("s{idx}.sdf"), records))
                .collect()
        },
    )
}

fn sheet_strategy() -> impl Strategy<Value = RawGrid> {
    proptest::collection::vec(
        (
            proptest::option::of(0..IDENTIFIERS.len()),
            proptest::option::of(0..PARAMETERS.len()),
            proptest::option::of(0..4u8),
        ),
        0..8,
    )
    .prop_map(|rows| {
        let mut grid = vec![vec![
            Some("Ligand CAS RN".to_string()),
            Some("Parameter".to_string()),
            Some("Value".to_string()),
        ]];
        for (cas, parameter, value) in rows {
            grid.push(vec![
                cas.map(|idx| IDENTIFIERS[idx].to_string()),
                parameter.map(|idx| PARAMETERS[idx].to_string()),
                value.map(|v| v.to_string()),
            ]);
        }
        RawGrid::new(grid)
    })
}

proptest! {
    #[test]
    fn full_table_has_one_row_per_record(
        sources in sources_strategy(),
        grid in sheet_strategy(),
    ) {
        let expected: usize = sources.iter().map(|s| s.entries.len()).sum();
        let input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
        let report = run(&input, &PipelineOptions::default());
        if expected == 0 {
            prop_assert!(report.aborted());
        } else {
            let full = report.full_table.expect("full table");
            prop_assert_eq!(full.height(), expected);
            for row in &full.rows {
                prop_assert_eq!(row.len(), full.width());
            }
        }
    }

    #[test]
    fn every_row_spans_the_universe(sources in sources_strategy()) {
        let collection = collect_records(&sources);
        let table = build_property_table(&collection.records, &PipelineOptions::default());
        let mut sorted = table.universe.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &table.universe);
        for row in &table.rows {
            prop_assert_eq!(row.values.len(), table.universe.len());
        }
    }

    #[test]
    fn runs_are_deterministic(
        sources in sources_strategy(),
        grid in sheet_strategy(),
        parameter in proptest::option::of(0..PARAMETERS.len()),
    ) {
        let mut input = PipelineInput::new(sources).with_pharmacology(PharmacologyInput::Loaded(grid));
        if let Some(idx) = parameter {
            input = input.with_parameter(PARAMETERS[idx]);
        }
        let options = PipelineOptions::default();
        let first = run(&input, &options);
        let second = run(&input, &options);
        prop_assert_eq!(first.signals, second.signals);
        prop_assert_eq!(first.full_table, second.full_table);
        prop_assert_eq!(first.measurement_table, second.measurement_table);
    }

    #[test]
    fn aggregated_values_are_distinct(grid in sheet_strategy()) {
        let options = PipelineOptions::default();
        let sheet = reshape_sheet(&grid, &options).expect("header present");
        let aggregated = aggregate(&sheet, &options);
        for row in &aggregated.rows {
            for value in row.values.iter().flatten() {
                let parts: Vec<&str> = value.split(VALUE_SEPARATOR).collect();
                let mut unique = parts.clone();
                unique.sort_unstable();
                unique.dedup();
                prop_assert_eq!(parts.len(), unique.len());
            }
        }
    }

    #[test]
    fn measurement_rows_always_have_values(
        sources in sources_strategy(),
        grid in sheet_strategy(),
    ) {
        let input = PipelineInput::new(sources)
            .with_pharmacology(PharmacologyInput::Loaded(grid))
            .with_parameter("IC50");
        let report = run(&input, &PipelineOptions::default());
        if let Some(table) = report.measurement_table {
            for value in table.column("Value").expect("value column") {
                prop_assert!(value.is_some());
            }
            for parameter in table.column("Parameter").expect("parameter column") {
                prop_assert_eq!(parameter.map(str::to_lowercase), Some("ic50".to_string()));
            }
        }
    }
}
