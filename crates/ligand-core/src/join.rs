//! The two joins between ligands and pharmacology.
//!
//! Both start from the same relation (ligand row, join key, pharmacology
//! record) but produce different cardinalities: the full table keeps exactly
//! one row per ligand, the measurement table one row per matching
//! pharmacology observation.

use std::collections::HashMap;

use ligand_model::{
    AggregatedPharmacology, Cell, JoinKey, MeasurementRow, PharmacologySheet, PipelineOptions,
    PropertyTable, Result, Table,
};
use tracing::debug;

pub const ID_COLUMN: &str = "ID";
pub const SOURCE_FILE_COLUMN: &str = "SourceFile";

/// Left join of every ligand row to its aggregated pharmacology.
///
/// The result has exactly one row per ligand, in ligand order. Ligands
/// without a match (or without a join key) get nulls in every pharmacology
/// column. Columns are `ID`, `SourceFile`, SMILES, the property universe, the
/// join key, then the pharmacology columns. A property named like one of the
/// fixed columns overwrites it; a pharmacology column named like any ligand
/// column gets the merge suffix.
pub fn join_full(
    table: &PropertyTable,
    aggregated: Option<&AggregatedPharmacology>,
    options: &PipelineOptions,
) -> Result<Table> {
    let mut columns = vec![
        ID_COLUMN.to_string(),
        SOURCE_FILE_COLUMN.to_string(),
        options.smiles_column.clone(),
    ];
    let property_slots: Vec<usize> = table
        .universe
        .iter()
        .map(|name| slot_for(&mut columns, name))
        .collect();
    let key_slot = slot_for(&mut columns, &options.join_key_column);

    let ligand_width = columns.len();
    let pharmacology_width = aggregated.map_or(0, |agg| agg.columns.len());
    if let Some(agg) = aggregated {
        for name in &agg.columns {
            let unique = unique_name(&columns, name, &options.merge_suffix);
            columns.push(unique);
        }
    }
    let index: HashMap<&JoinKey, usize> = aggregated
        .map(|agg| {
            agg.rows
                .iter()
                .enumerate()
                .map(|(idx, row)| (&row.key, idx))
                .collect()
        })
        .unwrap_or_default();

    let mut full = Table::new(columns)?;
    let mut matched = 0usize;
    for row in &table.rows {
        let mut cells: Vec<Cell> = vec![None; ligand_width];
        cells[0] = Some(row.id.to_string());
        cells[1] = Some(row.source_file.clone());
        cells[2].clone_from(&row.smiles);
        for (slot, value) in property_slots.iter().zip(&row.values) {
            cells[*slot].clone_from(value);
        }
        cells[key_slot] = row.join_key.as_ref().map(|key| key.as_str().to_string());

        let found = row
            .join_key
            .as_ref()
            .and_then(|key| index.get(key))
            .zip(aggregated);
        match found {
            Some((idx, agg)) => {
                matched += 1;
                cells.extend(agg.rows[*idx].values.iter().cloned());
            }
            None => cells.resize(ligand_width + pharmacology_width, None),
        }
        full.push_row(cells)?;
    }
    debug!(
        rows = full.height(),
        columns = full.width(),
        matched,
        "built full merged table"
    );
    Ok(full)
}

/// Position of `name` in `columns`, appending it when new.
fn slot_for(columns: &mut Vec<String>, name: &str) -> usize {
    if let Some(idx) = columns.iter().position(|column| column == name) {
        return idx;
    }
    columns.push(name.to_string());
    columns.len() - 1
}

/// `name`, with `suffix` appended until it no longer collides.
fn unique_name(columns: &[String], name: &str, suffix: &str) -> String {
    let mut candidate = name.to_string();
    while columns.contains(&candidate) {
        candidate.push_str(suffix);
    }
    candidate
}

/// Observations of `target` joined back to ligand identity.
///
/// Sheet rows are filtered by a case-insensitive exact match on the
/// parameter column. `None` means the filter left nothing, so no table is
/// produced. Otherwise every ligand is paired with each filtered row sharing
/// its join key (ligand order, then sheet order) and rows with a null
/// parameter or value are dropped; the result may be empty.
pub fn join_measurements(
    table: &PropertyTable,
    sheet: &PharmacologySheet,
    target: &str,
    options: &PipelineOptions,
) -> Option<Vec<MeasurementRow>> {
    let parameter_idx = sheet.column_index(&options.parameter_column)?;
    let value_idx = sheet.column_index(&options.value_column)?;
    let target = target.to_lowercase();

    let mut by_key: HashMap<&JoinKey, Vec<(&str, Option<&str>)>> = HashMap::new();
    let mut filtered = 0usize;
    for record in &sheet.records {
        let Some(parameter) = record.values[parameter_idx].as_deref() else {
            continue;
        };
        if parameter.to_lowercase() != target {
            continue;
        }
        filtered += 1;
        by_key
            .entry(&record.join_key)
            .or_default()
            .push((parameter, record.values[value_idx].as_deref()));
    }
    if filtered == 0 {
        return None;
    }

    let mut rows = Vec::new();
    for row in &table.rows {
        let Some(matches) = row.join_key.as_ref().and_then(|key| by_key.get(key)) else {
            continue;
        };
        for (parameter, value) in matches {
            let Some(value) = value else {
                continue;
            };
            rows.push(MeasurementRow {
                smiles: row.smiles.clone(),
                display_name: table
                    .value(row, &options.display_name_property)
                    .map(str::to_string),
                identifier: table
                    .value(row, &options.identifier_property)
                    .map(str::to_string),
                parameter: (*parameter).to_string(),
                value: (*value).to_string(),
            });
        }
    }
    debug!(filtered, rows = rows.len(), "built measurement rows");
    Some(rows)
}

/// Measurement rows as a table with columns SMILES, display name,
/// identifier, parameter, value. Fails when options name the same column
/// twice.
pub fn measurement_table(rows: &[MeasurementRow], options: &PipelineOptions) -> Result<Table> {
    let mut table = Table::new(vec![
        options.smiles_column.clone(),
        options.display_name_property.clone(),
        options.identifier_property.clone(),
        options.parameter_column.clone(),
        options.value_column.clone(),
    ])?;
    for row in rows {
        table.push_row(vec![
            row.smiles.clone(),
            row.display_name.clone(),
            row.identifier.clone(),
            Some(row.parameter.clone()),
            Some(row.value.clone()),
        ])?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use ligand_model::{ModelError, PharmacologyRecord, RecordRow};

    fn ligand(id: u64, smiles: &str, cas: Option<&str>, name: Option<&str>) -> RecordRow {
        RecordRow {
            id,
            source_file: "lig.sdf".into(),
            smiles: Some(smiles.into()),
            values: vec![name.map(str::to_string), cas.map(str::to_string)],
            join_key: Some(JoinKey::normalize(cas)),
        }
    }

    fn ligands() -> PropertyTable {
        PropertyTable {
            universe: vec!["cas.index.name".into(), "cas.rn".into()],
            rows: vec![
                ligand(1, "C", Some("50-00-0"), Some("Formaldehyde")),
                ligand(2, "CCO", Some("64-17-5"), Some("Ethanol")),
                ligand(3, "O", Some("7732-18-5"), None),
            ],
        }
    }

    fn pharm(rows: &[(&str, Option<&str>, Option<&str>)]) -> PharmacologySheet {
        PharmacologySheet {
            columns: vec!["Ligand CAS RN".into(), "Parameter".into(), "Value".into()],
            identifier_index: 0,
            records: rows
                .iter()
                .map(|(cas, parameter, value)| PharmacologyRecord {
                    values: vec![
                        Some((*cas).to_string()),
                        parameter.map(str::to_string),
                        value.map(str::to_string),
                    ],
                    join_key: JoinKey::normalize(Some(cas)),
                })
                .collect(),
        }
    }

    #[test]
    fn full_join_keeps_one_row_per_ligand() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[
            ("50-00-0", Some("IC50"), Some("10")),
            ("50-00-0", Some("IC50"), Some("12")),
            ("99-99-9", Some("MIC"), Some("1")),
        ]);
        let aggregated = aggregate(&sheet, &options);
        let table = join_full(&ligands(), Some(&aggregated), &options).unwrap();
        assert_eq!(
            table.columns,
            vec![
                "ID",
                "SourceFile",
                "SMILES",
                "cas.index.name",
                "cas.rn",
                "cas_norm",
                "Parameter",
                "Value"
            ]
        );
        assert_eq!(table.height(), 3);
        assert_eq!(
            table.column("Value").unwrap(),
            vec![Some("10 | 12"), None, None]
        );
        assert_eq!(
            table.column("cas_norm").unwrap(),
            vec![Some("50-00-0"), Some("64-17-5"), Some("7732-18-5")]
        );
    }

    #[test]
    fn full_join_without_pharmacology_is_ligands_only() {
        let table = join_full(&ligands(), None, &PipelineOptions::default()).unwrap();
        assert_eq!(table.width(), 6);
        assert_eq!(table.column("ID").unwrap(), vec![Some("1"), Some("2"), Some("3")]);
    }

    #[test]
    fn colliding_pharmacology_columns_get_suffix() {
        let options = PipelineOptions::default();
        let mut sheet = pharm(&[("50-00-0", Some("IC50"), Some("1"))]);
        sheet.columns[1] = "SMILES".into();
        sheet.columns[2] = "SMILES_pharm".into();
        let aggregated = aggregate(&sheet, &options);
        let table = join_full(&ligands(), Some(&aggregated), &options).unwrap();
        assert_eq!(table.columns[6..], ["SMILES_pharm", "SMILES_pharm_pharm"]);
    }

    #[test]
    fn property_named_like_fixed_column_overwrites_it() {
        let mut table = ligands();
        table.universe = vec!["SMILES".into(), "cas.rn".into()];
        let full = join_full(&table, None, &PipelineOptions::default()).unwrap();
        assert_eq!(full.columns, vec!["ID", "SourceFile", "SMILES", "cas.rn", "cas_norm"]);
        assert_eq!(full.rows[0][2].as_deref(), Some("Formaldehyde"));
    }

    #[test]
    fn measurement_filter_is_case_insensitive_and_exact() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[
            ("50-00-0", Some("ic50"), Some("10")),
            ("64-17-5", Some("IC50"), Some("3")),
            ("50-00-0", Some("IC50 (app)"), Some("9")),
            ("50-00-0", Some("IC50"), Some("11")),
        ]);
        let rows = join_measurements(&ligands(), &sheet, "IC50", &options).unwrap();
        let values: Vec<&str> = rows.iter().map(|row| row.value.as_str()).collect();
        assert_eq!(values, vec!["10", "11", "3"]);
        assert_eq!(rows[0].parameter, "ic50");
        assert_eq!(rows[0].display_name.as_deref(), Some("Formaldehyde"));
        assert_eq!(rows[2].identifier.as_deref(), Some("64-17-5"));
    }

    #[test]
    fn measurement_rows_without_value_are_dropped() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[
            ("50-00-0", Some("IC50"), None),
            ("64-17-5", Some("IC50"), Some("3")),
        ]);
        let rows = join_measurements(&ligands(), &sheet, "IC50", &options).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "3");
    }

    #[test]
    fn zero_filtered_rows_produce_nothing() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[("50-00-0", Some("IC50"), Some("10"))]);
        assert!(join_measurements(&ligands(), &sheet, "MIC", &options).is_none());
    }

    #[test]
    fn filtered_rows_without_ligand_give_empty_table() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[("11-11-1", Some("IC50"), Some("10"))]);
        let rows = join_measurements(&ligands(), &sheet, "IC50", &options).unwrap();
        assert!(rows.is_empty());
        let table = measurement_table(&rows, &options).unwrap();
        assert_eq!(
            table.columns,
            vec!["SMILES", "cas.index.name", "cas.rn", "Parameter", "Value"]
        );
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn full_join_rows_match_column_count() {
        let options = PipelineOptions::default();
        let sheet = pharm(&[("50-00-0", Some("IC50"), Some("10"))]);
        let aggregated = aggregate(&sheet, &options);
        let mut ligands = ligands();
        ligands.universe = vec!["cas.rn".into(), "cas_norm".into()];
        let table = join_full(&ligands, Some(&aggregated), &options).unwrap();
        let mut unique = table.columns.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), table.width());
        assert!(table.rows.iter().all(|row| row.len() == table.width()));
    }

    #[test]
    fn measurement_table_rejects_clashing_column_options() {
        let options = PipelineOptions::default().with_display_name_property("cas.rn");
        let err = measurement_table(&[], &options).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn(name) if name == "cas.rn"));
    }
}
