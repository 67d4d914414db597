//! Collapsing pharmacology rows to one row per join key.

use std::collections::HashMap;

use ligand_model::{
    AggregatedPharmacology, AggregatedRow, Cell, JoinKey, PharmacologySheet, PipelineOptions,
};

/// Separator between distinct values of one column within a group.
pub const VALUE_SEPARATOR: &str = " | ";

/// Group sheet records by join key.
///
/// Groups appear in order of first occurrence; the missing-identifier key is
/// a group like any other. Each column holds its distinct non-null values
/// in first-seen order joined by [`VALUE_SEPARATOR`], or null when the group
/// has none. The identifier column and any column named like the join key
/// are excluded.
pub fn aggregate(sheet: &PharmacologySheet, options: &PipelineOptions) -> AggregatedPharmacology {
    let kept: Vec<usize> = (0..sheet.columns.len())
        .filter(|idx| {
            *idx != sheet.identifier_index && sheet.columns[*idx] != options.join_key_column
        })
        .collect();
    let columns = kept.iter().map(|idx| sheet.columns[*idx].clone()).collect();

    let mut order: Vec<JoinKey> = Vec::new();
    let mut groups: HashMap<JoinKey, Vec<Vec<&str>>> = HashMap::new();
    for record in &sheet.records {
        let distinct = groups.entry(record.join_key.clone()).or_insert_with(|| {
            order.push(record.join_key.clone());
            vec![Vec::new(); kept.len()]
        });
        for (slot, idx) in kept.iter().enumerate() {
            if let Some(value) = record.values[*idx].as_deref()
                && !distinct[slot].contains(&value)
            {
                distinct[slot].push(value);
            }
        }
    }

    let rows = order
        .into_iter()
        .map(|key| {
            let values = groups
                .get(&key)
                .map(|distinct| distinct.iter().map(|seen| join_distinct(seen)).collect())
                .unwrap_or_default();
            AggregatedRow { key, values }
        })
        .collect();
    AggregatedPharmacology { columns, rows }
}

/// Join distinct values, or null when there are none.
pub fn join_distinct(values: &[&str]) -> Cell {
    if values.is_empty() {
        None
    } else {
        Some(values.join(VALUE_SEPARATOR))
    }
}
