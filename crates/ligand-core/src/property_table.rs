//! Flattening sparse structure records into one rectangular table.
//!
//! Two passes: the sorted property universe is computed over every record
//! first, then each record is emitted against it.

use std::collections::BTreeSet;

use ligand_model::{PipelineOptions, PropertyTable, RecordRow, StructureRecord};
use tracing::{debug, trace};

use crate::collect::CollectedRecord;
use crate::identity::normalize;

/// Sorted union of property names over all records.
pub fn property_universe<R: StructureRecord>(collected: &[CollectedRecord<R>]) -> Vec<String> {
    let names: BTreeSet<&str> = collected
        .iter()
        .flat_map(|entry| entry.record.property_names())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Flatten collected records. Join keys are `None` on every row when the
/// identifier property occurs nowhere in the universe.
pub fn build_property_table<R: StructureRecord>(
    collected: &[CollectedRecord<R>],
    options: &PipelineOptions,
) -> PropertyTable {
    let universe = property_universe(collected);
    let identifier_known = universe
        .binary_search_by(|candidate| candidate.as_str().cmp(options.identifier_property.as_str()))
        .is_ok();

    let mut rows = Vec::with_capacity(collected.len());
    for (idx, entry) in collected.iter().enumerate() {
        let record = &entry.record;
        let smiles = match record.canonical_smiles() {
            Ok(smiles) => Some(smiles),
            Err(err) => {
                debug!(row = idx + 1, error = %err, "canonical SMILES unavailable");
                None
            }
        };
        let values = universe
            .iter()
            .map(|name| record.property(name).map(str::to_string))
            .collect();
        let join_key = identifier_known
            .then(|| normalize(record.property(&options.identifier_property)));
        if let Some(key) = &join_key {
            trace!(row = idx + 1, key = %key, "normalized identifier");
        }
        rows.push(RecordRow {
            id: idx as u64 + 1,
            source_file: entry.source_name.clone(),
            smiles,
            values,
            join_key,
        });
    }
    PropertyTable { universe, rows }
}

/// True when the identifier property occurs in at least one record.
pub fn has_identifier(table: &PropertyTable, options: &PipelineOptions) -> bool {
    table.property_index(&options.identifier_property).is_some()
}
