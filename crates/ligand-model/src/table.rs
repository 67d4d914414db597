//! Rectangular tables produced and consumed by the pipeline.
//!
//! Cells are `Option<String>`: `None` is an explicit null, never an omitted
//! column.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::join_key::JoinKey;

pub type Cell = Option<String>;

/// A flattened structure record.
///
/// `values` is aligned with [`PropertyTable::universe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    /// 1-based, contiguous across all sources in collection order.
    pub id: u64,
    pub source_file: String,
    pub smiles: Cell,
    pub values: Vec<Cell>,
    /// `None` when the identifier property never occurs in any record.
    pub join_key: Option<JoinKey>,
}

/// All flattened records sharing one sorted property universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    pub universe: Vec<String>,
    pub rows: Vec<RecordRow>,
}

impl PropertyTable {
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.universe.binary_search_by(|candidate| candidate.as_str().cmp(name)).ok()
    }

    /// Value of `name` on `row`, `None` for both null cells and unknown names.
    pub fn value<'a>(&self, row: &'a RecordRow, name: &str) -> Option<&'a str> {
        let idx = self.property_index(name)?;
        row.values.get(idx)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A headerless sheet as handed over by the spreadsheet decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    pub rows: Vec<Vec<Cell>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; rows may be ragged.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

/// One data row of the reshaped pharmacology sheet.
///
/// `values` is aligned with [`PharmacologySheet::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharmacologyRecord {
    pub values: Vec<Cell>,
    pub join_key: JoinKey,
}

/// The pharmacology sheet after header detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharmacologySheet {
    pub columns: Vec<String>,
    /// Index of the identifier column in `columns`.
    pub identifier_index: usize,
    pub records: Vec<PharmacologyRecord>,
}

impl PharmacologySheet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value<'a>(&self, record: &'a PharmacologyRecord, name: &str) -> Option<&'a str> {
        let idx = self.column_index(name)?;
        record.values.get(idx)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pharmacology values collapsed to one row per join key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub key: JoinKey,
    pub values: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedPharmacology {
    /// Sheet columns minus the identifier column.
    pub columns: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

/// One pharmacology observation of the selected parameter joined to its ligand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub smiles: Cell,
    pub display_name: Cell,
    pub identifier: Cell,
    pub parameter: String,
    pub value: String,
}

/// A named, rectangular output table ready for display or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table. Column names must be unique.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].contains(column) {
                return Err(ModelError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ModelError::ColumnNotFound(name.to_string()))
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rejects_ragged_rows() {
        let mut table = Table::new(vec!["A".into(), "B".into()]).unwrap();
        table.push_row(vec![Some("1".into()), None]).unwrap();
        let err = table.push_row(vec![None]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::RowWidth {
                expected: 2,
                found: 1
            }
        ));
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn table_rejects_duplicate_columns() {
        let err = Table::new(vec!["A".into(), "A".into()]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn(name) if name == "A"));
    }

    #[test]
    fn property_lookup_uses_sorted_universe() {
        let table = PropertyTable {
            universe: vec!["a".into(), "cas.rn".into(), "z".into()],
            rows: vec![RecordRow {
                id: 1,
                source_file: "x.sdf".into(),
                smiles: None,
                values: vec![None, Some("50-00-0".into()), Some("q".into())],
                join_key: None,
            }],
        };
        let row = &table.rows[0];
        assert_eq!(table.value(row, "cas.rn"), Some("50-00-0"));
        assert_eq!(table.value(row, "a"), None);
        assert_eq!(table.value(row, "missing"), None);
    }

    #[test]
    fn raw_grid_tolerates_ragged_rows() {
        let grid = RawGrid::new(vec![vec![Some("a".into())], vec![None, Some("b".into())]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(1, 1), Some("b"));
        assert_eq!(grid.cell(0, 1), None);
    }
}
