//! Conversion of pipeline tables to polars DataFrames.

use ligand_model::Table;
use polars::prelude::{Column, DataFrame, NamedFrom};

use crate::error::Result;

/// All columns become nullable string columns, in table order.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<&str>> =
                table.rows.iter().map(|row| row[idx].as_deref()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}
