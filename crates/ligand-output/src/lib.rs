//! CSV export of the full merged and measurement tables.

pub mod csv;
pub mod error;
pub mod frame;
pub mod naming;

pub use csv::{ExportKind, ExportSet, ExportedFile, export_tables, to_csv_string, write_csv};
pub use error::{OutputError, Result};
pub use frame::table_to_dataframe;
pub use naming::{full_table_file_name, measurement_file_name};
