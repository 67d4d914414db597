//! Input loading for ligand merging.
//!
//! SD files become [`SdfSource`]s for the record collector; pharmacology
//! sheets become headerless [`RawGrid`](ligand_model::RawGrid)s.

pub mod error;
pub mod naming;
pub mod sheet;
pub mod source;

pub use error::{IngestError, Result};
pub use naming::export_prefix;
pub use sheet::{SheetFormat, read_sheet};
pub use source::SdfSource;
