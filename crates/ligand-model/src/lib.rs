//! Data model shared by the ligand merge crates.

pub mod error;
pub mod join_key;
pub mod options;
pub mod record;
pub mod status;
pub mod table;

pub use error::{ModelError, Result};
pub use join_key::{JoinKey, MISSING_KEY};
pub use options::PipelineOptions;
pub use record::{LineNotationError, RecordDecodeError, RecordSource, StructureRecord};
pub use status::{Severity, StatusSignal};
pub use table::{
    AggregatedPharmacology, AggregatedRow, Cell, MeasurementRow, PharmacologyRecord,
    PharmacologySheet, PropertyTable, RawGrid, RecordRow, Table,
};
