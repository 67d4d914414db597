//! Boundary contracts for structure-record decoders.
//!
//! The pipeline never parses structure files itself. A decoder hands it
//! [`RecordSource`]s, each yielding decoded [`StructureRecord`]s or per-record
//! decode failures.

use thiserror::Error;

/// A record that could not be decoded or sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index} could not be decoded: {reason}")]
pub struct RecordDecodeError {
    /// 1-based position of the record inside its source.
    pub index: usize,
    pub reason: String,
}

impl RecordDecodeError {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Canonical line notation could not be computed for one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line notation failed: {0}")]
pub struct LineNotationError(pub String);

/// One decoded chemical structure with its annotations.
pub trait StructureRecord {
    /// Names of every property carried by this record.
    fn property_names(&self) -> Vec<&str>;

    /// Value of a named property, if the record carries it.
    fn property(&self, name: &str) -> Option<&str>;

    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Canonical SMILES of the structure.
    fn canonical_smiles(&self) -> Result<String, LineNotationError>;
}

/// An ordered source of structure records, typically one uploaded file.
pub trait RecordSource {
    type Record: StructureRecord;

    /// Display name of the source (the file name).
    fn name(&self) -> &str;

    /// Records in file order. Failed records are reported, not skipped.
    fn records(&self) -> impl Iterator<Item = Result<Self::Record, RecordDecodeError>> + '_;
}
