//! SD files as record sources.

use std::path::Path;

use ligand_chem::{SdfRecord, read_sdf_str};
use ligand_model::{RecordDecodeError, RecordSource};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One SD file held in memory.
#[derive(Debug, Clone)]
pub struct SdfSource {
    name: String,
    text: String,
}

impl SdfSource {
    /// Wrap already-loaded SD text under a display name.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Load an SD file. Invalid UTF-8 is replaced rather than rejected.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        debug!(source = %name, bytes = bytes.len(), "loaded SD file");
        Ok(Self::from_text(name, String::from_utf8_lossy(&bytes)))
    }
}

impl RecordSource for SdfSource {
    type Record = SdfRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn records(
        &self,
    ) -> impl Iterator<Item = std::result::Result<SdfRecord, RecordDecodeError>> + '_ {
        read_sdf_str(&self.text).enumerate().map(|(idx, record)| {
            record.map_err(|err| RecordDecodeError::new(idx + 1, err.to_string()))
        })
    }
}
