//! Configuration options for a merge run.

use serde::{Deserialize, Serialize};

/// Column and label names the pipeline keys on.
///
/// The defaults match SD files exported from CAS BioFinder and the
/// accompanying "Ligand Pharmacology Data" workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// SD property holding the registry identifier of each ligand.
    pub identifier_property: String,
    /// SD property holding the human-readable ligand name.
    pub display_name_property: String,
    /// Sentinel label searched for in the first sheet column; its row is the header.
    pub sheet_identifier_label: String,
    /// Name of the synthetic join key column in the full merged table.
    pub join_key_column: String,
    /// Name of the canonical SMILES column.
    pub smiles_column: String,
    /// Sheet column holding the measurement type.
    pub parameter_column: String,
    /// Sheet column holding the measured value.
    pub value_column: String,
    /// Parameter selected automatically when present and nothing was chosen.
    pub preferred_parameter: String,
    /// Suffix for pharmacology columns whose name collides with a ligand column.
    pub merge_suffix: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            identifier_property: "cas.rn".to_string(),
            display_name_property: "cas.index.name".to_string(),
            sheet_identifier_label: "Ligand CAS RN".to_string(),
            join_key_column: "cas_norm".to_string(),
            smiles_column: "SMILES".to_string(),
            parameter_column: "Parameter".to_string(),
            value_column: "Value".to_string(),
            preferred_parameter: "IC50".to_string(),
            merge_suffix: "_pharm".to_string(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_identifier_property(mut self, name: impl Into<String>) -> Self {
        self.identifier_property = name.into();
        self
    }

    #[must_use]
    pub fn with_display_name_property(mut self, name: impl Into<String>) -> Self {
        self.display_name_property = name.into();
        self
    }

    #[must_use]
    pub fn with_sheet_identifier_label(mut self, label: impl Into<String>) -> Self {
        self.sheet_identifier_label = label.into();
        self
    }

    #[must_use]
    pub fn with_preferred_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.preferred_parameter = parameter.into();
        self
    }
}
