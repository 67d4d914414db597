//! In-memory records and sources for tests.

use ligand_model::{LineNotationError, RecordDecodeError, RecordSource, StructureRecord};

#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
    pub properties: Vec<(String, String)>,
    pub smiles: Option<String>,
}

impl MemoryRecord {
    pub fn new(smiles: &str) -> Self {
        Self {
            properties: Vec::new(),
            smiles: Some(smiles.to_string()),
        }
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.properties.push((name.to_string(), value.to_string()));
        self
    }

    pub fn without_smiles(mut self) -> Self {
        self.smiles = None;
        self
    }
}

impl StructureRecord for MemoryRecord {
    fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    fn canonical_smiles(&self) -> Result<String, LineNotationError> {
        self.smiles
            .clone()
            .ok_or_else(|| LineNotationError("no structure".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct MemorySource {
    pub name: String,
    pub entries: Vec<Result<MemoryRecord, RecordDecodeError>>,
}

impl MemorySource {
    pub fn new(name: &str, records: Vec<MemoryRecord>) -> Self {
        Self {
            name: name.to_string(),
            entries: records.into_iter().map(Ok).collect(),
        }
    }

    pub fn with_failure(mut self, reason: &str) -> Self {
        let index = self.entries.len() + 1;
        self.entries.push(Err(RecordDecodeError::new(index, reason)));
        self
    }
}

impl RecordSource for MemorySource {
    type Record = MemoryRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self) -> impl Iterator<Item = Result<MemoryRecord, RecordDecodeError>> + '_ {
        self.entries.iter().cloned()
    }
}
