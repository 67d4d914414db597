//! Record collection across sources.

use ligand_model::RecordSource;
use tracing::{debug, warn};

/// A successfully decoded record tagged with the source it came from.
#[derive(Debug, Clone)]
pub struct CollectedRecord<R> {
    pub record: R,
    pub source_name: String,
}

/// Every surviving record in collection order, plus how many were dropped.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    pub records: Vec<CollectedRecord<R>>,
    pub dropped: usize,
}

impl<R> Collection<R> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read every source in order, keeping records that decode and counting the
/// ones that do not.
pub fn collect_records<S: RecordSource>(sources: &[S]) -> Collection<S::Record> {
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for source in sources {
        let before = records.len();
        for result in source.records() {
            match result {
                Ok(record) => records.push(CollectedRecord {
                    record,
                    source_name: source.name().to_string(),
                }),
                Err(err) => {
                    dropped += 1;
                    warn!(
                        source = %source.name(),
                        record = err.index,
                        reason = %err.reason,
                        "dropping undecodable record"
                    );
                }
            }
        }
        debug!(
            source = %source.name(),
            records = records.len() - before,
            "collected source"
        );
    }
    Collection { records, dropped }
}
