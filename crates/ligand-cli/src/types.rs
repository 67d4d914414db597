use std::path::PathBuf;

use ligand_core::PipelineReport;
use ligand_output::ExportedFile;

#[derive(Debug)]
pub struct MergeResult {
    pub prefix: String,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub exported: Vec<ExportedFile>,
    pub report: PipelineReport,
}
