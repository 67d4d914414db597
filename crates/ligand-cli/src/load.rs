//! Turning command-line paths into pipeline input.
//!
//! Nothing here fails: unreadable files are carried into the run so the
//! pipeline can report them alongside everything else.

use std::path::{Path, PathBuf};

use ligand_core::{PharmacologyInput, PipelineInput};
use ligand_ingest::{SdfSource, read_sheet};
use tracing::warn;

/// Display name of an input file: its file name, or the whole path when it
/// has none.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Display names of every SD input, in command-line order.
pub fn source_names(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| display_name(path)).collect()
}

/// Open every SD file and the optional pharmacology sheet.
pub fn load_input(
    sdf_paths: &[PathBuf],
    pharmacology: Option<&Path>,
) -> PipelineInput<SdfSource> {
    let mut sources = Vec::with_capacity(sdf_paths.len());
    let mut unreadable = Vec::new();
    for path in sdf_paths {
        match SdfSource::open(path) {
            Ok(source) => sources.push(source),
            Err(error) => {
                warn!(path = %path.display(), %error, "SD file unreadable");
                unreadable.push((display_name(path), error.to_string()));
            }
        }
    }
    let mut input =
        PipelineInput::new(sources).with_pharmacology(load_pharmacology(pharmacology));
    for (name, reason) in unreadable {
        input = input.with_unreadable_source(name, reason);
    }
    input
}

/// Read the pharmacology sheet, if one was given.
pub fn load_pharmacology(path: Option<&Path>) -> PharmacologyInput {
    let Some(path) = path else {
        return PharmacologyInput::NotSupplied;
    };
    match read_sheet(path) {
        Ok(grid) => PharmacologyInput::Loaded(grid),
        Err(error) => {
            warn!(path = %path.display(), %error, "pharmacology sheet unreadable");
            PharmacologyInput::Unreadable {
                reason: error.to_string(),
            }
        }
    }
}
