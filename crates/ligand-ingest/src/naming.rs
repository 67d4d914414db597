//! Export file prefix derived from the uploaded SD file names.

use std::path::Path;

const MULTI_SOURCE_SUFFIX: &str = "_and_others";
const FALLBACK_PREFIX: &str = "ligands";

/// Prefix shared by every exported file of a run.
///
/// One source gives its file stem; several give the first stem followed by
/// `_and_others`. Spaces become underscores.
pub fn export_prefix<S: AsRef<str>>(source_names: &[S]) -> String {
    let Some(first) = source_names.first() else {
        return FALLBACK_PREFIX.to_string();
    };
    let stem = Path::new(first.as_ref()).file_stem().map_or_else(
        || first.as_ref().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    );
    let prefix = if source_names.len() == 1 {
        stem
    } else {
        format!("{stem}{MULTI_SOURCE_SUFFIX}")
    };
    prefix.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_source_uses_stem() {
        assert_eq!(export_prefix(&["kinase hits.sdf"]), "kinase_hits");
    }

    #[test]
    fn multiple_sources_mark_others() {
        assert_eq!(export_prefix(&["a.sdf", "b.sdf"]), "a_and_others");
    }

    #[test]
    fn no_sources_fall_back() {
        let empty: [&str; 0] = [];
        assert_eq!(export_prefix(&empty), "ligands");
    }
}
