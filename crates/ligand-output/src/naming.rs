//! Export file names.

/// File name of the full merged table.
pub fn full_table_file_name(prefix: &str) -> String {
    format!("{prefix}_Ligands_with_Pharmacology_aggregated_by_CAS.csv")
}

/// Characters that cannot appear in a file name component.
const UNSAFE_NAME_CHARS: [char; 3] = [' ', '/', '\\'];

/// File name of the measurement table for `parameter`. Spaces and path
/// separators become underscores.
pub fn measurement_file_name(prefix: &str, parameter: &str) -> String {
    format!("{prefix}_{parameter}_summary.csv").replace(UNSAFE_NAME_CHARS, "_")
}
