//! CLI library components for the ligand merger.

pub mod load;
pub mod logging;
