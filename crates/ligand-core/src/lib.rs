//! Core merge logic: collect structure records, flatten them, reshape and
//! aggregate pharmacology, and build the full and measurement tables.

pub mod aggregate;
pub mod collect;
pub mod identity;
pub mod join;
pub mod pharmacology;
pub mod pipeline;
pub mod property_table;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregate::{VALUE_SEPARATOR, aggregate};
pub use collect::{CollectedRecord, Collection, collect_records};
pub use identity::normalize;
pub use join::{join_full, join_measurements, measurement_table};
pub use pharmacology::{
    find_header_row, missing_measurement_columns, parameter_options, reshape_sheet,
    select_parameter,
};
pub use pipeline::{
    PharmacologyInput, PipelineInput, PipelineReport, UnreadableSource, list_parameters, run,
};
pub use property_table::{build_property_table, has_identifier, property_universe};
