//! Chemistry support for ligand merging: SD file decoding, valence
//! sanitization and canonical SMILES.

pub mod aromaticity;
pub mod canon;
pub mod element;
pub mod error;
pub mod molecule;
pub mod sanitize;
pub mod sdf;
pub mod smiles;

pub use error::{ChemError, Result};
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use sanitize::sanitize;
pub use sdf::{SdfRecord, parse_record, read_sdf_str, split_records};
pub use smiles::to_canonical_smiles;
