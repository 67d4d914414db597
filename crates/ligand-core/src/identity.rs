//! Identifier normalization shared by both sides of every join.

use ligand_model::JoinKey;

/// Normalize a raw registry identifier into a join key.
///
/// Leading and trailing whitespace is removed; case and inner formatting are
/// kept. A missing identifier becomes the `"nan"` sentinel, which compares
/// equal to every other missing identifier. A ligand and a pharmacology row
/// that both lack an identifier therefore match each other; downstream code
/// keeps that behavior.
pub fn normalize(raw: Option<&str>) -> JoinKey {
    JoinKey::normalize(raw)
}
