//! Hydrogen suppression, implicit hydrogen assignment, valence checks and
//! aromaticity perception.
//!
//! A structure that fails here is "unsanitizable" and is dropped by the
//! record collector.

use crate::aromaticity::perceive_aromaticity;
use crate::element::{self, CARBON, HYDROGEN};
use crate::error::{ChemError, Result};
use crate::molecule::{BondOrder, Molecule};

/// Sanitize a freshly decoded molecule.
pub fn sanitize(mol: Molecule) -> Result<Molecule> {
    let mut mol = fold_hydrogens(mol);
    for idx in 0..mol.atoms.len() {
        let (bond_sum, aromatic_bonds) = mol.bond_valence(idx);
        let atom = &mol.atoms[idx];
        let explicit = bond_sum + u32::from(atom.hydrogens);
        let radical = u32::from(atom.radical);
        let aromatic = aromatic_bonds > 0;
        let implicit = implicit_hydrogens(
            atom.atomic_number,
            atom.charge,
            explicit + radical,
            aromatic,
        )
        .ok_or(ChemError::Valence {
            atom: idx + 1,
            symbol: atom.symbol(),
            valence: explicit,
        })?;
        let atom = &mut mol.atoms[idx];
        atom.aromatic = aromatic;
        atom.hydrogens = atom.hydrogens.saturating_add(implicit);
    }
    perceive_aromaticity(&mut mol);
    Ok(mol)
}

/// Implicit hydrogens for an atom using `used` valence, `None` when the atom
/// exceeds every allowed valence.
fn implicit_hydrogens(atomic_number: u8, charge: i8, used: u32, aromatic: bool) -> Option<u8> {
    let Some(valences) = element::charged_valences(atomic_number, charge) else {
        return Some(0);
    };
    let max = valences.iter().copied().max().unwrap_or(0);
    if aromatic {
        // One extra electron pair is shared with the ring.
        if atomic_number == CARBON && used < max {
            let with_pi = used + 1;
            return Some(fill_to_valence(valences, with_pi));
        }
        return (used <= max).then_some(0);
    }
    if used > max {
        return None;
    }
    if element::is_organic(atomic_number) {
        Some(fill_to_valence(valences, used))
    } else {
        Some(0)
    }
}

fn fill_to_valence(valences: &[u32], used: u32) -> u8 {
    valences
        .iter()
        .copied()
        .find(|v| *v >= used)
        .map(|v| v - used)
        .and_then(|h| u8::try_from(h).ok())
        .unwrap_or(0)
}

/// Remove plain hydrogen atoms and count them on their heavy neighbour.
fn fold_hydrogens(mol: Molecule) -> Molecule {
    let adjacency = mol.adjacency();
    let removable: Vec<bool> = mol
        .atoms
        .iter()
        .enumerate()
        .map(|(idx, atom)| {
            if atom.atomic_number != HYDROGEN
                || atom.isotope.is_some()
                || atom.charge != 0
                || atom.radical != 0
                || adjacency[idx].len() != 1
            {
                return false;
            }
            let (nbr, bond) = adjacency[idx][0];
            mol.bonds[bond].order == BondOrder::Single
                && mol.atoms[nbr].atomic_number != HYDROGEN
        })
        .collect();
    if !removable.iter().any(|flag| *flag) {
        return mol;
    }

    let Molecule { mut atoms, bonds } = mol;
    for (idx, remove) in removable.iter().enumerate() {
        if *remove {
            let parent = adjacency[idx][0].0;
            atoms[parent].hydrogens = atoms[parent].hydrogens.saturating_add(1);
        }
    }
    let mut new_index = vec![usize::MAX; atoms.len()];
    let mut kept = Vec::with_capacity(atoms.len());
    for (idx, atom) in atoms.into_iter().enumerate() {
        if !removable[idx] {
            new_index[idx] = kept.len();
            kept.push(atom);
        }
    }
    let bonds = bonds
        .into_iter()
        .filter(|bond| !removable[bond.i] && !removable[bond.j])
        .map(|mut bond| {
            bond.i = new_index[bond.i];
            bond.j = new_index[bond.j];
            bond
        })
        .collect();
    Molecule { atoms: kept, bonds }
}
