//! Canonical atom ranking.
//!
//! Atoms start from a local invariant, are refined by their neighbours'
//! ranks until the partition is stable, and remaining ties are broken one
//! class at a time. Symmetry-equivalent atoms may end up in either order
//! without changing the generated SMILES.

use std::cmp::Ordering;

use crate::molecule::Molecule;

/// Canonical rank of every atom, a permutation of `0..n`.
pub fn canonical_ranks(mol: &Molecule) -> Vec<usize> {
    let n = mol.atom_count();
    if n == 0 {
        return Vec::new();
    }
    let adjacency = mol.adjacency();
    let invariants: Vec<_> = mol
        .atoms
        .iter()
        .enumerate()
        .map(|(idx, atom)| {
            (
                adjacency[idx].len(),
                atom.atomic_number,
                atom.isotope.unwrap_or(0),
                atom.charge,
                atom.hydrogens,
                atom.aromatic,
                atom.radical,
            )
        })
        .collect();
    let mut ranks = dense_ranks(&invariants);
    refine(mol, &adjacency, &mut ranks);

    while count_classes(&ranks) < n {
        let tied = lowest_tied_rank(&ranks);
        let chosen = ranks
            .iter()
            .position(|r| *r == tied)
            .unwrap_or_default();
        let split: Vec<(usize, usize)> = ranks
            .iter()
            .enumerate()
            .map(|(idx, r)| {
                let bump = usize::from(*r == tied && idx != chosen);
                (*r, bump)
            })
            .collect();
        ranks = dense_ranks(&split);
        refine(mol, &adjacency, &mut ranks);
    }
    ranks
}

fn refine(mol: &Molecule, adjacency: &[Vec<(usize, usize)>], ranks: &mut Vec<usize>) {
    let mut classes = count_classes(ranks);
    loop {
        let keys: Vec<(usize, Vec<(usize, u8)>)> = adjacency
            .iter()
            .enumerate()
            .map(|(idx, neighbors)| {
                let mut around: Vec<(usize, u8)> = neighbors
                    .iter()
                    .map(|&(nbr, bond)| (ranks[nbr], mol.bonds[bond].order.code()))
                    .collect();
                around.sort_unstable();
                (ranks[idx], around)
            })
            .collect();
        let next = dense_ranks(&keys);
        let next_classes = count_classes(&next);
        *ranks = next;
        if next_classes == classes {
            break;
        }
        classes = next_classes;
    }
}

/// Dense ranks (0-based, ties share a rank) of `keys` in ascending order.
fn dense_ranks<K: Ord>(keys: &[K]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|a, b| keys[*a].cmp(&keys[*b]));
    let mut ranks = vec![0; keys.len()];
    let mut current = 0;
    for window in 0..order.len() {
        if window > 0 && keys[order[window - 1]].cmp(&keys[order[window]]) != Ordering::Equal {
            current += 1;
        }
        ranks[order[window]] = current;
    }
    ranks
}

fn count_classes(ranks: &[usize]) -> usize {
    ranks.iter().copied().max().map_or(0, |max| max + 1)
}

fn lowest_tied_rank(ranks: &[usize]) -> usize {
    let mut counts = vec![0usize; ranks.len()];
    for r in ranks {
        counts[*r] += 1;
    }
    counts.iter().position(|c| *c > 1).unwrap_or_default()
}
