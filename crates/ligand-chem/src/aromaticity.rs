//! Aromaticity perception.
//!
//! Rings drawn with alternating single and double bonds are rewritten to
//! aromatic bonds, so every Kekulé pattern of one ring system reaches the
//! canonical ranking as the same graph. A ring system is aromatic when it
//! carries 4n+2 pi electrons; systems are single smallest rings and pairs of
//! rings fused through a shared bond.

use std::collections::{BTreeSet, VecDeque};

use crate::element;
use crate::molecule::{BondOrder, Molecule};

/// Largest ring considered.
const MAX_RING_SIZE: usize = 8;

#[derive(Debug, Clone)]
struct Ring {
    atoms: Vec<usize>,
    bonds: Vec<usize>,
}

/// Mark aromatic ring systems on a molecule whose hydrogens are already
/// assigned. Atoms and bonds decoded as aromatic stay aromatic.
pub fn perceive_aromaticity(mol: &mut Molecule) {
    let adjacency = mol.adjacency();
    let rings = smallest_rings(mol, &adjacency);
    if rings.is_empty() {
        return;
    }

    let mut aromatic = vec![false; mol.bonds.len()];
    for ring in &rings {
        if is_aromatic_system(mol, &adjacency, &ring.atoms) {
            mark(&mut aromatic, &ring.bonds);
        }
    }
    for (idx, first) in rings.iter().enumerate() {
        for second in &rings[idx + 1..] {
            if !first.bonds.iter().any(|bond| second.bonds.contains(bond)) {
                continue;
            }
            let fused: Vec<usize> = first
                .atoms
                .iter()
                .chain(&second.atoms)
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            if is_aromatic_system(mol, &adjacency, &fused) {
                mark(&mut aromatic, &first.bonds);
                mark(&mut aromatic, &second.bonds);
            }
        }
    }

    for (idx, flag) in aromatic.into_iter().enumerate() {
        if !flag {
            continue;
        }
        let bond = &mut mol.bonds[idx];
        bond.order = BondOrder::Aromatic;
        let (i, j) = (bond.i, bond.j);
        mol.atoms[i].aromatic = true;
        mol.atoms[j].aromatic = true;
    }
}

fn mark(flags: &mut [bool], bonds: &[usize]) {
    for bond in bonds {
        flags[*bond] = true;
    }
}

/// Shortest cycle through every bond, deduplicated.
fn smallest_rings(mol: &Molecule, adjacency: &[Vec<(usize, usize)>]) -> Vec<Ring> {
    let mut seen = BTreeSet::new();
    let mut rings = Vec::new();
    for (idx, bond) in mol.bonds.iter().enumerate() {
        let Some(ring) = shortest_cycle(adjacency, bond.i, bond.j, idx) else {
            continue;
        };
        let mut key = ring.bonds.clone();
        key.sort_unstable();
        if seen.insert(key) {
            rings.push(ring);
        }
    }
    rings
}

/// Breadth-first path from `start` to `goal` that avoids `closing`, closed
/// into a ring by that bond.
fn shortest_cycle(
    adjacency: &[Vec<(usize, usize)>],
    start: usize,
    goal: usize,
    closing: usize,
) -> Option<Ring> {
    let mut depth = vec![usize::MAX; adjacency.len()];
    let mut previous: Vec<Option<(usize, usize)>> = vec![None; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    depth[start] = 0;
    while let Some(atom) = queue.pop_front() {
        if atom == goal {
            break;
        }
        if depth[atom] + 2 > MAX_RING_SIZE {
            continue;
        }
        for &(nbr, bond) in &adjacency[atom] {
            if bond == closing || depth[nbr] != usize::MAX {
                continue;
            }
            depth[nbr] = depth[atom] + 1;
            previous[nbr] = Some((atom, bond));
            queue.push_back(nbr);
        }
    }

    if previous[goal].is_none() {
        return None;
    }
    let mut atoms = vec![goal];
    let mut bonds = vec![closing];
    let mut current = goal;
    while let Some((parent, bond)) = previous[current] {
        atoms.push(parent);
        bonds.push(bond);
        current = parent;
    }
    Some(Ring { atoms, bonds })
}

fn is_aromatic_system(
    mol: &Molecule,
    adjacency: &[Vec<(usize, usize)>],
    members: &[usize],
) -> bool {
    let electrons: Option<u32> = members
        .iter()
        .map(|atom| pi_electrons(mol, adjacency, *atom, members))
        .sum();
    matches!(electrons, Some(count) if count % 4 == 2)
}

/// Pi electrons an atom gives to the ring system `members`, `None` when the
/// atom cannot take part in an aromatic ring.
fn pi_electrons(
    mol: &Molecule,
    adjacency: &[Vec<(usize, usize)>],
    atom: usize,
    members: &[usize],
) -> Option<u32> {
    let current = &mol.atoms[atom];
    let z = current.atomic_number;
    if !element::has_aromatic_form(z) || current.radical != 0 {
        return None;
    }
    let connections = adjacency[atom].len() + usize::from(current.hydrogens);
    if connections > 3 {
        return None;
    }

    let mut in_ring_pi = false;
    let mut exocyclic_acceptor = false;
    for &(nbr, bond) in &adjacency[atom] {
        let inside = members.contains(&nbr);
        match mol.bonds[bond].order {
            BondOrder::Triple => return None,
            BondOrder::Double | BondOrder::Aromatic if inside => in_ring_pi = true,
            BondOrder::Double => {
                // Exocyclic C=O and C=N keep the ring; exocyclic C=C breaks it.
                if matches!(mol.atoms[nbr].atomic_number, 7 | 8 | 16) {
                    exocyclic_acceptor = true;
                } else {
                    return None;
                }
            }
            BondOrder::Single | BondOrder::Aromatic => {}
        }
    }
    if in_ring_pi {
        return Some(1);
    }
    if exocyclic_acceptor {
        return Some(0);
    }
    match (z, current.charge) {
        (7 | 15, 0) if connections == 3 => Some(2),
        (7, -1) | (6, -1) => Some(2),
        (8 | 16 | 34, 0) if connections == 2 => Some(2),
        (6, 1) | (5, 0) => Some(0),
        _ => None,
    }
}
