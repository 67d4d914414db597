//! Canonical SMILES writer.

use std::collections::HashMap;

use crate::canon::canonical_ranks;
use crate::element::{self, CARBON, DUMMY};
use crate::error::{ChemError, Result};
use crate::molecule::{BondOrder, Molecule};

const MAX_RING_DIGIT: usize = 99;

/// Write the canonical SMILES of a sanitized molecule.
///
/// Fragments are joined with `.` in canonical order. Stereochemistry is not
/// written. Aromatic rings are written in lowercase whether they were drawn
/// with aromatic bonds or in a Kekulé form.
pub fn to_canonical_smiles(mol: &Molecule) -> Result<String> {
    let ranks = canonical_ranks(mol);
    let adjacency = mol.adjacency();
    let mut starts: Vec<usize> = mol
        .components()
        .iter()
        .filter_map(|members| members.iter().copied().min_by_key(|atom| ranks[*atom]))
        .collect();
    starts.sort_by_key(|atom| ranks[*atom]);

    let mut writer = Writer::new(mol, &adjacency, &ranks);
    let mut fragments = Vec::with_capacity(starts.len());
    for start in starts {
        writer.explore(start, None);
        let mut out = String::new();
        writer.emit(start, None, &mut out)?;
        fragments.push(out);
    }
    Ok(fragments.join("."))
}

struct Writer<'a> {
    mol: &'a Molecule,
    adjacency: &'a [Vec<(usize, usize)>],
    ranks: &'a [usize],
    visited: Vec<bool>,
    ring_bond: Vec<bool>,
    children: Vec<Vec<(usize, usize)>>,
    /// Ring bonds opened at an atom, as `(bond, partner)`.
    ring_opens: Vec<Vec<(usize, usize)>>,
    /// Ring bonds closed at an atom, as `(bond, partner)`.
    ring_closes: Vec<Vec<(usize, usize)>>,
    digits_in_use: [bool; MAX_RING_DIGIT + 1],
    open_digits: HashMap<usize, usize>,
}

impl<'a> Writer<'a> {
    fn new(mol: &'a Molecule, adjacency: &'a [Vec<(usize, usize)>], ranks: &'a [usize]) -> Self {
        let n = mol.atom_count();
        Self {
            mol,
            adjacency,
            ranks,
            visited: vec![false; n],
            ring_bond: vec![false; mol.bonds.len()],
            children: vec![Vec::new(); n],
            ring_opens: vec![Vec::new(); n],
            ring_closes: vec![Vec::new(); n],
            digits_in_use: [false; MAX_RING_DIGIT + 1],
            open_digits: HashMap::new(),
        }
    }

    fn sorted_neighbors(&self, atom: usize) -> Vec<(usize, usize)> {
        let mut neighbors = self.adjacency[atom].clone();
        neighbors.sort_by_key(|(nbr, _)| self.ranks[*nbr]);
        neighbors
    }

    /// Build the spanning tree and find ring-closure bonds.
    fn explore(&mut self, atom: usize, parent_bond: Option<usize>) {
        self.visited[atom] = true;
        for (nbr, bond) in self.sorted_neighbors(atom) {
            if Some(bond) == parent_bond {
                continue;
            }
            if self.visited[nbr] {
                if !self.ring_bond[bond] {
                    self.ring_bond[bond] = true;
                    self.ring_opens[nbr].push((bond, atom));
                    self.ring_closes[atom].push((bond, nbr));
                }
            } else {
                self.children[atom].push((nbr, bond));
                self.explore(nbr, Some(bond));
            }
        }
    }

    fn emit(&mut self, atom: usize, incoming: Option<usize>, out: &mut String) -> Result<()> {
        if let Some(bond) = incoming {
            out.push_str(self.bond_symbol(bond));
        }
        out.push_str(&self.atom_token(atom));

        let mut released = Vec::new();
        for (bond, _) in self.ring_closes[atom].clone() {
            if let Some(digit) = self.open_digits.remove(&bond) {
                out.push_str(self.bond_symbol(bond));
                push_digit(out, digit);
                released.push(digit);
            }
        }
        let mut opens = self.ring_opens[atom].clone();
        opens.sort_by_key(|(_, partner)| self.ranks[*partner]);
        for (bond, _) in opens {
            let digit = self.acquire_digit()?;
            self.open_digits.insert(bond, digit);
            push_digit(out, digit);
        }
        for digit in released {
            self.digits_in_use[digit] = false;
        }

        let children = self.children[atom].clone();
        let last = children.len().saturating_sub(1);
        for (pos, (child, bond)) in children.into_iter().enumerate() {
            if pos < last {
                out.push('(');
                self.emit(child, Some(bond), out)?;
                out.push(')');
            } else {
                self.emit(child, Some(bond), out)?;
            }
        }
        Ok(())
    }

    fn acquire_digit(&mut self) -> Result<usize> {
        let digit = (1..=MAX_RING_DIGIT)
            .find(|d| !self.digits_in_use[*d])
            .ok_or(ChemError::RingClosureOverflow)?;
        self.digits_in_use[digit] = true;
        Ok(digit)
    }

    fn bond_symbol(&self, bond: usize) -> &'static str {
        let bond = &self.mol.bonds[bond];
        let both_aromatic = self.mol.atoms[bond.i].aromatic && self.mol.atoms[bond.j].aromatic;
        match bond.order {
            BondOrder::Single if both_aromatic => "-",
            BondOrder::Single => "",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
            BondOrder::Aromatic if both_aromatic => "",
            BondOrder::Aromatic => ":",
        }
    }

    fn atom_token(&self, idx: usize) -> String {
        let atom = &self.mol.atoms[idx];
        let z = atom.atomic_number;
        let lowercase = atom.aromatic && element::has_aromatic_form(z);
        let symbol = if lowercase {
            atom.symbol().to_ascii_lowercase()
        } else {
            atom.symbol().to_string()
        };
        let plain = atom.charge == 0 && atom.isotope.is_none() && atom.radical == 0;
        let bare = plain
            && if z == DUMMY {
                atom.hydrogens == 0
            } else if atom.aromatic {
                lowercase && atom.hydrogens == self.aromatic_default_hydrogens(idx)
            } else {
                element::is_organic(z) && atom.hydrogens == self.default_hydrogens(idx)
            };
        if bare {
            return symbol;
        }

        let mut token = String::from("[");
        if let Some(isotope) = atom.isotope {
            token.push_str(&isotope.to_string());
        }
        token.push_str(&symbol);
        match atom.hydrogens {
            0 => {}
            1 => token.push('H'),
            n => {
                token.push('H');
                token.push_str(&n.to_string());
            }
        }
        match atom.charge {
            0 => {}
            1 => token.push('+'),
            -1 => token.push('-'),
            c if c > 0 => token.push_str(&format!("+{c}")),
            c => token.push_str(&c.to_string()),
        }
        token.push(']');
        token
    }

    /// Hydrogens a SMILES reader infers for a bare aliphatic atom.
    fn default_hydrogens(&self, idx: usize) -> u8 {
        let (bond_sum, _) = self.mol.bond_valence(idx);
        element::smiles_default_valences(self.mol.atoms[idx].atomic_number)
            .iter()
            .copied()
            .find(|v| *v >= bond_sum)
            .and_then(|v| u8::try_from(v - bond_sum).ok())
            .unwrap_or(0)
    }

    /// Hydrogens a SMILES reader infers for a bare aromatic atom.
    fn aromatic_default_hydrogens(&self, idx: usize) -> u8 {
        if self.mol.atoms[idx].atomic_number != CARBON {
            return 0;
        }
        let (bond_sum, _) = self.mol.bond_valence(idx);
        u8::try_from(3u32.saturating_sub(bond_sum)).unwrap_or(0)
    }
}

fn push_digit(out: &mut String, digit: usize) {
    if digit < 10 {
        out.push_str(&digit.to_string());
    } else {
        out.push('%');
        out.push_str(&digit.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::{Atom, Bond};
    use crate::sanitize::sanitize;

    fn build(elements: &[u8], bonds: &[(usize, usize, BondOrder)]) -> Molecule {
        let mut mol = Molecule::new();
        for z in elements {
            mol.atoms.push(Atom::new(*z));
        }
        for (i, j, order) in bonds {
            mol.bonds.push(Bond::new(*i, *j, *order));
        }
        sanitize(mol).unwrap()
    }

    #[test]
    fn ethanol_is_independent_of_atom_order() {
        let a = build(
            &[6, 6, 8],
            &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Single)],
        );
        let b = build(
            &[8, 6, 6],
            &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Single)],
        );
        assert_eq!(to_canonical_smiles(&a).unwrap(), "CCO");
        assert_eq!(to_canonical_smiles(&b).unwrap(), "CCO");
    }

    #[test]
    fn acetic_acid_branches() {
        let mol = build(
            &[6, 6, 8, 8],
            &[
                (0, 1, BondOrder::Single),
                (1, 2, BondOrder::Double),
                (1, 3, BondOrder::Single),
            ],
        );
        assert_eq!(to_canonical_smiles(&mol).unwrap(), "CC(=O)O");
    }

    #[test]
    fn formaldehyde() {
        let mol = build(&[6, 8], &[(0, 1, BondOrder::Double)]);
        assert_eq!(to_canonical_smiles(&mol).unwrap(), "C=O");
    }

    #[test]
    fn cyclohexane_uses_one_ring_digit() {
        let bonds: Vec<_> = (0..6)
            .map(|i| (i, (i + 1) % 6, BondOrder::Single))
            .collect();
        let mol = build(&[6; 6], &bonds);
        assert_eq!(to_canonical_smiles(&mol).unwrap(), "C1CCCCC1");
    }

    #[test]
    fn aromatic_benzene_is_lowercase() {
        let bonds: Vec<_> = (0..6)
            .map(|i| (i, (i + 1) % 6, BondOrder::Aromatic))
            .collect();
        let mol = build(&[6; 6], &bonds);
        assert_eq!(to_canonical_smiles(&mol).unwrap(), "c1ccccc1");
    }

    #[test]
    fn charged_atoms_are_bracketed() {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(11));
        mol.atoms[0].charge = 1;
        mol.atoms.push(Atom::new(17));
        mol.atoms[1].charge = -1;
        let mol = sanitize(mol).unwrap();
        let smiles = to_canonical_smiles(&mol).unwrap();
        let mut parts: Vec<&str> = smiles.split('.').collect();
        parts.sort_unstable();
        assert_eq!(parts, vec!["[Cl-]", "[Na+]"]);
    }

    #[test]
    fn ring_digit_formatting() {
        let mut out = String::new();
        push_digit(&mut out, 3);
        push_digit(&mut out, 12);
        assert_eq!(out, "3%12");
    }
}
