use crate::element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Molfile bond type field.
    pub fn from_ctfile(value: u32) -> Option<Self> {
        match value {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            _ => None,
        }
    }

    /// Integral contribution to valence; aromatic bonds count as one here
    /// and are corrected for during sanitization.
    pub fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub atomic_number: u8,
    pub charge: i8,
    pub isotope: Option<u16>,
    /// Unpaired electrons (0, 1 or 2).
    pub radical: u8,
    /// Hydrogens attached to this atom that are not graph nodes.
    pub hydrogens: u8,
    pub aromatic: bool,
}

impl Atom {
    pub fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            charge: 0,
            isotope: None,
            radical: 0,
            hydrogens: 0,
            aromatic: false,
        }
    }

    pub fn symbol(&self) -> &'static str {
        element::symbol(self.atomic_number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(i: usize, j: usize, order: BondOrder) -> Self {
        Self { i, j, order }
    }

    pub fn other(&self, atom: usize) -> usize {
        if self.i == atom { self.j } else { self.i }
    }
}

/// A molecular graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Per-atom list of `(neighbor, bond index)`.
    pub fn adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); self.atoms.len()];
        for (idx, bond) in self.bonds.iter().enumerate() {
            adjacency[bond.i].push((bond.j, idx));
            adjacency[bond.j].push((bond.i, idx));
        }
        adjacency
    }

    /// Sum of bond valences around `atom` plus the aromatic-bond count.
    pub(crate) fn bond_valence(&self, atom: usize) -> (u32, usize) {
        let mut total = 0;
        let mut aromatic = 0;
        for bond in self.bonds.iter().filter(|b| b.i == atom || b.j == atom) {
            total += bond.order.valence();
            if bond.order == BondOrder::Aromatic {
                aromatic += 1;
            }
        }
        (total, aromatic)
    }

    /// Connected components, each listed in ascending atom order.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let adjacency = self.adjacency();
        let mut seen = vec![false; self.atoms.len()];
        let mut components = Vec::new();
        for start in 0..self.atoms.len() {
            if seen[start] {
                continue;
            }
            let mut stack = vec![start];
            let mut members = Vec::new();
            seen[start] = true;
            while let Some(atom) = stack.pop() {
                members.push(atom);
                for &(nbr, _) in &adjacency[atom] {
                    if !seen[nbr] {
                        seen[nbr] = true;
                        stack.push(nbr);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }
        components
    }
}
