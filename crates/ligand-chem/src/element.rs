//! Element symbols and valence rules.

const SYMBOLS: [&str; 119] = [
    "*", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Atomic number used for query and pseudo atoms (`*`, `R#`, `A`, `Q`).
pub const DUMMY: u8 = 0;
pub const HYDROGEN: u8 = 1;
pub const CARBON: u8 = 6;

/// Periodic rows in which a formal charge shifts the valence rules to a
/// neighbouring element (N+ behaves like C, O- like F).
const ISOELECTRONIC_BLOCKS: [(u8, u8); 4] = [(5, 9), (13, 17), (31, 35), (49, 53)];

pub fn symbol(atomic_number: u8) -> &'static str {
    SYMBOLS
        .get(usize::from(atomic_number))
        .copied()
        .unwrap_or("*")
}

/// Resolve a molfile atom symbol. Deuterium and tritium come back as
/// hydrogen with their mass number.
pub fn from_symbol(raw: &str) -> Option<(u8, Option<u16>)> {
    match raw {
        "D" => return Some((HYDROGEN, Some(2))),
        "T" => return Some((HYDROGEN, Some(3))),
        "*" | "R" | "R#" | "A" | "Q" | "L" => return Some((DUMMY, None)),
        _ => {}
    }
    SYMBOLS
        .iter()
        .skip(1)
        .position(|candidate| candidate.eq_ignore_ascii_case(raw))
        .and_then(|idx| u8::try_from(idx + 1).ok())
        .map(|z| (z, None))
}

/// Allowed valences used to sanitize decoded structures.
pub fn allowed_valences(atomic_number: u8) -> Option<&'static [u32]> {
    let valences: &'static [u32] = match atomic_number {
        1 => &[1],
        2 | 10 | 18 | 36 | 54 | 86 => &[0],
        3 | 11 | 19 | 37 | 55 => &[1],
        4 | 12 | 20 | 38 | 56 => &[2],
        5 | 13 => &[3],
        6 | 14 | 32 => &[4],
        7 => &[3],
        8 => &[2],
        9 | 17 | 35 => &[1],
        15 | 33 => &[3, 5, 7],
        16 | 34 | 52 => &[2, 4, 6],
        53 => &[1, 3, 5],
        _ => return None,
    };
    Some(valences)
}

/// Valence rules for a charged atom: the isoelectronic neighbour inside the
/// same periodic block, or no rule when the charge leaves the block.
pub fn charged_valences(atomic_number: u8, charge: i8) -> Option<&'static [u32]> {
    if charge == 0 {
        return allowed_valences(atomic_number);
    }
    let effective = i16::from(atomic_number) - i16::from(charge);
    ISOELECTRONIC_BLOCKS
        .iter()
        .find(|(lo, hi)| (*lo..=*hi).contains(&atomic_number))
        .filter(|(lo, hi)| (i16::from(*lo)..=i16::from(*hi)).contains(&effective))
        .and_then(|_| u8::try_from(effective).ok())
        .and_then(allowed_valences)
}

/// Elements whose hydrogens may be implied (the SMILES organic subset).
pub fn is_organic(atomic_number: u8) -> bool {
    matches!(atomic_number, 5 | 6 | 7 | 8 | 9 | 15 | 16 | 17 | 35 | 53)
}

/// Valences a SMILES reader assumes for bare organic-subset atoms.
pub fn smiles_default_valences(atomic_number: u8) -> &'static [u32] {
    match atomic_number {
        5 => &[3],
        6 => &[4],
        7 | 15 => &[3, 5],
        8 => &[2],
        16 => &[2, 4, 6],
        9 | 17 | 35 | 53 => &[1],
        _ => &[],
    }
}

/// Elements that may be written in lowercase aromatic form.
pub fn has_aromatic_form(atomic_number: u8) -> bool {
    matches!(atomic_number, 5 | 6 | 7 | 8 | 15 | 16 | 33 | 34)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_symbols_case_insensitively() {
        assert_eq!(from_symbol("C"), Some((6, None)));
        assert_eq!(from_symbol("CL"), Some((17, None)));
        assert_eq!(from_symbol("Br"), Some((35, None)));
        assert_eq!(from_symbol("D"), Some((1, Some(2))));
        assert_eq!(from_symbol("R#"), Some((DUMMY, None)));
        assert_eq!(from_symbol("Xx"), None);
    }

    #[test]
    fn charge_shifts_valence_rules() {
        assert_eq!(charged_valences(7, 1), Some(&[4][..]));
        assert_eq!(charged_valences(8, -1), Some(&[1][..]));
        assert_eq!(charged_valences(17, -1), None);
        assert_eq!(charged_valences(26, 2), None);
    }

    #[test]
    fn symbol_round_trips_for_common_elements() {
        for z in [1u8, 6, 7, 8, 16, 17, 26, 53] {
            assert_eq!(from_symbol(symbol(z)), Some((z, None)));
        }
    }
}
