//! V2000 SD file decoding.
//!
//! Records are separated by `$$$$`. Each record is a molfile connection
//! table followed by `> <name>` data items. Every decoded molecule is
//! sanitized before it is handed out.

use ligand_model::{LineNotationError, StructureRecord};
use tracing::trace;

use crate::element;
use crate::error::{ChemError, Result};
use crate::molecule::{Atom, Bond, BondOrder, Molecule};
use crate::sanitize::sanitize;
use crate::smiles::to_canonical_smiles;

const RECORD_DELIMITER: &str = "$$$$";

/// One SD record: a sanitized molecule and its data items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdfRecord {
    /// First header line of the molfile. Not a property.
    pub title: String,
    pub molecule: Molecule,
    /// Data items in file order; a repeated name keeps its last value.
    pub properties: Vec<(String, String)>,
}

impl SdfRecord {
    pub fn to_canonical_smiles(&self) -> Result<String> {
        to_canonical_smiles(&self.molecule)
    }
}

impl StructureRecord for SdfRecord {
    fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    fn canonical_smiles(&self) -> std::result::Result<String, LineNotationError> {
        self.to_canonical_smiles()
            .map_err(|err| LineNotationError(err.to_string()))
    }
}

/// A record's lines, each with its 1-based line number in the file.
pub type Block<'a> = Vec<(usize, &'a str)>;

/// Split SD text into record blocks. A trailing block without a delimiter
/// counts as a record when it holds any non-blank line.
pub fn split_records(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Block<'_> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim() == RECORD_DELIMITER {
            blocks.push(std::mem::take(&mut current));
        } else {
            current.push((idx + 1, line));
        }
    }
    if current.iter().any(|(_, line)| !line.trim().is_empty()) {
        blocks.push(current);
    }
    blocks
}

/// Decode every record of an SD text in file order.
pub fn read_sdf_str(text: &str) -> impl Iterator<Item = Result<SdfRecord>> + '_ {
    split_records(text).into_iter().map(|block| parse_record(&block))
}

/// Decode and sanitize one record block.
pub fn parse_record(lines: &[(usize, &str)]) -> Result<SdfRecord> {
    if lines.len() < 4 {
        let line_no = lines.first().map_or(1, |(ln, _)| *ln);
        return Err(ChemError::parse(
            line_no,
            "record must contain a header block and counts line",
        ));
    }
    let title = lines[0].1.trim().to_string();
    let (counts_no, counts_line) = lines[3];
    if counts_line.contains("V3000") {
        return Err(ChemError::UnsupportedVersion);
    }
    let (atom_count, bond_count) = parse_counts(counts_line, counts_no)?;

    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let ctab_end = bond_start + bond_count;
    if lines.len() < ctab_end {
        let last = lines.last().map_or(counts_no, |(ln, _)| *ln);
        return Err(ChemError::parse(
            last,
            "record ended before atoms and bonds were fully specified",
        ));
    }

    let mut mol = Molecule::new();
    for (ln, raw) in &lines[atom_start..bond_start] {
        mol.atoms.push(parse_atom(raw, *ln)?);
    }
    for (ln, raw) in &lines[bond_start..ctab_end] {
        mol.bonds.push(parse_bond(raw, *ln, atom_count)?);
    }

    let data_start = apply_property_lines(&mut mol, &lines[ctab_end..])?;
    let properties = parse_data_items(&lines[ctab_end + data_start..]);
    let molecule = sanitize(mol)?;

    Ok(SdfRecord {
        title,
        molecule,
        properties,
    })
}

fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let fixed = (
        field(line, 0, 3).parse::<usize>(),
        field(line, 3, 6).parse::<usize>(),
    );
    if let (Ok(atoms), Ok(bonds)) = fixed {
        return Ok((atoms, bonds));
    }
    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(ChemError::parse(
            line_no,
            "counts line must contain atom and bond counts",
        ));
    }
    let atoms = tokens[0]
        .parse::<usize>()
        .map_err(|_| ChemError::parse(line_no, "invalid atom count"))?;
    let bonds = tokens[1]
        .parse::<usize>()
        .map_err(|_| ChemError::parse(line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atom(raw: &str, line_no: usize) -> Result<Atom> {
    let fixed_symbol = field(raw, 31, 34);
    let (symbol, charge_code) = match element::from_symbol(fixed_symbol) {
        Some(_) if !fixed_symbol.is_empty() => (fixed_symbol, field(raw, 36, 39)),
        _ => {
            let tokens: Vec<_> = raw.split_whitespace().collect();
            if tokens.len() < 4 {
                return Err(ChemError::parse(line_no, "invalid atom line"));
            }
            (tokens[3], tokens.get(5).copied().unwrap_or(""))
        }
    };
    let (atomic_number, isotope) = element::from_symbol(symbol).ok_or_else(|| {
        ChemError::parse(line_no, format!("unknown element symbol '{symbol}'"))
    })?;

    let mut atom = Atom::new(atomic_number);
    atom.isotope = isotope;
    let code = if charge_code.is_empty() {
        0
    } else {
        charge_code
            .parse::<u8>()
            .map_err(|_| ChemError::parse(line_no, "invalid charge field in atom line"))?
    };
    match code {
        0 => {}
        1 => atom.charge = 3,
        2 => atom.charge = 2,
        3 => atom.charge = 1,
        4 => atom.radical = 1,
        5 => atom.charge = -1,
        6 => atom.charge = -2,
        7 => atom.charge = -3,
        other => {
            return Err(ChemError::parse(
                line_no,
                format!("unsupported charge code {other}"),
            ));
        }
    }
    Ok(atom)
}

fn parse_bond(raw: &str, line_no: usize, atom_count: usize) -> Result<Bond> {
    let fixed = (
        field(raw, 0, 3).parse::<usize>(),
        field(raw, 3, 6).parse::<usize>(),
        field(raw, 6, 9).parse::<u32>(),
    );
    let (a1, a2, order_val) = if let (Ok(a1), Ok(a2), Ok(order)) = fixed {
        (a1, a2, order)
    } else {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ChemError::parse(line_no, "invalid bond line"));
        }
        let a1 = tokens[0]
            .parse::<usize>()
            .map_err(|_| ChemError::parse(line_no, "invalid first atom index"))?;
        let a2 = tokens[1]
            .parse::<usize>()
            .map_err(|_| ChemError::parse(line_no, "invalid second atom index"))?;
        let order = tokens[2]
            .parse::<u32>()
            .map_err(|_| ChemError::parse(line_no, "invalid bond order value"))?;
        (a1, a2, order)
    };

    let order = BondOrder::from_ctfile(order_val).ok_or_else(|| {
        ChemError::parse(line_no, format!("unsupported bond type {order_val}"))
    })?;
    if a1 == 0 || a2 == 0 || a1 > atom_count || a2 > atom_count || a1 == a2 {
        return Err(ChemError::parse(
            line_no,
            "bond references atom outside declared range",
        ));
    }
    Ok(Bond::new(a1 - 1, a2 - 1, order))
}

/// Apply `M  CHG`, `M  RAD` and `M  ISO` lines. Returns the offset of the
/// first line after the connection table.
fn apply_property_lines(mol: &mut Molecule, lines: &[(usize, &str)]) -> Result<usize> {
    let mut reset = false;
    for (offset, (ln, raw)) in lines.iter().enumerate() {
        if raw.starts_with("M  END") {
            return Ok(offset + 1);
        }
        if raw.starts_with('>') {
            return Ok(offset);
        }
        let kind = if raw.starts_with("M  CHG") {
            PropertyKind::Charge
        } else if raw.starts_with("M  RAD") {
            PropertyKind::Radical
        } else if raw.starts_with("M  ISO") {
            PropertyKind::Isotope
        } else {
            if raw.starts_with("M  ") {
                trace!(line = *ln, "skipping unsupported property line");
            }
            continue;
        };
        if !reset && kind != PropertyKind::Isotope {
            for atom in &mut mol.atoms {
                atom.charge = 0;
                atom.radical = 0;
            }
            reset = true;
        }
        for (atom_no, value) in property_pairs(raw, *ln, mol.atoms.len())? {
            let atom = &mut mol.atoms[atom_no - 1];
            match kind {
                PropertyKind::Charge => {
                    atom.charge = i8::try_from(value)
                        .map_err(|_| ChemError::parse(*ln, "charge out of range"))?;
                }
                PropertyKind::Radical => {
                    atom.radical = match value {
                        0 => 0,
                        2 => 1,
                        1 | 3 => 2,
                        other => {
                            return Err(ChemError::parse(
                                *ln,
                                format!("unsupported radical code {other}"),
                            ));
                        }
                    };
                }
                PropertyKind::Isotope => {
                    atom.isotope = Some(
                        u16::try_from(value)
                            .map_err(|_| ChemError::parse(*ln, "isotope out of range"))?,
                    );
                }
            }
        }
    }
    Ok(lines.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyKind {
    Charge,
    Radical,
    Isotope,
}

/// `(atom number, value)` pairs of an `M  XXX  n aaa vvv ...` line.
fn property_pairs(raw: &str, line_no: usize, atom_count: usize) -> Result<Vec<(usize, i32)>> {
    let tokens: Vec<_> = raw.split_whitespace().skip(2).collect();
    let Some((count, rest)) = tokens.split_first() else {
        return Err(ChemError::parse(line_no, "property line without entry count"));
    };
    let count = count
        .parse::<usize>()
        .map_err(|_| ChemError::parse(line_no, "invalid property entry count"))?;
    if rest.len() < count * 2 {
        return Err(ChemError::parse(line_no, "property line is truncated"));
    }
    let mut pairs = Vec::with_capacity(count);
    for pair in rest.chunks(2).take(count) {
        let atom_no = pair[0]
            .parse::<usize>()
            .map_err(|_| ChemError::parse(line_no, "invalid atom number in property line"))?;
        if atom_no == 0 || atom_no > atom_count {
            return Err(ChemError::parse(
                line_no,
                "property references atom outside declared range",
            ));
        }
        let value = pair[1]
            .parse::<i32>()
            .map_err(|_| ChemError::parse(line_no, "invalid value in property line"))?;
        pairs.push((atom_no, value));
    }
    Ok(pairs)
}

fn parse_data_items(lines: &[(usize, &str)]) -> Vec<(String, String)> {
    let mut items: Vec<(String, String)> = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let header = lines[idx].1;
        idx += 1;
        let Some(name) = data_item_name(header) else {
            continue;
        };
        let mut values = Vec::new();
        while idx < lines.len() && !lines[idx].1.trim().is_empty() {
            values.push(lines[idx].1.trim_end());
            idx += 1;
        }
        let value = values.join("\n");
        if let Some(existing) = items.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            items.push((name, value));
        }
    }
    items
}

/// Name inside the angle brackets of a `>  <name>` header line.
fn data_item_name(header: &str) -> Option<String> {
    if !header.starts_with('>') {
        return None;
    }
    let open = header.find('<')?;
    let close = header[open + 1..].find('>')? + open + 1;
    Some(header[open + 1..close].to_string())
}
