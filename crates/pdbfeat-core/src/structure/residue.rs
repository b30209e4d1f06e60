//! Borrowed views of a single residue inside a [`Structure`].
//!
//! A residue is a contiguous run of atoms in the atom table sharing chain id, residue
//! number, insertion code and residue name. `ResidueAtoms` gives named-atom lookups
//! over that run without copying coordinates.
use super::Structure;
use crate::info::constants::{aa3to1, is_polymer_residue};
use serde::{Serialize, Serializer};
use std::fmt;

/// Atom information borrowed from the parent structure.
#[derive(Debug, Clone, Copy)]
pub struct AtomInfo<'a> {
    pub index: usize,
    pub coords: &'a [f64; 3],
    pub atom_name: &'a str,
    pub is_hetero: bool,
}

#[derive(Debug, Clone)]
pub struct ResidueAtoms<'a> {
    pub start_idx: usize,
    pub end_idx: usize,
    pub res_id: i32,
    pub ins_code: Option<&'a str>,
    pub res_name: &'a str,
    pub chain_id: &'a str,
    pub is_hetero: bool,
    pub parent: &'a Structure,
}

impl<'a> ResidueAtoms<'a> {
    pub(crate) fn new(parent: &'a Structure, start_idx: usize, end_idx: usize) -> Self {
        ResidueAtoms {
            start_idx,
            end_idx,
            res_id: parent.get_res_id(start_idx),
            ins_code: parent.get_ins_code(start_idx),
            res_name: parent.get_res_name(start_idx),
            chain_id: parent.get_chain_id(start_idx),
            is_hetero: parent.get_is_hetero(start_idx),
            parent,
        }
    }

    /// Coordinates of every atom in this residue
    pub fn coords(&self) -> &'a [[f64; 3]] {
        &self.parent.get_coords()[self.start_idx..self.end_idx]
    }

    pub fn atom_count(&self) -> usize {
        self.end_idx - self.start_idx
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = AtomInfo<'a>> + '_ {
        (self.start_idx..self.end_idx).map(|i| self.atom_info(i))
    }

    /// Find atom by name within this residue. A missing atom is `None`, never an error.
    pub fn find_atom_by_name(&self, name: &str) -> Option<AtomInfo<'a>> {
        (self.start_idx..self.end_idx)
            .find(|&i| self.parent.get_atom_name(i) == name)
            .map(|i| self.atom_info(i))
    }

    pub fn alpha_carbon(&self) -> Option<&'a [f64; 3]> {
        self.find_atom_by_name("CA").map(|atom| atom.coords)
    }

    /// Polymer residue: an amino acid, including modified ones written as HETATM.
    /// Solvent, ligands and ions are not standard.
    pub fn is_standard(&self) -> bool {
        is_polymer_residue(self.res_name, self.is_hetero)
    }

    pub fn one_letter(&self) -> char {
        aa3to1(self.res_name)
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id.to_string(),
            res_id: self.res_id,
            ins_code: self.ins_code.map(str::to_string),
        }
    }

    fn atom_info(&self, i: usize) -> AtomInfo<'a> {
        AtomInfo {
            index: i,
            coords: self.parent.get_coord(i),
            atom_name: self.parent.get_atom_name(i),
            is_hetero: self.parent.get_is_hetero(i),
        }
    }
}

/// Canonical residue key: chain id + residue number as written in the file,
/// plus the insertion code when one is present. Displays as `A:12` or `A:12B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: String,
    pub res_id: i32,
    pub ins_code: Option<String>,
}

impl ResidueKey {
    pub fn new(chain_id: &str, res_id: i32) -> Self {
        ResidueKey {
            chain_id: chain_id.to_string(),
            res_id,
            ins_code: None,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.res_id)?;
        if let Some(code) = &self.ins_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

impl Serialize for ResidueKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A per-residue value. NaN marks a value that is undefined for the residue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueMetric {
    pub key: ResidueKey,
    pub value: f64,
}
