//! In-memory structure model.
//!
//! Atoms are stored column-wise; residues and chains are derived views over the
//! atom table. A `Structure` is never mutated after construction: selections
//! produce new structures.
mod iterator;
mod residue;
mod selection;

pub use iterator::ResidueIter;
pub use residue::{AtomInfo, ResidueAtoms, ResidueKey, ResidueMetric};
pub use selection::Selection;

use crate::errors::{FeatureError, Result};
use crate::info::constants::is_polymer_residue;
use itertools::{izip, Itertools};

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    size: usize,
    coords: Vec<[f64; 3]>,
    atom_names: Vec<String>,
    res_ids: Vec<i32>,
    ins_codes: Vec<Option<String>>,
    res_names: Vec<String>,
    is_hetero: Vec<bool>,
    chain_ids: Vec<String>,
}

/// The residues of one chain, in file order.
#[derive(Debug, Clone)]
pub struct ChainResidues<'a> {
    pub chain_id: &'a str,
    pub residues: Vec<ResidueAtoms<'a>>,
}

impl<'a> ChainResidues<'a> {
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn standard(&self) -> impl Iterator<Item = &ResidueAtoms<'a>> + '_ {
        self.residues.iter().filter(|residue| residue.is_standard())
    }

    /// Standard residues that carry the named atom, paired with its coordinates.
    pub fn atoms_named(&self, atom_name: &str) -> Vec<(&ResidueAtoms<'a>, &'a [f64; 3])> {
        self.standard()
            .filter_map(|residue| {
                residue
                    .find_atom_by_name(atom_name)
                    .map(|atom| (residue, atom.coords))
            })
            .collect()
    }
}

impl Structure {
    pub fn new(
        coords: Vec<[f64; 3]>,
        atom_names: Vec<String>,
        res_ids: Vec<i32>,
        ins_codes: Vec<Option<String>>,
        res_names: Vec<String>,
        is_hetero: Vec<bool>,
        chain_ids: Vec<String>,
    ) -> Self {
        let size = coords.len();
        debug_assert!(
            [
                atom_names.len(),
                res_ids.len(),
                ins_codes.len(),
                res_names.len(),
                is_hetero.len(),
                chain_ids.len()
            ]
            .iter()
            .all(|&len| len == size),
            "atom table columns must have equal length"
        );
        Structure {
            size,
            coords,
            atom_names,
            res_ids,
            ins_codes,
            res_names,
            is_hetero,
            chain_ids,
        }
    }
    pub fn get_size(&self) -> usize {
        self.size
    }
    pub fn get_atom_name(&self, idx: usize) -> &str {
        &self.atom_names[idx]
    }
    pub fn get_chain_id(&self, idx: usize) -> &str {
        &self.chain_ids[idx]
    }
    pub fn get_coord(&self, idx: usize) -> &[f64; 3] {
        &self.coords[idx]
    }
    pub fn get_coords(&self) -> &[[f64; 3]] {
        &self.coords
    }
    pub fn get_ins_code(&self, idx: usize) -> Option<&str> {
        self.ins_codes[idx].as_deref()
    }
    pub fn get_is_hetero(&self, idx: usize) -> bool {
        self.is_hetero[idx]
    }
    pub fn get_res_id(&self, idx: usize) -> i32 {
        self.res_ids[idx]
    }
    pub fn get_res_name(&self, idx: usize) -> &str {
        &self.res_names[idx]
    }
    /// A new residue starts when the chain ID, residue ID, insertion code or
    /// residue name changes from one atom to the next. The last entry is the atom count.
    pub(crate) fn get_residue_starts(&self) -> Vec<usize> {
        if self.size == 0 {
            return Vec::new();
        }
        let mut starts = vec![0];
        starts.extend(
            izip!(
                &self.res_ids,
                &self.ins_codes,
                &self.res_names,
                &self.chain_ids
            )
            .tuple_windows()
            .enumerate()
            .filter_map(
                |(i, ((id1, ins1, name1, chain1), (id2, ins2, name2, chain2)))| {
                    if id1 != id2 || ins1 != ins2 || name1 != name2 || chain1 != chain2 {
                        Some(i + 1)
                    } else {
                        None
                    }
                },
            ),
        );
        starts.push(self.size);
        starts
    }
    /// Iterate through the structure one residue at a time.
    ///
    /// This is the base for any other residue filtration code.
    pub fn iter_residues_all(&self) -> ResidueIter {
        ResidueIter::new(self, self.get_residue_starts())
    }
    pub fn iter_residues_standard(&self) -> impl Iterator<Item = ResidueAtoms> {
        self.iter_residues_all()
            .filter(|residue| residue.is_standard())
    }
    /// Residues grouped by chain. Chains keep the order of their first atom; residues
    /// of a chain split across the file (e.g. trailing waters) are merged.
    pub fn chains(&self) -> Vec<ChainResidues> {
        let mut chains: Vec<ChainResidues> = Vec::new();
        for residue in self.iter_residues_all() {
            match chains
                .iter_mut()
                .find(|chain| chain.chain_id == residue.chain_id)
            {
                Some(chain) => chain.residues.push(residue),
                None => chains.push(ChainResidues {
                    chain_id: residue.chain_id,
                    residues: vec![residue],
                }),
            }
        }
        chains
    }
    pub fn chain(&self, chain_id: &str) -> Option<ChainResidues> {
        self.chains()
            .into_iter()
            .find(|chain| chain.chain_id == chain_id)
    }
    pub fn chain_ids(&self) -> Vec<&str> {
        self.chain_ids
            .iter()
            .map(String::as_str)
            .unique()
            .collect()
    }
    /// The first chain holding at least one standard residue.
    pub fn primary_chain(&self) -> Option<ChainResidues> {
        self.chains()
            .into_iter()
            .find(|chain| chain.standard().next().is_some())
    }
    /// Standard residues of the primary chain; these are the residues an aligned
    /// sequence describes.
    pub fn primary_chain_residues(&self) -> Vec<ResidueAtoms> {
        self.primary_chain()
            .map(|chain| {
                chain
                    .residues
                    .into_iter()
                    .filter(|residue| residue.is_standard())
                    .collect()
            })
            .unwrap_or_default()
    }
    /// One-letter sequence of the standard residues of a chain.
    pub fn sequence(&self, chain_id: &str) -> Option<String> {
        self.chain(chain_id)
            .map(|chain| chain.standard().map(|residue| residue.one_letter()).collect())
    }
    pub fn select_by_chain(&self, chain_id: &str) -> Selection {
        let indices: Vec<usize> = self
            .chain_ids
            .iter()
            .enumerate()
            .filter(|(_, chain)| chain.as_str() == chain_id)
            .map(|(i, _)| i)
            .collect();
        Selection::new(indices)
    }
    pub fn select_standard(&self) -> Selection {
        let indices: Vec<usize> = izip!(&self.is_hetero, &self.res_names)
            .enumerate()
            .filter(|(_, (hetero, name))| is_polymer_residue(name, **hetero))
            .map(|(i, _)| i)
            .collect();
        Selection::new(indices)
    }
    /// Copy the selected atoms into a new structure.
    pub fn view(&self, selection: &Selection) -> Structure {
        let (coords, atom_names, res_ids, ins_codes, res_names, is_hetero, chain_ids): (
            Vec<[f64; 3]>,
            Vec<String>,
            Vec<i32>,
            Vec<Option<String>>,
            Vec<String>,
            Vec<bool>,
            Vec<String>,
        ) = selection
            .iter()
            .map(|i| {
                (
                    self.coords[i],
                    self.atom_names[i].clone(),
                    self.res_ids[i],
                    self.ins_codes[i].clone(),
                    self.res_names[i].clone(),
                    self.is_hetero[i],
                    self.chain_ids[i].clone(),
                )
            })
            .multiunzip();
        Structure::new(
            coords, atom_names, res_ids, ins_codes, res_names, is_hetero, chain_ids,
        )
    }
    /// Restrict to one chain. An absent chain is an input error.
    pub fn select_chain(&self, chain_id: &str) -> Result<Structure> {
        let selection = self.select_by_chain(chain_id);
        if selection.is_empty() {
            return Err(FeatureError::input(format!(
                "chain '{}' not found (available: {})",
                chain_id,
                self.chain_ids().join(", ")
            )));
        }
        Ok(self.view(&selection))
    }
    /// Strip solvent, ligands and ions. Modified amino acids such as MSE stay.
    pub fn without_hetero(&self) -> Structure {
        self.view(&self.select_standard())
    }
}
