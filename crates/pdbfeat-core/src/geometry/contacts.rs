use super::distance;
use crate::structure::Structure;
use itertools::Itertools;

/// Count unordered residue pairs within each chain whose `atom_name` atoms lie within
/// `cutoff` (inclusive). Chains are counted independently and summed. Residues lacking
/// the atom, ligands and ions are skipped.
pub fn contact_count(structure: &Structure, cutoff: f64, atom_name: &str) -> usize {
    structure
        .chains()
        .iter()
        .map(|chain| {
            chain
                .atoms_named(atom_name)
                .iter()
                .tuple_combinations()
                .filter(|((_, a), (_, b))| distance(a, b) <= cutoff)
                .count()
        })
        .sum()
}

/// Long-range order: mean CA-CA distance over residue pairs of the same chain,
/// pooled across chains. Exactly `0.0` when there is no such pair.
pub fn long_range_order(structure: &Structure) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for chain in structure.chains() {
        for ((_, a), (_, b)) in chain.atoms_named("CA").iter().tuple_combinations() {
            total += distance(a, b);
            pairs += 1;
        }
    }
    if pairs == 0 {
        0.0
    } else {
        total / pairs as f64
    }
}
