use super::ConvexHull;
use crate::errors::{FeatureError, Result};
use crate::structure::{ResidueMetric, Structure};

/// Per-residue depth below the convex hull of the structure.
///
/// Solvent, ligands and ions are removed first. Each remaining atom gets its distance
/// to the nearest hull facet plane (hull vertices are 0); a residue's value is the
/// mean over its atoms. Residues come back in atom-table order, keyed by chain and
/// residue number.
pub fn buriedness(structure: &Structure) -> Result<Vec<ResidueMetric>> {
    let stripped = structure.without_hetero();
    if stripped.get_size() == 0 {
        return Err(FeatureError::geometry(
            "no polymer atoms left after removing solvent and ligands",
        ));
    }
    let hull = ConvexHull::new(stripped.get_coords())?;
    let depths: Vec<f64> = (0..stripped.get_size())
        .map(|idx| hull.point_depth(idx))
        .collect();

    Ok(stripped
        .iter_residues_all()
        .map(|residue| {
            let total: f64 = depths[residue.start_idx..residue.end_idx].iter().sum();
            ResidueMetric {
                key: residue.key(),
                value: total / residue.atom_count() as f64,
            }
        })
        .collect())
}
