//! Geometric metrics over a [`Structure`](crate::Structure).
//!
//! Every metric takes the parsed structure by reference; nothing here re-reads text.
mod buriedness;
mod contacts;
mod distance_matrix;
mod hull;
mod hydrophobicity;

pub use buriedness::buriedness;
pub use contacts::{contact_count, long_range_order};
pub use distance_matrix::{aligned_distance_matrix, AlignedMatrix};
pub use hull::{ConvexHull, Facet};
pub use hydrophobicity::{
    average_hydrophobicity, residue_hydrophobicity, DEFAULT_NEIGHBOUR_CUTOFF,
};

/// Euclidean distance between two points.
pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    norm(&sub(a, b))
}

pub(crate) fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_helpers() {
        assert_relative_eq!(distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]), 5.0);
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(sub(&[1.0, 1.0, 1.0], &[0.5, 2.0, 0.0]), [0.5, -1.0, 1.0]);
    }
}
