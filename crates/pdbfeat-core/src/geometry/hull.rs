//! Incremental 3D convex hull.
//!
//! Starts from a non-degenerate tetrahedron and folds the remaining points in one by
//! one: facets a new point can see are removed and the hole is closed by fanning
//! triangles from the point to the horizon edges. Facet normals always point away from
//! a fixed interior point (the centroid of the starting tetrahedron), which stays
//! inside the hull as it grows.
use super::{cross, distance, dot, norm, sub};
use crate::errors::{FeatureError, Result};
use std::collections::{BTreeSet, HashSet};

/// Tolerance relative to the extent of the point cloud.
const RELATIVE_EPSILON: f64 = 1e-9;

/// A triangular hull facet with an outward unit normal.
#[derive(Debug, Clone)]
pub struct Facet {
    pub vertices: [usize; 3],
    normal: [f64; 3],
    offset: f64,
}

impl Facet {
    fn new(vertices: [usize; 3], points: &[[f64; 3]], interior: &[f64; 3], eps: f64) -> Option<Self> {
        let [a, b, c] = vertices;
        let raw = cross(&sub(&points[b], &points[a]), &sub(&points[c], &points[a]));
        let magnitude = norm(&raw);
        if magnitude <= eps * eps {
            return None;
        }
        let mut facet = Facet {
            vertices,
            normal: [raw[0] / magnitude, raw[1] / magnitude, raw[2] / magnitude],
            offset: -dot(&raw, &points[a]) / magnitude,
        };
        if facet.signed_distance(interior) > 0.0 {
            facet.normal = [-facet.normal[0], -facet.normal[1], -facet.normal[2]];
            facet.offset = -facet.offset;
            facet.vertices.swap(1, 2);
        }
        Some(facet)
    }

    /// Positive outside the hull, negative inside.
    pub fn signed_distance(&self, point: &[f64; 3]) -> f64 {
        dot(&self.normal, point) + self.offset
    }

    pub fn normal(&self) -> &[f64; 3] {
        &self.normal
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: Vec<[f64; 3]>,
    facets: Vec<Facet>,
    vertices: Vec<usize>,
    interior: [f64; 3],
}

impl ConvexHull {
    /// Build the hull of `points`. Fewer than four points, or points that are all
    /// collinear or coplanar, have no volume and are a geometry error.
    pub fn new(points: &[[f64; 3]]) -> Result<Self> {
        if points.len() < 4 {
            return Err(FeatureError::geometry(format!(
                "convex hull needs at least 4 atoms, got {}",
                points.len()
            )));
        }
        let eps = extent(points) * RELATIVE_EPSILON;
        let simplex = initial_simplex(points, eps)?;
        let interior = simplex.iter().fold([0.0; 3], |acc, &i| {
            [
                acc[0] + points[i][0] / 4.0,
                acc[1] + points[i][1] / 4.0,
                acc[2] + points[i][2] / 4.0,
            ]
        });

        let [i0, i1, i2, i3] = simplex;
        let mut facets = Vec::with_capacity(4);
        for vertices in [[i0, i1, i2], [i0, i1, i3], [i0, i2, i3], [i1, i2, i3]] {
            let facet = Facet::new(vertices, points, &interior, eps)
                .ok_or_else(|| FeatureError::geometry("degenerate starting tetrahedron"))?;
            facets.push(facet);
        }

        for (idx, point) in points.iter().enumerate() {
            if simplex.contains(&idx) {
                continue;
            }
            let visible: Vec<bool> = facets
                .iter()
                .map(|facet| facet.signed_distance(point) > eps)
                .collect();
            if !visible.iter().any(|&v| v) {
                continue;
            }
            let visible_edges: HashSet<(usize, usize)> = facets
                .iter()
                .zip(&visible)
                .filter(|(_, v)| **v)
                .flat_map(|(facet, _)| facet.edges())
                .collect();
            // an edge is on the horizon when the facet across it stays
            let horizon: Vec<(usize, usize)> = visible_edges
                .iter()
                .filter(|(a, b)| !visible_edges.contains(&(*b, *a)))
                .copied()
                .collect();

            let mut kept: Vec<Facet> = facets
                .into_iter()
                .zip(visible)
                .filter(|(_, v)| !*v)
                .map(|(facet, _)| facet)
                .collect();
            kept.extend(
                horizon
                    .into_iter()
                    .filter_map(|(a, b)| Facet::new([a, b, idx], points, &interior, eps)),
            );
            facets = kept;
        }

        let vertices: Vec<usize> = facets
            .iter()
            .flat_map(|facet| facet.vertices)
            .collect::<BTreeSet<usize>>()
            .into_iter()
            .collect();

        Ok(ConvexHull {
            points: points.to_vec(),
            facets,
            vertices,
            interior,
        })
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Indices of the input points on the hull, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn is_vertex(&self, idx: usize) -> bool {
        self.vertices.binary_search(&idx).is_ok()
    }

    /// Shortest distance from `point` to the plane of any hull facet.
    /// For points inside the hull this is the distance to the surface.
    pub fn distance_to_surface(&self, point: &[f64; 3]) -> f64 {
        self.facets
            .iter()
            .map(|facet| facet.signed_distance(point).abs())
            .fold(f64::INFINITY, f64::min)
    }

    /// Distance to the surface for input point `idx`; hull vertices are exactly 0.
    pub fn point_depth(&self, idx: usize) -> f64 {
        if self.is_vertex(idx) {
            0.0
        } else {
            self.distance_to_surface(&self.points[idx])
        }
    }

    pub fn volume(&self) -> f64 {
        self.facets
            .iter()
            .map(|facet| {
                let [a, b, c] = facet.vertices;
                let pa = sub(&self.points[a], &self.interior);
                let pb = sub(&self.points[b], &self.interior);
                let pc = sub(&self.points[c], &self.interior);
                dot(&pa, &cross(&pb, &pc)).abs() / 6.0
            })
            .sum()
    }
}

fn extent(points: &[[f64; 3]]) -> f64 {
    (0..3)
        .map(|axis| {
            let (lo, hi) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
            hi - lo
        })
        .fold(0.0, f64::max)
}

/// Pick four points spanning a tetrahedron of non-zero volume.
fn initial_simplex(points: &[[f64; 3]], eps: f64) -> Result<[usize; 4]> {
    let i0 = argmax(points, |p| -p[0]);
    let p0 = points[i0];

    let i1 = argmax(points, |p| distance(p, &p0));
    let p1 = points[i1];
    if distance(&p0, &p1) <= eps {
        return Err(FeatureError::geometry("all atoms coincide"));
    }

    let axis = sub(&p1, &p0);
    let axis_len = norm(&axis);
    let i2 = argmax(points, |p| norm(&cross(&sub(p, &p0), &axis)) / axis_len);
    let p2 = points[i2];
    if norm(&cross(&sub(&p2, &p0), &axis)) / axis_len <= eps {
        return Err(FeatureError::geometry("atoms are collinear"));
    }

    let plane = cross(&axis, &sub(&p2, &p0));
    let plane_len = norm(&plane);
    let height = |p: &[f64; 3]| dot(&plane, &sub(p, &p0)).abs() / plane_len;
    let i3 = argmax(points, &height);
    if height(&points[i3]) <= eps {
        return Err(FeatureError::geometry("atoms are coplanar"));
    }

    Ok([i0, i1, i2, i3])
}

/// Index of the first point maximising `score`.
fn argmax<F: Fn(&[f64; 3]) -> f64>(points: &[[f64; 3]], score: F) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, p) in points.iter().enumerate() {
        let s = score(p);
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;

    fn cube_with_center() -> Vec<[f64; 3]> {
        let mut points = Vec::new();
        for x in [0.0, 10.0] {
            for y in [0.0, 10.0] {
                for z in [0.0, 10.0] {
                    points.push([x, y, z]);
                }
            }
        }
        points.push([5.0, 5.0, 5.0]);
        points
    }

    #[test]
    fn test_cube() {
        let hull = ConvexHull::new(&cube_with_center()).unwrap();
        assert_eq!(hull.vertices(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(!hull.is_vertex(8));
        assert_eq!(hull.facets().len(), 12);
        assert_relative_eq!(hull.volume(), 1000.0, epsilon = 1e-6);
        assert_relative_eq!(hull.point_depth(8), 5.0, epsilon = 1e-9);
        assert_eq!(hull.point_depth(3), 0.0);
    }

    #[test]
    fn test_normals_point_outward() {
        let points = cube_with_center();
        let hull = ConvexHull::new(&points).unwrap();
        for facet in hull.facets() {
            assert_relative_eq!(norm(facet.normal()), 1.0, epsilon = 1e-12);
            for p in &points {
                assert!(facet.signed_distance(p) <= 1e-6);
            }
        }
    }

    #[test]
    fn test_tetrahedron_interior_point() {
        let points = [
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
            [0.0, 0.0, 10.0],
            [1.0, 1.0, 1.0],
        ];
        let hull = ConvexHull::new(&points).unwrap();
        assert_eq!(hull.vertices(), &[0, 1, 2, 3]);
        // nearest faces are the three coordinate planes
        assert_relative_eq!(hull.point_depth(4), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_random_cloud_contains_all_points() {
        // deterministic pseudo-random cloud
        let mut state: u64 = 17;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (1u64 << 31) as f64) * 20.0 - 10.0
        };
        let points: Vec<[f64; 3]> = (0..300).map(|_| [next(), next(), next()]).collect();
        let hull = ConvexHull::new(&points).unwrap();
        for facet in hull.facets() {
            for p in &points {
                assert!(facet.signed_distance(p) <= 1e-6);
            }
        }
        // Euler's formula for a closed triangulated surface
        assert_eq!(hull.facets().len(), 2 * hull.vertices().len() - 4);
    }

    #[test]
    fn test_degenerate_inputs() {
        let three = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(ConvexHull::new(&three).unwrap_err().kind(), ErrorKind::Geometry);

        let same = [[1.0, 1.0, 1.0]; 5];
        assert_eq!(ConvexHull::new(&same).unwrap_err().kind(), ErrorKind::Geometry);

        let line: Vec<[f64; 3]> = (0..6).map(|i| [i as f64, 0.0, 0.0]).collect();
        assert_eq!(ConvexHull::new(&line).unwrap_err().kind(), ErrorKind::Geometry);

        let plane = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.5, 0.5, 0.0],
        ];
        assert_eq!(ConvexHull::new(&plane).unwrap_err().kind(), ErrorKind::Geometry);
    }
}
