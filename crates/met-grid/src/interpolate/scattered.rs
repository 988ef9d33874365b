//! Interpolation where the source or the target is a scattered point set.
//!
//! Nearest neighbor queries go through an R*-tree of the source points.
//! Linear interpolation triangulates the source points, indexes the triangle
//! envelopes in a second R*-tree and weights the three corners of the
//! enclosing triangle barycentrically. Targets outside the convex hull get NaN.

use delaunator::{triangulate, Point};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;
use tracing::debug;

use super::InterpolationOrder;

/// Tolerance on barycentric weights for points on triangle edges.
const EDGE_TOLERANCE: f64 = 1e-9;

type IndexedPoint = GeomWithData<[f64; 2], usize>;
type IndexedTriangle = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// How one target value is assembled from the source slice.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stencil {
    Nearest(usize),
    Linear([(usize, f64); 3]),
    Outside,
}

/// Precomputed stencils for every target point.
#[derive(Debug, Clone)]
pub struct ScatteredSampler {
    stencils: Vec<Stencil>,
}

impl ScatteredSampler {
    /// Build stencils from flat source coordinates to `(lat, lon)` targets.
    ///
    /// Source points with non-finite coordinates never contribute.
    pub fn new(
        source_lat: &[f64],
        source_lon: &[f64],
        targets: &[(f64, f64)],
        order: InterpolationOrder,
    ) -> Self {
        let points: Vec<IndexedPoint> = source_lat
            .iter()
            .zip(source_lon)
            .enumerate()
            .filter(|(_, (lat, lon))| lat.is_finite() && lon.is_finite())
            .map(|(i, (&lat, &lon))| GeomWithData::new([lat, lon], i))
            .collect();

        let stencils = match order {
            InterpolationOrder::Nearest => nearest_stencils(points, targets),
            InterpolationOrder::Bilinear => linear_stencils(&points, targets),
        };

        Self { stencils }
    }

    /// Number of targets this sampler produces.
    pub fn len(&self) -> usize {
        self.stencils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stencils.is_empty()
    }

    /// Apply the stencils to one flat source slice.
    pub fn sample(&self, slice: &[f64]) -> Vec<f64> {
        self.stencils
            .iter()
            .map(|stencil| match *stencil {
                Stencil::Nearest(i) => slice[i],
                Stencil::Linear(corners) => weighted_sum(slice, &corners),
                Stencil::Outside => f64::NAN,
            })
            .collect()
    }
}

/// Corners without weight are skipped, so their NaN does not leak into
/// targets lying on an edge or vertex.
fn weighted_sum(slice: &[f64], corners: &[(usize, f64); 3]) -> f64 {
    let mut value = 0.0;
    for &(i, w) in corners {
        if w == 0.0 {
            continue;
        }
        if slice[i].is_nan() {
            return f64::NAN;
        }
        value += slice[i] * w;
    }
    value
}

fn nearest_stencils(points: Vec<IndexedPoint>, targets: &[(f64, f64)]) -> Vec<Stencil> {
    let tree = RTree::bulk_load(points);

    targets
        .iter()
        .map(|&(lat, lon)| {
            let mut neighbors = tree.nearest_neighbor_iter_with_distance_2(&[lat, lon]);
            let Some((first, best_distance)) = neighbors.next() else {
                return Stencil::Outside;
            };

            // Equidistant neighbors resolve to the lowest source index
            let mut best = first.data;
            for (candidate, distance) in neighbors {
                if distance > best_distance {
                    break;
                }
                best = best.min(candidate.data);
            }
            Stencil::Nearest(best)
        })
        .collect()
}

fn linear_stencils(points: &[IndexedPoint], targets: &[(f64, f64)]) -> Vec<Stencil> {
    let vertices: Vec<Point> = points
        .iter()
        .map(|p| {
            let [lat, lon] = *p.geom();
            Point { x: lon, y: lat }
        })
        .collect();
    let triangulation = triangulate(&vertices);

    let triangles: Vec<[usize; 3]> = triangulation
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    if triangles.is_empty() {
        debug!(points = points.len(), "degenerate source points, no triangles");
        return vec![Stencil::Outside; targets.len()];
    }

    let envelopes: Vec<IndexedTriangle> = triangles
        .iter()
        .enumerate()
        .map(|(t, corners)| {
            let lats = corners.map(|c| vertices[c].y);
            let lons = corners.map(|c| vertices[c].x);
            let lower = [fold_min(&lats), fold_min(&lons)];
            let upper = [fold_max(&lats), fold_max(&lons)];
            GeomWithData::new(Rectangle::from_corners(lower, upper), t)
        })
        .collect();
    let tree = RTree::bulk_load(envelopes);

    debug!(triangles = triangles.len(), "triangulated source points");

    targets
        .iter()
        .map(|&(lat, lon)| {
            for candidate in tree.locate_all_at_point(&[lat, lon]) {
                let corners = triangles[candidate.data];
                if let Some(weights) = barycentric(&vertices, corners, lon, lat) {
                    return Stencil::Linear([
                        (points[corners[0]].data, weights[0]),
                        (points[corners[1]].data, weights[1]),
                        (points[corners[2]].data, weights[2]),
                    ]);
                }
            }
            Stencil::Outside
        })
        .collect()
}

/// Barycentric weights of `(x, y)` in the triangle, or `None` if outside.
fn barycentric(vertices: &[Point], corners: [usize; 3], x: f64, y: f64) -> Option<[f64; 3]> {
    let a = &vertices[corners[0]];
    let b = &vertices[corners[1]];
    let c = &vertices[corners[2]];

    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if det == 0.0 {
        return None;
    }

    let wa = ((b.y - c.y) * (x - c.x) + (c.x - b.x) * (y - c.y)) / det;
    let wb = ((c.y - a.y) * (x - c.x) + (a.x - c.x) * (y - c.y)) / det;
    let wc = 1.0 - wa - wb;

    if wa < -EDGE_TOLERANCE || wb < -EDGE_TOLERANCE || wc < -EDGE_TOLERANCE {
        return None;
    }
    Some([wa, wb, wc].map(|w| if w.abs() <= EDGE_TOLERANCE { 0.0 } else { w }))
}

fn fold_min(values: &[f64; 3]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64; 3]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
