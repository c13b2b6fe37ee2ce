//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! polygon splits during construction.

use crate::clip::classify_polygon;
use crate::float_types::Real;
use crate::plane::Classification;
use crate::polygon::Polygon;

/// Strategy for selecting which polygon's plane to use for splitting.
pub trait PlaneSelector {
    /// Returns the index of the polygon whose plane should split `polygons`.
    ///
    /// Returns `None` only if the slice is empty.
    fn select(&self, polygons: &[Polygon], epsilon: Real) -> Option<usize>;
}

/// Selects the first polygon in the list.
///
/// Fast and deterministic, but the tree shape depends on input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select(&self, polygons: &[Polygon], _epsilon: Real) -> Option<usize> {
        (!polygons.is_empty()).then_some(0)
    }
}

/// Scores candidate planes by `span_weight * spanning + balance_weight * |front - back|`
/// and picks the lowest score. Only the first `max_candidates` polygons are tried.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSelector {
    pub max_candidates: usize,
    pub span_weight: Real,
    pub balance_weight: Real,
}

impl Default for BalancedSelector {
    fn default() -> Self {
        Self {
            max_candidates: 20,
            span_weight: 8.0,
            balance_weight: 1.0,
        }
    }
}

impl BalancedSelector {
    fn score(&self, candidate: &Polygon, polygons: &[Polygon], epsilon: Real) -> Real {
        let mut front = 0i64;
        let mut back = 0i64;
        let mut spanning = 0i64;

        for polygon in polygons {
            match classify_polygon(polygon, candidate.plane(), epsilon) {
                Classification::Front => front += 1,
                Classification::Back => back += 1,
                Classification::Spanning => spanning += 1,
                Classification::Coplanar => {}
            }
        }

        self.span_weight * spanning as Real + self.balance_weight * (front - back).abs() as Real
    }
}

impl PlaneSelector for BalancedSelector {
    fn select(&self, polygons: &[Polygon], epsilon: Real) -> Option<usize> {
        let mut best: Option<(usize, Real)> = None;

        for (i, candidate) in polygons.iter().take(self.max_candidates.max(1)).enumerate() {
            let score = self.score(candidate, polygons, epsilon);
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((i, score));
            }
        }

        best.map(|(i, _)| i)
    }
}
