//! Covering a circle with cells.
//!
//! Starting from the cell containing the center, k-rings are grown one step
//! at a time. A cell is kept when its center lies within the radius
//! (haversine distance). The search stops after the first ring that adds no
//! qualifying cell, or when `max_rings` is reached.

use crate::compute::validation::validate_geographic_point;
use crate::error::{CellGroupError, Result};
use crate::tiling::Tiling;
use geo::{Distance, Haversine, Point};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Cells covering a circle, plus the areas needed to judge the fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage<C> {
    pub cells: Vec<C>,
    /// Sum of the areas of `cells`, km²
    pub covered_area_km2: f64,
    /// Area of the circle itself, km²
    pub circle_area_km2: f64,
    /// Rings explored before stopping
    pub rings_searched: u32,
    /// Whether the search stopped at `max_rings` rather than converging
    pub truncated: bool,
}

impl<C> Coverage<C> {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Covered area over circle area; above 1 means over-coverage.
    pub fn ratio(&self) -> f64 {
        if self.circle_area_km2 > 0.0 {
            self.covered_area_km2 / self.circle_area_km2
        } else {
            0.0
        }
    }
}

/// Covers the circle of `radius_m` meters around `center`.
pub fn circle_coverage<T: Tiling + ?Sized>(
    tiling: &T,
    center: &Point,
    radius_m: f64,
    max_rings: u32,
) -> Result<Coverage<T::Cell>> {
    validate_geographic_point(center)?;
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(CellGroupError::InvalidInput(format!(
            "Radius must be non-negative and finite, got: {}",
            radius_m
        )));
    }

    let origin = tiling.cell_at(center)?;
    let mut seen = FxHashSet::default();
    let mut cells = Vec::new();
    let mut rings_searched = 0;
    let mut truncated = true;

    for k in 0..=max_rings {
        rings_searched = k;
        let mut added = 0;
        for cell in tiling.neighbors(&origin, k)? {
            if !seen.insert(cell.clone()) {
                continue;
            }
            let cell_center = tiling.center(&cell)?;
            if Haversine.distance(*center, cell_center) <= radius_m {
                cells.push(cell);
                added += 1;
            }
        }

        // Ring 0 may add nothing when the center cell's own center is outside
        // a tiny radius; keep looking one more ring in that case.
        if added == 0 && k > 0 {
            truncated = false;
            break;
        }
    }

    if truncated {
        log::warn!(
            "{} coverage of {} m radius stopped at max_rings = {}",
            tiling.name(),
            radius_m,
            max_rings
        );
    }

    let mut covered_area_km2 = 0.0;
    for cell in &cells {
        covered_area_km2 += tiling.cell_area_km2(cell)?;
    }
    let radius_km = radius_m / 1000.0;

    log::debug!(
        "{} coverage: {} cells after {} rings",
        tiling.name(),
        cells.len(),
        rings_searched
    );

    Ok(Coverage {
        cells,
        covered_area_km2,
        circle_area_km2: std::f64::consts::PI * radius_km * radius_km,
        rings_searched,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::{GridMetric, SquareGrid};

    #[test]
    fn test_square_coverage_of_one_km() {
        let grid = SquareGrid::new(9).unwrap().with_metric(GridMetric::Chebyshev);
        let center = Point::new(126.9780, 37.5665);
        let coverage = circle_coverage(&grid, &center, 1_000.0, 20).unwrap();

        assert!(!coverage.truncated);
        assert!(coverage.cell_count() > 20);
        assert!((coverage.circle_area_km2 - std::f64::consts::PI).abs() < 1e-9);
        let ratio = coverage.ratio();
        assert!(ratio > 0.7 && ratio < 1.3, "ratio = {}", ratio);

        for cell in &coverage.cells {
            let c = grid.center(cell).unwrap();
            assert!(Haversine.distance(center, c) <= 1_000.0);
        }
    }

    #[test]
    fn test_truncated_when_rings_exhausted() {
        let grid = SquareGrid::new(10).unwrap();
        let center = Point::new(126.9780, 37.5665);
        let coverage = circle_coverage(&grid, &center, 5_000.0, 2).unwrap();
        assert!(coverage.truncated);
        assert_eq!(coverage.rings_searched, 2);
    }

    #[test]
    fn test_zero_radius() {
        let grid = SquareGrid::new(8).unwrap();
        let center = Point::new(126.9780, 37.5665);
        let coverage = circle_coverage(&grid, &center, 0.0, 5).unwrap();
        assert!(coverage.cells.is_empty());
        assert_eq!(coverage.ratio(), 0.0);
        assert!(!coverage.truncated);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let grid = SquareGrid::new(8).unwrap();
        let center = Point::new(126.9780, 37.5665);
        assert!(circle_coverage(&grid, &center, -1.0, 5).is_err());
        assert!(circle_coverage(&grid, &center, f64::NAN, 5).is_err());
        assert!(circle_coverage(&grid, &Point::new(500.0, 0.0), 10.0, 5).is_err());
    }
}
