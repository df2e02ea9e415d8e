//! Side-by-side profiling of two tilings over the same points.
//!
//! For each tiling the profile records how points spread over cells, how the
//! occupied cells break into connected groups, how fast k-rings grow, and how
//! well the tiling covers a reference circle.

use crate::compute::coverage::circle_coverage;
use crate::compute::grouping::{CellGroupAnalyzer, GroupStats};
use crate::compute::validation::validate_points;
use crate::config::Config;
use crate::error::Result;
use crate::tiling::Tiling;
use geo::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileOptions {
    /// Center of the reference circle
    pub center: Point,
    /// Radius of the reference circle in meters
    pub radius_m: f64,
    pub max_coverage_rings: u32,
    /// Largest k for which the ring size is recorded
    pub max_k: u32,
}

impl ProfileOptions {
    pub fn new(center: Point, radius_m: f64) -> Self {
        Self {
            center,
            radius_m,
            max_coverage_rings: 20,
            max_k: 5,
        }
    }

    pub fn from_config(config: &Config, center: Point, radius_m: f64) -> Self {
        Self {
            max_coverage_rings: config.max_coverage_rings,
            ..Self::new(center, radius_m)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub cell_count: usize,
    pub covered_area_km2: f64,
    pub circle_area_km2: f64,
    pub ratio: f64,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingProfile {
    pub tiling: String,
    pub resolution: u8,
    pub points: usize,
    pub unique_cells: usize,
    pub mean_points_per_cell: f64,
    pub groups: GroupStats,
    /// Cells within distance k of the center cell, for k = 1..=max_k
    pub ring_sizes: Vec<usize>,
    pub coverage: CoverageSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub first: TilingProfile,
    pub second: TilingProfile,
}

impl ComparisonReport {
    /// Ratio of the second tiling's unique cell count to the first's.
    pub fn cell_count_ratio(&self) -> f64 {
        if self.first.unique_cells == 0 {
            0.0
        } else {
            self.second.unique_cells as f64 / self.first.unique_cells as f64
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Profiles one tiling over `points`.
pub fn profile_tiling<T: Tiling + ?Sized>(
    tiling: &T,
    points: &[Point],
    options: &ProfileOptions,
) -> Result<TilingProfile> {
    validate_points(points)?;

    let mut counts: FxHashMap<T::Cell, usize> = FxHashMap::default();
    let mut occupied = Vec::new();
    for point in points {
        let cell = tiling.cell_at(point)?;
        let count = counts.entry(cell.clone()).or_insert(0);
        if *count == 0 {
            occupied.push(cell);
        }
        *count += 1;
    }

    let groups = CellGroupAnalyzer::new().group_with_oracle(occupied, tiling)?;

    let origin = tiling.cell_at(&options.center)?;
    let mut ring_sizes = Vec::with_capacity(options.max_k as usize);
    for k in 1..=options.max_k {
        ring_sizes.push(tiling.neighbors(&origin, k)?.len());
    }

    let coverage = circle_coverage(
        tiling,
        &options.center,
        options.radius_m,
        options.max_coverage_rings,
    )?;

    let unique_cells = counts.len();
    Ok(TilingProfile {
        tiling: tiling.name().to_string(),
        resolution: tiling.resolution(),
        points: points.len(),
        unique_cells,
        mean_points_per_cell: if unique_cells == 0 {
            0.0
        } else {
            points.len() as f64 / unique_cells as f64
        },
        groups: GroupStats::from_groups(&groups),
        ring_sizes,
        coverage: CoverageSummary {
            cell_count: coverage.cell_count(),
            covered_area_km2: coverage.covered_area_km2,
            circle_area_km2: coverage.circle_area_km2,
            ratio: coverage.ratio(),
            truncated: coverage.truncated,
        },
    })
}

/// Profiles two tilings over the same points.
pub fn compare_tilings<A, B>(
    first: &A,
    second: &B,
    points: &[Point],
    options: &ProfileOptions,
) -> Result<ComparisonReport>
where
    A: Tiling + ?Sized,
    B: Tiling + ?Sized,
{
    let report = ComparisonReport {
        first: profile_tiling(first, points, options)?,
        second: profile_tiling(second, points, options)?,
    };
    log::debug!(
        "{} vs {}: {} vs {} cells",
        report.first.tiling,
        report.second.tiling,
        report.first.unique_cells,
        report.second.unique_cells
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::{GeohashGrid, GridMetric, SquareGrid};

    fn cluster() -> Vec<Point> {
        let mut points = Vec::new();
        for i in 0..30 {
            for j in 0..30 {
                points.push(Point::new(126.97 + i as f64 * 0.0004, 37.56 + j as f64 * 0.0004));
            }
        }
        // A far-away outlier forms its own group.
        points.push(Point::new(127.2, 37.7));
        points
    }

    #[test]
    fn test_profile_square_grid() {
        let grid = SquareGrid::new(9).unwrap();
        let points = cluster();
        let options = ProfileOptions::new(Point::new(126.976, 37.566), 500.0);
        let profile = profile_tiling(&grid, &points, &options).unwrap();

        assert_eq!(profile.tiling, "square");
        assert_eq!(profile.points, points.len());
        assert_eq!(profile.groups.cell_count, profile.unique_cells);
        assert_eq!(profile.groups.group_count, 2);
        assert_eq!(profile.groups.singletons, 1);
        assert_eq!(profile.ring_sizes, vec![5, 13, 25, 41, 61]);
        assert!(!profile.coverage.truncated);
        assert!(profile.mean_points_per_cell > 1.0);
    }

    #[test]
    fn test_compare_two_square_metrics() {
        let points = cluster();
        let manhattan = SquareGrid::new(9).unwrap();
        let chebyshev = SquareGrid::new(9).unwrap().with_metric(GridMetric::Chebyshev);
        let options = ProfileOptions::new(Point::new(126.976, 37.566), 500.0);

        let report = compare_tilings(&manhattan, &chebyshev, &points, &options).unwrap();
        assert_eq!(report.first.unique_cells, report.second.unique_cells);
        assert_eq!(report.cell_count_ratio(), 1.0);
        assert_eq!(report.second.ring_sizes[0], 9);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"ring_sizes\""));
    }

    #[test]
    fn test_profile_geohash_and_empty_points() {
        let grid = GeohashGrid::new(6).unwrap();
        let options = ProfileOptions::new(Point::new(126.976, 37.566), 2_000.0);
        let profile = profile_tiling(&grid, &[], &options).unwrap();
        assert_eq!(profile.unique_cells, 0);
        assert_eq!(profile.mean_points_per_cell, 0.0);
        assert_eq!(profile.groups.group_count, 0);
        assert_eq!(profile.ring_sizes[0], 9);
    }

    #[test]
    fn test_profile_reports_bad_point_index() {
        let grid = SquareGrid::new(9).unwrap();
        let mut points = cluster();
        points.insert(3, Point::new(126.97, 95.0));
        let options = ProfileOptions::new(Point::new(126.976, 37.566), 500.0);

        let err = profile_tiling(&grid, &points, &options).unwrap_err();
        assert!(err.to_string().contains("index 3"), "{}", err);
    }
}
