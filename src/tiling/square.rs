//! Square grid used as a comparison baseline for hexagonal tilings.
//!
//! Cells are axis-aligned in lon/lat degrees. A point maps to
//! `(floor(lon / size), floor(lat / size))` where `size` depends on the
//! resolution through a [`SquareSizing`] rule. The default rule sizes each
//! square so its nominal area matches the mean H3 hexagon area at the same
//! resolution, which makes cell counts between the two tilings comparable.

use crate::compute::validation::validate_resolution;
use crate::config::Config;
use crate::error::{CellGroupError, Result};
use crate::tiling::{AdjacencyOracle, Tiling};
use geo::{Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest supported resolution, aligned with H3.
pub const MAX_RESOLUTION: u8 = 15;

/// Largest k-ring, in cells, that [`SquareGrid::neighbors`] will build.
pub const MAX_RING_CELLS: usize = 25_000_000;

/// Kilometers spanned by one degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Mean H3 hexagon area in km² for resolutions 0 through 15.
const MEAN_HEXAGON_AREA_KM2: [f64; 16] = [
    4_357_449.416_078_381,
    609_788.441_794_133,
    86_801.780_398_997,
    12_393.434_655_088,
    1_770.347_654_491,
    252.903_858_182,
    36.129_062_164,
    5.161_293_360,
    0.737_327_598,
    0.105_332_513,
    0.015_047_502,
    0.002_149_643,
    0.000_307_092,
    0.000_043_870,
    0.000_006_267,
    0.000_000_895,
];

/// Distance used to build the square grid's k-ring.
///
/// Manhattan rings hold `2k² + 2k + 1` cells, Chebyshev rings `(2k + 1)²`.
/// A hexagonal ring holds `3k² + 3k + 1`, which sits between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMetric {
    /// 4-connected steps
    #[default]
    Manhattan,
    /// 8-connected steps
    Chebyshev,
}

impl GridMetric {
    pub fn distance(self, dx: i64, dy: i64) -> u64 {
        match self {
            GridMetric::Manhattan => dx.unsigned_abs().saturating_add(dy.unsigned_abs()),
            GridMetric::Chebyshev => dx.unsigned_abs().max(dy.unsigned_abs()),
        }
    }

    /// Number of cells within distance `k`, center included, or `None` when
    /// the count does not fit in `usize`.
    pub fn ring_size(self, k: u32) -> Option<usize> {
        let k = usize::try_from(k).ok()?;
        let side = k.checked_mul(2)?.checked_add(1)?;
        match self {
            GridMetric::Manhattan => k.checked_mul(k)?.checked_mul(2)?.checked_add(side),
            GridMetric::Chebyshev => side.checked_mul(side),
        }
    }
}

/// How the square side length shrinks with resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SquareSizing {
    /// Side = sqrt(mean H3 hexagon area at the resolution).
    #[default]
    EqualArea,
    /// Side = `base_degrees / 2^resolution`.
    Halving { base_degrees: f64 },
}

impl SquareSizing {
    /// Side length in degrees at `resolution`. Callers validate the resolution.
    pub fn cell_size(&self, resolution: u8) -> f64 {
        match *self {
            SquareSizing::EqualArea => {
                let idx = usize::from(resolution.min(MAX_RESOLUTION));
                MEAN_HEXAGON_AREA_KM2[idx].sqrt() / KM_PER_DEGREE
            }
            SquareSizing::Halving { base_degrees } => base_degrees / 2f64.powi(resolution as i32),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if let SquareSizing::Halving { base_degrees } = *self
            && !(base_degrees.is_finite() && base_degrees > 0.0)
        {
            return Err(format!(
                "Square base cell size must be positive and finite, got: {}",
                base_degrees
            ));
        }
        Ok(())
    }
}

/// A square grid cell: integer grid coordinates plus resolution.
///
/// Renders as `"{x}_{y}_{resolution}"` and parses back from the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquareCell {
    pub x: i64,
    pub y: i64,
    pub resolution: u8,
}

impl SquareCell {
    pub fn new(x: i64, y: i64, resolution: u8) -> Self {
        Self { x, y, resolution }
    }

    /// Cell shifted by `(dx, dy)`.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate overflows `i64`; use
    /// [`SquareCell::checked_offset`] for cells near the edge of the grid.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        match self.checked_offset(dx, dy) {
            Some(cell) => cell,
            None => panic!("offset ({}, {}) overflows cell {}", dx, dy, self),
        }
    }

    /// Cell shifted by `(dx, dy)`, or `None` if a coordinate leaves the `i64`
    /// range.
    pub fn checked_offset(&self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.resolution,
        ))
    }

    /// Grid distance to `other`, or `None` across resolutions or when the
    /// coordinate difference overflows `i64`.
    pub fn grid_distance(&self, other: &SquareCell, metric: GridMetric) -> Option<u64> {
        if self.resolution != other.resolution {
            return None;
        }
        let dx = other.x.checked_sub(self.x)?;
        let dy = other.y.checked_sub(self.y)?;
        Some(metric.distance(dx, dy))
    }
}

impl fmt::Display for SquareCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.x, self.y, self.resolution)
    }
}

impl FromStr for SquareCell {
    type Err = CellGroupError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('_');
        let (Some(x), Some(y), Some(res), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CellGroupError::InvalidCell(format!(
                "expected \"x_y_resolution\", got: {}",
                s
            )));
        };

        let bad = |what: &str| CellGroupError::InvalidCell(format!("bad {} in {}", what, s));
        let cell = SquareCell::new(
            x.parse().map_err(|_| bad("x"))?,
            y.parse().map_err(|_| bad("y"))?,
            res.parse().map_err(|_| bad("resolution"))?,
        );
        validate_resolution(cell.resolution, MAX_RESOLUTION)?;
        Ok(cell)
    }
}

/// `floor(v)` as a grid index, or `None` outside the `i64` range.
fn grid_index(v: f64) -> Option<i64> {
    let v = v.floor();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    (v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
}

/// Square tiling and its adjacency oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareGrid {
    resolution: u8,
    metric: GridMetric,
    sizing: SquareSizing,
}

impl SquareGrid {
    pub fn new(resolution: u8) -> Result<Self> {
        validate_resolution(resolution, MAX_RESOLUTION)?;
        Ok(Self {
            resolution,
            metric: GridMetric::default(),
            sizing: SquareSizing::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.square_sizing.validate().map_err(CellGroupError::InvalidInput)?;
        Ok(Self::new(config.resolution)?
            .with_metric(config.square_metric)
            .with_sizing(config.square_sizing))
    }

    pub fn with_metric(mut self, metric: GridMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_sizing(mut self, sizing: SquareSizing) -> Self {
        assert!(
            sizing.validate().is_ok(),
            "Square base cell size must be positive and finite"
        );
        self.sizing = sizing;
        self
    }

    pub fn metric(&self) -> GridMetric {
        self.metric
    }

    pub fn sizing(&self) -> SquareSizing {
        self.sizing
    }

    /// Side length in degrees at `resolution`.
    pub fn cell_size(&self, resolution: u8) -> f64 {
        self.sizing.cell_size(resolution)
    }

    /// Maps a point to its grid cell at `resolution`.
    ///
    /// Latitude and longitude are not range checked. Finite coordinates whose
    /// grid index does not fit in `i64` are rejected rather than clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellgroup::SquareGrid;
    ///
    /// let grid = SquareGrid::new(8)?;
    /// let a = grid.cell_id(37.5665, 126.9780, 8)?;
    /// let b = grid.cell_id(37.5666, 126.9781, 8)?;
    /// assert_eq!(a, b);
    /// # Ok::<(), cellgroup::CellGroupError>(())
    /// ```
    pub fn cell_id(&self, latitude: f64, longitude: f64, resolution: u8) -> Result<SquareCell> {
        validate_resolution(resolution, MAX_RESOLUTION)?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CellGroupError::InvalidInput(format!(
                "Coordinates must be finite, got: ({}, {})",
                latitude, longitude
            )));
        }

        let size = self.cell_size(resolution);
        match (grid_index(longitude / size), grid_index(latitude / size)) {
            (Some(x), Some(y)) => Ok(SquareCell::new(x, y, resolution)),
            _ => Err(CellGroupError::InvalidInput(format!(
                "Coordinates ({}, {}) fall outside the grid at resolution {}",
                latitude, longitude, resolution
            ))),
        }
    }

    /// Bounds of `cell` in degrees.
    pub fn cell_rect(&self, cell: &SquareCell) -> Rect {
        let size = self.cell_size(cell.resolution);
        let (min_x, min_y) = (cell.x as f64 * size, cell.y as f64 * size);
        Rect::new(
            coord! { x: min_x, y: min_y },
            coord! { x: min_x + size, y: min_y + size },
        )
    }
}

impl AdjacencyOracle for SquareGrid {
    type Cell = SquareCell;

    fn neighbors(&self, cell: &SquareCell, k: u32) -> Result<Vec<SquareCell>> {
        validate_resolution(cell.resolution, MAX_RESOLUTION)?;
        let size = self
            .metric
            .ring_size(k)
            .filter(|&n| n <= MAX_RING_CELLS)
            .ok_or_else(|| {
                CellGroupError::InvalidInput(format!(
                    "k-ring of k = {} exceeds {} cells",
                    k, MAX_RING_CELLS
                ))
            })?;

        let k = i64::from(k);
        let mut cells = Vec::with_capacity(size);
        for dx in -k..=k {
            for dy in -k..=k {
                if self.metric.distance(dx, dy) > k as u64 {
                    continue;
                }
                let neighbor = cell.checked_offset(dx, dy).ok_or_else(|| {
                    CellGroupError::InvalidCell(format!(
                        "k-ring of {} at k = {} leaves the grid",
                        cell, k
                    ))
                })?;
                cells.push(neighbor);
            }
        }
        Ok(cells)
    }
}

impl Tiling for SquareGrid {
    fn name(&self) -> &'static str {
        "square"
    }

    fn resolution(&self) -> u8 {
        self.resolution
    }

    fn cell_at(&self, point: &Point) -> Result<SquareCell> {
        self.cell_id(point.y(), point.x(), self.resolution)
    }

    fn center(&self, cell: &SquareCell) -> Result<Point> {
        Ok(self.cell_rect(cell).center().into())
    }

    fn boundary(&self, cell: &SquareCell) -> Result<Polygon> {
        Ok(self.cell_rect(cell).to_polygon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_points_share_a_cell() {
        let grid = SquareGrid::new(8).unwrap();
        let a = grid.cell_id(37.5665, 126.9780, 8).unwrap();
        let b = grid.cell_id(37.5666, 126.9781, 8).unwrap();
        assert_eq!(a, b);

        let size = grid.cell_size(8);
        let c = grid.cell_id(37.5665, 126.9780 + size, 8).unwrap();
        assert_ne!(a, c);
        assert_eq!(c, a.offset(1, 0));
    }

    #[test]
    fn test_halving_sizing_matches_script_grid() {
        let grid = SquareGrid::new(8)
            .unwrap()
            .with_sizing(SquareSizing::Halving { base_degrees: 0.1 });
        assert!((grid.cell_size(8) - 0.1 / 256.0).abs() < 1e-15);

        let a = grid.cell_id(37.5665, 126.9780, 8).unwrap();
        let b = grid.cell_id(37.5666, 126.9781, 8).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.x, 325_063);
        assert_eq!(a.y, 96_170);

        let far = grid.cell_id(37.5665, 126.9780 + 1.5 * grid.cell_size(8), 8).unwrap();
        assert_ne!(a, far);
    }

    #[test]
    fn test_cell_size_decreases_with_resolution() {
        for sizing in [SquareSizing::EqualArea, SquareSizing::Halving { base_degrees: 0.1 }] {
            for res in 1..=MAX_RESOLUTION {
                assert!(sizing.cell_size(res) < sizing.cell_size(res - 1));
            }
        }
    }

    #[test]
    fn test_floor_for_negative_coordinates() {
        let grid = SquareGrid::new(8).unwrap();
        let size = grid.cell_size(8);
        let cell = grid.cell_id(-0.5 * size, -0.5 * size, 8).unwrap();
        assert_eq!((cell.x, cell.y), (-1, -1));

        let origin = grid.cell_id(0.0, 0.0, 8).unwrap();
        assert_eq!((origin.x, origin.y), (0, 0));
    }

    #[test]
    fn test_rejects_non_finite_and_bad_resolution() {
        let grid = SquareGrid::new(8).unwrap();
        assert!(grid.cell_id(f64::NAN, 126.9, 8).is_err());
        assert!(grid.cell_id(37.5, f64::INFINITY, 8).is_err());
        assert!(matches!(
            grid.cell_id(37.5, 126.9, 16),
            Err(CellGroupError::InvalidResolution { .. })
        ));
        assert!(SquareGrid::new(16).is_err());
    }

    #[test]
    fn test_ring_sizes() {
        let cell = SquareCell::new(10, -4, 8);
        for metric in [GridMetric::Manhattan, GridMetric::Chebyshev] {
            let grid = SquareGrid::new(8).unwrap().with_metric(metric);
            for k in 0..=5 {
                let ring = grid.neighbors(&cell, k).unwrap();
                assert_eq!(Some(ring.len()), metric.ring_size(k));
                assert!(ring.contains(&cell));
            }
        }

        let grid = SquareGrid::new(8).unwrap();
        let one = grid.neighbors(&cell, 1).unwrap();
        assert!(one.contains(&cell.offset(1, 0)));
        assert!(!one.contains(&cell.offset(1, 1)));
    }

    #[test]
    fn test_ring_size_overflow() {
        assert_eq!(GridMetric::Manhattan.ring_size(u32::MAX), None);
        assert_eq!(GridMetric::Chebyshev.ring_size(u32::MAX), None);

        let grid = SquareGrid::new(8).unwrap().with_metric(GridMetric::Chebyshev);
        let cell = SquareCell::new(0, 0, 8);
        assert!(matches!(
            grid.neighbors(&cell, u32::MAX),
            Err(CellGroupError::InvalidInput(_))
        ));
        // 6001² cells is past the ring limit
        assert!(grid.neighbors(&cell, 3_000).is_err());
    }

    #[test]
    fn test_offsets_at_grid_edge() {
        let edge = SquareCell::new(i64::MAX, i64::MIN, 8);
        assert_eq!(edge.checked_offset(1, 0), None);
        assert_eq!(edge.checked_offset(0, -1), None);
        assert_eq!(
            edge.checked_offset(-1, 1),
            Some(SquareCell::new(i64::MAX - 1, i64::MIN + 1, 8))
        );
        assert_eq!(edge.grid_distance(&SquareCell::new(0, 0, 8), GridMetric::Manhattan), None);
    }

    #[test]
    fn test_neighbors_agree_with_cell_id() {
        let grid = SquareGrid::new(9).unwrap();
        let cell = grid.cell_id(37.5665, 126.9780, 9).unwrap();
        let center = grid.center(&cell).unwrap();
        let size = grid.cell_size(9);

        let east = grid.cell_id(center.y(), center.x() + size, 9).unwrap();
        let north = grid.cell_id(center.y() + size, center.x(), 9).unwrap();
        let ring = grid.neighbors(&cell, 1).unwrap();
        assert!(ring.contains(&east));
        assert!(ring.contains(&north));
        assert_eq!(grid.cell_at(&center).unwrap(), cell);
    }

    #[test]
    fn test_display_and_parse() {
        let cell = SquareCell::new(-12, 345, 8);
        assert_eq!(cell.to_string(), "-12_345_8");
        assert_eq!("-12_345_8".parse::<SquareCell>().unwrap(), cell);

        assert!("1_2".parse::<SquareCell>().is_err());
        assert!("1_2_3_4".parse::<SquareCell>().is_err());
        assert!("a_2_3".parse::<SquareCell>().is_err());
        assert!("1_2_99".parse::<SquareCell>().is_err());
    }

    #[test]
    fn test_grid_distance() {
        let a = SquareCell::new(0, 0, 8);
        let b = SquareCell::new(2, -3, 8);
        assert_eq!(a.grid_distance(&b, GridMetric::Manhattan), Some(5));
        assert_eq!(a.grid_distance(&b, GridMetric::Chebyshev), Some(3));
        assert_eq!(a.grid_distance(&SquareCell::new(0, 0, 9), GridMetric::Manhattan), None);
    }

    #[test]
    fn test_boundary_and_area() {
        let grid = SquareGrid::new(8).unwrap();
        let cell = grid.cell_id(37.5665, 126.9780, 8).unwrap();
        let boundary = grid.boundary(&cell).unwrap();
        assert_eq!(boundary.exterior().0.len(), 5);

        // Lon/lat squares shrink east-west with latitude, so the geodesic area
        // is below the nominal hexagon area.
        let area = grid.cell_area_km2(&cell).unwrap();
        assert!(area > 0.5 && area < 0.74, "area = {}", area);
    }
}
