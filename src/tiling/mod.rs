//! Tilings of the globe and the adjacency oracles they expose.
//!
//! Grouping only needs [`AdjacencyOracle`]: "given a cell, which cells lie
//! within `k` steps of it". [`Tiling`] adds the geographic side (point to cell,
//! center, boundary, area) used by region sampling, coverage and the
//! comparison report.
//!
//! Implementations:
//! - [`SquareGrid`]: lat/lon aligned squares sized to match hexagon area
//! - [`HexGrid`]: H3 hexagons via `h3o` (feature `hex`)
//! - [`GeohashGrid`]: geohash rectangles
//! - [`CachedTiling`]: memoising wrapper around any of the above

pub mod cached;
pub mod geohash_grid;
#[cfg(feature = "hex")]
pub mod hex;
pub mod square;

use crate::error::Result;
use geo::{GeodesicArea, Point, Polygon};
use std::fmt::Debug;
use std::hash::Hash;

pub use cached::{CacheStats, CachedTiling};
pub use geohash_grid::GeohashGrid;
#[cfg(feature = "hex")]
pub use hex::HexGrid;
pub use square::{GridMetric, SquareCell, SquareGrid, SquareSizing};

/// Neighbor lookup for a tiling.
pub trait AdjacencyOracle {
    type Cell: Clone + Eq + Hash + Debug;

    /// All cells within ring distance `k` of `cell`, including `cell` itself.
    fn neighbors(&self, cell: &Self::Cell, k: u32) -> Result<Vec<Self::Cell>>;
}

/// A tiling that can place geographic points into cells.
///
/// Points follow the `geo` convention: `x` is longitude, `y` is latitude.
pub trait Tiling: AdjacencyOracle {
    /// Short human-readable name used in reports.
    fn name(&self) -> &'static str;

    /// Resolution used by [`Tiling::cell_at`].
    fn resolution(&self) -> u8;

    fn cell_at(&self, point: &Point) -> Result<Self::Cell>;

    fn center(&self, cell: &Self::Cell) -> Result<Point>;

    fn boundary(&self, cell: &Self::Cell) -> Result<Polygon>;

    /// Area of `cell` in square kilometers. Defaults to the geodesic area of
    /// its boundary.
    fn cell_area_km2(&self, cell: &Self::Cell) -> Result<f64> {
        Ok(self.boundary(cell)?.geodesic_area_unsigned() / 1_000_000.0)
    }
}

impl<O: AdjacencyOracle + ?Sized> AdjacencyOracle for &O {
    type Cell = O::Cell;

    fn neighbors(&self, cell: &Self::Cell, k: u32) -> Result<Vec<Self::Cell>> {
        (**self).neighbors(cell, k)
    }
}

impl<T: Tiling + ?Sized> Tiling for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resolution(&self) -> u8 {
        (**self).resolution()
    }

    fn cell_at(&self, point: &Point) -> Result<Self::Cell> {
        (**self).cell_at(point)
    }

    fn center(&self, cell: &Self::Cell) -> Result<Point> {
        (**self).center(cell)
    }

    fn boundary(&self, cell: &Self::Cell) -> Result<Polygon> {
        (**self).boundary(cell)
    }

    fn cell_area_km2(&self, cell: &Self::Cell) -> Result<f64> {
        (**self).cell_area_km2(cell)
    }
}
