//! H3 hexagonal tiling backed by `h3o`.
//!
//! All hexagon math (projection, index encoding, grid disks, hierarchy) is
//! delegated to `h3o`; this module only adapts it to [`Tiling`].

use crate::compute::validation::{validate_geographic_point, validate_resolution};
use crate::config::Config;
use crate::error::{CellGroupError, Result};
use crate::tiling::{AdjacencyOracle, Tiling};
use geo::{Coord, LineString, Point, Polygon};
use h3o::{CellIndex, LatLng, Resolution};

/// Highest H3 resolution.
pub const MAX_RESOLUTION: u8 = 15;

/// H3 tiling at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexGrid {
    resolution: Resolution,
}

fn to_resolution(resolution: u8) -> Result<Resolution> {
    validate_resolution(resolution, MAX_RESOLUTION)?;
    Resolution::try_from(resolution).map_err(|_| CellGroupError::InvalidResolution {
        resolution,
        max: MAX_RESOLUTION,
    })
}

impl HexGrid {
    pub fn new(resolution: u8) -> Result<Self> {
        Ok(Self {
            resolution: to_resolution(resolution)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.resolution)
    }

    /// Maps a point to its H3 cell at `resolution`.
    pub fn cell_id(&self, latitude: f64, longitude: f64, resolution: u8) -> Result<CellIndex> {
        let resolution = to_resolution(resolution)?;
        let latlng = LatLng::new(latitude, longitude).map_err(|e| {
            CellGroupError::InvalidInput(format!(
                "Invalid coordinates ({}, {}): {}",
                latitude, longitude, e
            ))
        })?;
        Ok(latlng.to_cell(resolution))
    }

    /// Ancestor of `cell` at a coarser `resolution`.
    pub fn parent(&self, cell: &CellIndex, resolution: u8) -> Result<CellIndex> {
        let target = to_resolution(resolution)?;
        cell.parent(target).ok_or_else(|| {
            CellGroupError::InvalidResolution {
                resolution,
                max: u8::from(cell.resolution()),
            }
        })
    }

    /// Descendants of `cell` at a finer `resolution`.
    pub fn children(&self, cell: &CellIndex, resolution: u8) -> Result<Vec<CellIndex>> {
        let target = to_resolution(resolution)?;
        if target < cell.resolution() {
            return Err(CellGroupError::InvalidInput(format!(
                "Child resolution {} is coarser than cell resolution {}",
                resolution,
                u8::from(cell.resolution())
            )));
        }
        Ok(cell.children(target).collect())
    }

    /// Ring distance between two cells of the same resolution.
    pub fn grid_distance(&self, from: &CellIndex, to: &CellIndex) -> Result<u32> {
        let distance = from.grid_distance(*to).map_err(|e| {
            CellGroupError::InvalidCell(format!("No grid distance {} -> {}: {}", from, to, e))
        })?;
        Ok(distance.unsigned_abs())
    }
}

impl AdjacencyOracle for HexGrid {
    type Cell = CellIndex;

    fn neighbors(&self, cell: &CellIndex, k: u32) -> Result<Vec<CellIndex>> {
        Ok(cell.grid_disk::<Vec<_>>(k))
    }
}

impl Tiling for HexGrid {
    fn name(&self) -> &'static str {
        "hexagon"
    }

    fn resolution(&self) -> u8 {
        u8::from(self.resolution)
    }

    fn cell_at(&self, point: &Point) -> Result<CellIndex> {
        validate_geographic_point(point)?;
        self.cell_id(point.y(), point.x(), self.resolution())
    }

    fn center(&self, cell: &CellIndex) -> Result<Point> {
        let latlng = LatLng::from(*cell);
        Ok(Point::new(latlng.lng(), latlng.lat()))
    }

    fn boundary(&self, cell: &CellIndex) -> Result<Polygon> {
        let ring: Vec<Coord> = cell
            .boundary()
            .iter()
            .map(|ll| Coord {
                x: ll.lng(),
                y: ll.lat(),
            })
            .collect();
        Ok(Polygon::new(LineString::from(ring), vec![]))
    }

    fn cell_area_km2(&self, cell: &CellIndex) -> Result<f64> {
        Ok(cell.area_km2())
    }
}
