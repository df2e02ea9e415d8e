//! Geohash tiling.
//!
//! Cells are geohash strings; the precision (string length) plays the role of
//! the resolution. Adjacency is the 8-neighborhood reported by the `geohash`
//! crate, so k-rings follow Chebyshev distance.

use crate::compute::validation::validate_geographic_point;
use crate::config::Config;
use crate::error::{CellGroupError, Result};
use crate::tiling::{AdjacencyOracle, Tiling};
use geo::{Point, Polygon};
use geohash::{decode, decode_bbox, encode, neighbors};
use rustc_hash::FxHashSet;

pub const MIN_PRECISION: usize = 1;
pub const MAX_PRECISION: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeohashGrid {
    precision: usize,
}

impl GeohashGrid {
    pub fn new(precision: usize) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(CellGroupError::InvalidInput(format!(
                "Geohash precision must be between {} and {}, got: {}",
                MIN_PRECISION, MAX_PRECISION, precision
            )));
        }
        Ok(Self { precision })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.geohash_precision)
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

impl AdjacencyOracle for GeohashGrid {
    type Cell = String;

    fn neighbors(&self, cell: &String, k: u32) -> Result<Vec<String>> {
        let mut seen = FxHashSet::default();
        seen.insert(cell.clone());
        let mut cells = vec![cell.clone()];
        let mut frontier = vec![cell.clone()];

        for _ in 0..k {
            let mut next = Vec::with_capacity(frontier.len() * 3);
            for hash in &frontier {
                let nb = neighbors(hash)?;
                for n in [nb.n, nb.ne, nb.e, nb.se, nb.s, nb.sw, nb.w, nb.nw] {
                    if seen.insert(n.clone()) {
                        cells.push(n.clone());
                        next.push(n);
                    }
                }
            }
            frontier = next;
        }

        if k == 0 {
            // Still reject malformed hashes.
            decode_bbox(cell)?;
        }
        Ok(cells)
    }
}

impl Tiling for GeohashGrid {
    fn name(&self) -> &'static str {
        "geohash"
    }

    fn resolution(&self) -> u8 {
        self.precision as u8
    }

    fn cell_at(&self, point: &Point) -> Result<String> {
        validate_geographic_point(point)?;
        let coord = geohash::Coord {
            x: point.x(),
            y: point.y(),
        };
        Ok(encode(coord, self.precision)?)
    }

    fn center(&self, cell: &String) -> Result<Point> {
        let (coord, _, _) = decode(cell)?;
        Ok(Point::from(coord))
    }

    fn boundary(&self, cell: &String) -> Result<Polygon> {
        Ok(decode_bbox(cell)?.to_polygon())
    }
}
