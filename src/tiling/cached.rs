//! Memoised point-to-cell lookup.
//!
//! Repeated lookups of nearby coordinates are common when bucketing dense
//! point sets. [`CachedTiling`] rounds coordinates to a fixed number of
//! decimals and remembers the cell computed for each rounded coordinate.
//! The cell is always computed from the rounded coordinate, so a lookup
//! result depends only on its cache key.

use crate::config::Config;
use crate::error::Result;
use crate::tiling::{AdjacencyOracle, Tiling};
use geo::{Point, Polygon};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Highest supported rounding precision (decimal places).
pub const MAX_CACHE_PRECISION: u32 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheState<C> {
    cells: FxHashMap<(i64, i64), C>,
    hits: u64,
    misses: u64,
}

pub struct CachedTiling<T: Tiling> {
    inner: T,
    precision: u32,
    scale: f64,
    state: Mutex<CacheState<T::Cell>>,
}

impl<T: Tiling> CachedTiling<T> {
    pub fn new(inner: T, precision: u32) -> Self {
        assert!(
            precision <= MAX_CACHE_PRECISION,
            "Cache precision must be at most {} decimals",
            MAX_CACHE_PRECISION
        );
        Self {
            inner,
            precision,
            scale: 10f64.powi(precision as i32),
            state: Mutex::new(CacheState {
                cells: FxHashMap::default(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn from_config(inner: T, config: &Config) -> Self {
        Self::new(inner, config.cache_precision)
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.cells.len(),
        }
    }

    /// Rounded coordinates used as the cache key, or `None` when a scaled
    /// coordinate is not finite or falls outside the `i64` range.
    fn key(&self, point: &Point) -> Option<(i64, i64)> {
        let scaled = |v: f64| {
            let v = (v * self.scale).round();
            (v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
        };
        Some((scaled(point.x())?, scaled(point.y())?))
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.cells.clear();
        state.hits = 0;
        state.misses = 0;
    }
}

impl<T: Tiling> AdjacencyOracle for CachedTiling<T> {
    type Cell = T::Cell;

    fn neighbors(&self, cell: &Self::Cell, k: u32) -> Result<Vec<Self::Cell>> {
        self.inner.neighbors(cell, k)
    }
}

impl<T: Tiling> Tiling for CachedTiling<T> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn resolution(&self) -> u8 {
        self.inner.resolution()
    }

    fn cell_at(&self, point: &Point) -> Result<Self::Cell> {
        let Some(key) = self.key(point) else {
            // Non-finite or unkeyable points go straight to the inner tiling,
            // which reports its own error or answers uncached.
            return self.inner.cell_at(point);
        };

        let mut state = self.state.lock();
        if let Some(cell) = state.cells.get(&key).cloned() {
            state.hits += 1;
            return Ok(cell);
        }

        let rounded = Point::new(key.0 as f64 / self.scale, key.1 as f64 / self.scale);
        let cell = self.inner.cell_at(&rounded)?;
        state.misses += 1;
        state.cells.insert(key, cell.clone());
        Ok(cell)
    }

    fn center(&self, cell: &Self::Cell) -> Result<Point> {
        self.inner.center(cell)
    }

    fn boundary(&self, cell: &Self::Cell) -> Result<Polygon> {
        self.inner.boundary(cell)
    }

    fn cell_area_km2(&self, cell: &Self::Cell) -> Result<f64> {
        self.inner.cell_area_km2(cell)
    }
}
