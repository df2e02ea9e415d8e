//! Points bucketed by cell, with rectangle queries.
//!
//! A query samples the rectangle for covering cells, widens that set by one
//! ring so cells clipped between samples are not missed, and then filters
//! each bucket's points exactly against the rectangle. With a sample step
//! smaller than the cell width the result is exact.

use crate::compute::region::covering_cells;
use crate::error::Result;
use crate::tiling::Tiling;
use geo::{Point, Rect};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct CellBuckets<T: Tiling, V> {
    tiling: T,
    buckets: FxHashMap<T::Cell, Vec<(Point, V)>>,
    len: usize,
}

impl<T: Tiling, V> CellBuckets<T, V> {
    pub fn new(tiling: T) -> Self {
        Self {
            tiling,
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    pub fn tiling(&self) -> &T {
        &self.tiling
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty buckets.
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Stores `value` at `point` and returns the cell it landed in.
    pub fn insert(&mut self, point: Point, value: V) -> Result<T::Cell> {
        let cell = self.tiling.cell_at(&point)?;
        self.buckets
            .entry(cell.clone())
            .or_default()
            .push((point, value));
        self.len += 1;
        Ok(cell)
    }

    pub fn bucket(&self, cell: &T::Cell) -> &[(Point, V)] {
        self.buckets.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cells(&self) -> impl Iterator<Item = &T::Cell> {
        self.buckets.keys()
    }

    /// All stored points inside `rect`, borders included.
    pub fn query_rect(&self, rect: &Rect, step_degrees: f64) -> Result<Vec<(&Point, &V)>> {
        let mut candidates = FxHashSet::default();
        for cell in covering_cells(&self.tiling, rect, step_degrees)? {
            candidates.extend(self.tiling.neighbors(&cell, 1)?);
        }

        let (min, max) = (rect.min(), rect.max());
        let inside = |p: &Point| {
            (min.x..=max.x).contains(&p.x()) && (min.y..=max.y).contains(&p.y())
        };

        let mut results = Vec::new();
        for cell in &candidates {
            if let Some(bucket) = self.buckets.get(cell) {
                results.extend(
                    bucket
                        .iter()
                        .filter(|(p, _)| inside(p))
                        .map(|(p, v)| (p, v)),
                );
            }
        }

        log::debug!(
            "rect query scanned {} candidate cells, {} hits",
            candidates.len(),
            results.len()
        );
        Ok(results)
    }
}
