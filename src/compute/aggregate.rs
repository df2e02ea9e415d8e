//! Per-cell aggregation of weighted points.

use crate::error::Result;
use crate::tiling::Tiling;
use geo::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Running statistics for the values that fell into one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStats {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl CellStats {
    fn new(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
            min: value,
            max: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Buckets `(point, value)` samples by cell and aggregates their values.
///
/// The first invalid point aborts the whole aggregation.
pub fn aggregate<T, I>(tiling: &T, samples: I) -> Result<FxHashMap<T::Cell, CellStats>>
where
    T: Tiling + ?Sized,
    I: IntoIterator<Item = (Point, f64)>,
{
    let mut stats: FxHashMap<T::Cell, CellStats> = FxHashMap::default();
    let mut total = 0usize;
    for (point, value) in samples {
        let cell = tiling.cell_at(&point)?;
        stats
            .entry(cell)
            .and_modify(|s| s.push(value))
            .or_insert_with(|| CellStats::new(value));
        total += 1;
    }

    log::debug!(
        "aggregated {} samples into {} {} cells",
        total,
        stats.len(),
        tiling.name()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::SquareGrid;

    #[test]
    fn test_aggregate_totals() {
        let grid = SquareGrid::new(8).unwrap();
        let size = grid.cell_size(8);
        let base = grid.center(&grid.cell_id(37.5665, 126.9780, 8).unwrap()).unwrap();

        let samples = vec![
            (base, 10.0),
            (Point::new(base.x() + size * 0.1, base.y()), 30.0),
            (Point::new(base.x() + size, base.y()), 5.0),
        ];
        let stats = aggregate(&grid, samples).unwrap();
        assert_eq!(stats.len(), 2);

        let home = stats[&grid.cell_at(&base).unwrap()];
        assert_eq!(home.count, 2);
        assert_eq!(home.sum, 40.0);
        assert_eq!(home.min, 10.0);
        assert_eq!(home.max, 30.0);
        assert_eq!(home.mean(), 20.0);

        let total: usize = stats.values().map(|s| s.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_invalid_point_aborts() {
        let grid = SquareGrid::new(8).unwrap();
        let samples = vec![(Point::new(126.9, 37.5), 1.0), (Point::new(f64::NAN, 37.5), 1.0)];
        assert!(aggregate(&grid, samples).is_err());
    }
}
