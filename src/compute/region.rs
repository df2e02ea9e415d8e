//! Cells of a tiling inside a rectangular region.
//!
//! Regions are sampled on a regular lattice rather than walked cell by cell,
//! which works for any [`Tiling`] without knowing its geometry. The step
//! should be well below the cell width or thin slivers of cells may be
//! missed.

use crate::compute::validation::validate_rect;
use crate::error::{CellGroupError, Result};
use crate::tiling::Tiling;
use geo::{Point, Rect};
use rustc_hash::FxHashSet;

/// Upper bound on lattice samples per call.
pub const MAX_SAMPLES: usize = 25_000_000;

fn check_step(rect: &Rect, step_degrees: f64) -> Result<(usize, usize)> {
    if !step_degrees.is_finite() || step_degrees <= 0.0 {
        return Err(CellGroupError::InvalidInput(format!(
            "Sample step must be positive and finite, got: {}",
            step_degrees
        )));
    }

    // Counts stay in f64 until they pass the limit check.
    let cols = (rect.width() / step_degrees).floor() + 1.0;
    let rows = (rect.height() / step_degrees).floor() + 1.0;
    if cols * rows > MAX_SAMPLES as f64 {
        return Err(CellGroupError::InvalidInput(format!(
            "Sampling {:e}x{:e} points exceeds the limit of {}",
            cols, rows, MAX_SAMPLES
        )));
    }
    Ok((cols as usize, rows as usize))
}

/// Every cell hit by a lattice sample inside `rect`, edges included, in
/// first-hit order.
pub fn covering_cells<T: Tiling + ?Sized>(
    tiling: &T,
    rect: &Rect,
    step_degrees: f64,
) -> Result<Vec<T::Cell>> {
    if let Err(e) = validate_rect(rect) {
        log::warn!("Rejecting region query: {}", e);
        return Err(e);
    }
    let (cols, rows) = check_step(rect, step_degrees)?;

    let (min, max) = (rect.min(), rect.max());
    let mut seen = FxHashSet::default();
    let mut cells = Vec::new();

    let mut visit = |x: f64, y: f64| -> Result<()> {
        let cell = tiling.cell_at(&Point::new(x, y))?;
        if seen.insert(cell.clone()) {
            cells.push(cell);
        }
        Ok(())
    };

    for row in 0..rows {
        let y = min.y + row as f64 * step_degrees;
        for col in 0..cols {
            visit(min.x + col as f64 * step_degrees, y)?;
        }
        // The lattice may stop short of the east edge.
        visit(max.x, y)?;
    }
    for col in 0..cols {
        visit(min.x + col as f64 * step_degrees, max.y)?;
    }
    visit(max.x, max.y)?;

    log::debug!(
        "sampled {}x{} points over region, {} {} cells",
        cols,
        rows,
        cells.len(),
        tiling.name()
    );
    Ok(cells)
}

/// Cells hit by the lattice whose center also lies inside `rect`.
pub fn interior_cells<T: Tiling + ?Sized>(
    tiling: &T,
    rect: &Rect,
    step_degrees: f64,
) -> Result<Vec<T::Cell>> {
    let (min, max) = (rect.min(), rect.max());
    let mut cells = Vec::new();
    for cell in covering_cells(tiling, rect, step_degrees)? {
        let center = tiling.center(&cell)?;
        if (min.x..=max.x).contains(&center.x()) && (min.y..=max.y).contains(&center.y()) {
            cells.push(cell);
        }
    }
    Ok(cells)
}
