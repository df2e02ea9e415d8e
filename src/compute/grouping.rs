//! Connected-component partitioning of cell sets.
//!
//! [`CellGroupAnalyzer`] splits a set of cells into maximal groups that are
//! connected through one-step adjacency, using breadth-first search. The
//! adjacency relation comes from the caller, either as a closure or as an
//! [`AdjacencyOracle`], so the same code groups hexagons, squares or any other
//! tiling.
//!
//! Guarantees for every successful call:
//! - groups are non-empty and pairwise disjoint, and their union is the input
//! - duplicates in the input are ignored
//! - seeds are taken in first-occurrence order, so output is reproducible
//! - a failing adjacency lookup aborts the whole call; no partial partition
//!   is ever returned

use crate::error::{CellGroupError, Result};
use crate::tiling::AdjacencyOracle;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A maximal set of mutually reachable cells.
///
/// Cells are kept in breadth-first discovery order; the first cell is the
/// seed the search started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedGroup<C> {
    cells: Vec<C>,
}

impl<C> ConnectedGroup<C> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for groups produced by the analyzer.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn seed(&self) -> Option<&C> {
        self.cells.first()
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<C> {
        self.cells
    }
}

impl<C: Eq + Hash + Clone> ConnectedGroup<C> {
    pub fn contains(&self, cell: &C) -> bool {
        self.cells.contains(cell)
    }

    pub fn to_set(&self) -> FxHashSet<C> {
        self.cells.iter().cloned().collect()
    }
}

impl<C> IntoIterator for ConnectedGroup<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a, C> IntoIterator for &'a ConnectedGroup<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Summary of a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub group_count: usize,
    pub cell_count: usize,
    pub largest: usize,
    pub smallest: usize,
    pub singletons: usize,
}

impl GroupStats {
    pub fn from_groups<C>(groups: &[ConnectedGroup<C>]) -> Self {
        let sizes = groups.iter().map(ConnectedGroup::len);
        Self {
            group_count: groups.len(),
            cell_count: sizes.clone().sum(),
            largest: sizes.clone().max().unwrap_or(0),
            smallest: sizes.clone().min().unwrap_or(0),
            singletons: sizes.filter(|&n| n == 1).count(),
        }
    }
}

/// Partitions cell sets into connected groups.
#[derive(Debug, Clone, Copy)]
pub struct CellGroupAnalyzer {
    check_reflexive: bool,
}

impl Default for CellGroupAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CellGroupAnalyzer {
    pub fn new() -> Self {
        Self {
            check_reflexive: true,
        }
    }

    /// Skip the check that an oracle's one-ring contains the cell itself.
    ///
    /// Only affects [`CellGroupAnalyzer::group_with_oracle`].
    pub fn without_reflexive_check(mut self) -> Self {
        self.check_reflexive = false;
        self
    }

    /// Groups `cells` using a fallible adjacency lookup.
    ///
    /// `neighbors_of` may return cells outside the input and may or may not
    /// include the cell itself; both are ignored. The first lookup error
    /// aborts the call with [`CellGroupError::InvalidOracle`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cellgroup::CellGroupAnalyzer;
    ///
    /// let edges = [("A", "B"), ("B", "C"), ("D", "E")];
    /// let groups = CellGroupAnalyzer::new().group(["A", "B", "C", "D", "E"], |cell| {
    ///     let adjacent: Vec<&str> = edges
    ///         .iter()
    ///         .filter_map(|&(a, b)| {
    ///             if a == *cell { Some(b) } else if b == *cell { Some(a) } else { None }
    ///         })
    ///         .collect();
    ///     Ok::<_, std::convert::Infallible>(adjacent)
    /// })?;
    ///
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].len(), 3);
    /// assert_eq!(groups[1].len(), 2);
    /// # Ok::<(), cellgroup::CellGroupError>(())
    /// ```
    pub fn group<C, I, E, F>(
        &self,
        cells: impl IntoIterator<Item = C>,
        mut neighbors_of: F,
    ) -> Result<Vec<ConnectedGroup<C>>>
    where
        C: Clone + Eq + Hash + Debug,
        I: IntoIterator<Item = C>,
        E: Display,
        F: FnMut(&C) -> std::result::Result<I, E>,
    {
        let mut order = Vec::new();
        let mut unvisited = FxHashSet::default();
        for cell in cells {
            if unvisited.insert(cell.clone()) {
                order.push(cell);
            }
        }

        let mut groups = Vec::new();
        let mut queue = VecDeque::new();

        for seed in order {
            // Consumed by an earlier group.
            if !unvisited.remove(&seed) {
                continue;
            }
            log::trace!("starting group {} from {:?}", groups.len(), seed);

            let mut members = Vec::new();
            queue.push_back(seed);

            while let Some(current) = queue.pop_front() {
                let adjacent = neighbors_of(&current)
                    .map_err(|e| CellGroupError::invalid_oracle(&current, e))?;

                // Removing on enqueue keeps every cell in the queue at most once.
                for neighbor in adjacent {
                    if unvisited.remove(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
                members.push(current);
            }

            groups.push(ConnectedGroup { cells: members });
        }

        log::debug!(
            "partitioned {} cells into {} groups",
            groups.iter().map(ConnectedGroup::len).sum::<usize>(),
            groups.len()
        );
        Ok(groups)
    }

    /// Groups `cells` using an infallible adjacency function.
    pub fn group_by_adjacency<C, I, F>(
        &self,
        cells: impl IntoIterator<Item = C>,
        mut neighbors_of: F,
    ) -> Result<Vec<ConnectedGroup<C>>>
    where
        C: Clone + Eq + Hash + Debug,
        I: IntoIterator<Item = C>,
        F: FnMut(&C) -> I,
    {
        self.group(cells, |cell| Ok::<_, Infallible>(neighbors_of(cell)))
    }

    /// Groups `cells` using the one-ring of `oracle`.
    ///
    /// Unless disabled, an oracle whose one-ring of a cell does not contain
    /// that cell is rejected as [`CellGroupError::InvalidOracle`].
    pub fn group_with_oracle<O>(
        &self,
        cells: impl IntoIterator<Item = O::Cell>,
        oracle: &O,
    ) -> Result<Vec<ConnectedGroup<O::Cell>>>
    where
        O: AdjacencyOracle + ?Sized,
    {
        let check_reflexive = self.check_reflexive;
        self.group(cells, |cell| {
            let ring = oracle.neighbors(cell, 1)?;
            if check_reflexive && !ring.contains(cell) {
                return Err(CellGroupError::Other(
                    "one-ring does not contain the cell itself".to_string(),
                ));
            }
            Ok(ring)
        })
    }
}

/// Groups `cells` with [`CellGroupAnalyzer::group_with_oracle`] using default
/// settings.
pub fn group_cells<O>(
    cells: impl IntoIterator<Item = O::Cell>,
    oracle: &O,
) -> Result<Vec<ConnectedGroup<O::Cell>>>
where
    O: AdjacencyOracle + ?Sized,
{
    CellGroupAnalyzer::new().group_with_oracle(cells, oracle)
}
