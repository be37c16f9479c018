//! Connected-region analysis.
//!
//! Cells of the same (non-sentinel) color that touch horizontally or
//! vertically form a region. Regions that reach the analyzer's threshold are
//! *erasable*. Every cell is visited once per pass, so a pass is linear in
//! the number of cells.

use crate::cell::Cell;
use crate::error::KbkbError;
use crate::grid::{CellPos, Grid};
use bitvec::vec::BitVec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Neighbour offsets: right, left, up, down.
const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Whether erasable regions are reported while some cells are unstable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StabilityGate {
    /// Always analyze.
    #[default]
    Always,
    /// Report nothing unless every cell on the board is stable.
    #[serde(alias = "require-stable")]
    RequireStableGrid,
}

impl FromStr for StabilityGate {
    type Err = KbkbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "require-stable" | "require-stable-grid" => Ok(Self::RequireStableGrid),
            other => Err(KbkbError::UnknownGate(other.to_string())),
        }
    }
}

impl fmt::Display for StabilityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::RequireStableGrid => write!(f, "require-stable-grid"),
        }
    }
}

/// A maximal 4-connected group of same-colored cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    color: String,
    cells: Vec<CellPos>,
}

impl Region {
    /// Shared color of the members.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Member positions, in discovery order starting at the seed.
    #[must_use]
    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for regions produced by the analyzer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cells belonging to any region that met the threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErasableSet {
    cells: BTreeSet<CellPos>,
}

impl ErasableSet {
    /// Number of erasable cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is erasable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell at `pos` is erasable.
    #[must_use]
    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains(&pos)
    }

    /// Erasable positions in (column, row) order.
    pub fn iter(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells.iter().copied()
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Resolve the positions against the grid they came from.
    pub fn cells<'g>(&'g self, grid: &'g Grid) -> impl Iterator<Item = &'g Cell> + 'g {
        self.cells.iter().filter_map(move |pos| grid.cell(*pos))
    }
}

impl<'a> IntoIterator for &'a ErasableSet {
    type Item = &'a CellPos;
    type IntoIter = std::collections::btree_set::Iter<'a, CellPos>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Finds same-color regions on a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionAnalyzer {
    threshold: usize,
    gate: StabilityGate,
}

impl Default for RegionAnalyzer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl RegionAnalyzer {
    /// Analyzer reporting regions of at least `threshold` cells.
    ///
    /// A threshold of 0 or 1 makes every classified cell erasable.
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            gate: StabilityGate::default(),
        }
    }

    /// Set the stability gate.
    #[must_use]
    pub fn with_gate(mut self, gate: StabilityGate) -> Self {
        self.gate = gate;
        self
    }

    /// Minimum region size.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Stability gate in effect.
    #[must_use]
    pub fn gate(&self) -> StabilityGate {
        self.gate
    }

    /// Every region on the board, ignoring sentinel cells.
    ///
    /// The result partitions the classified cells: each one appears in
    /// exactly one region. Neither the threshold nor the gate apply here.
    #[must_use]
    pub fn find_regions(&self, grid: &Grid) -> Vec<Region> {
        let mut visited: Vec<BitVec> = grid
            .columns()
            .iter()
            .map(|column| BitVec::repeat(false, column.len()))
            .collect();

        let mut regions = Vec::new();
        for (seed, _) in grid.cells() {
            if let Some(region) = flood_fill(grid, seed, &mut visited) {
                regions.push(region);
            }
        }
        regions
    }

    /// Cells in regions of at least `threshold` members.
    ///
    /// Returns an empty set when the gate requires a stable board and some
    /// cell is not ready.
    #[must_use]
    pub fn find_erasable(&self, grid: &Grid) -> ErasableSet {
        if self.gate == StabilityGate::RequireStableGrid && !grid.is_stable() {
            tracing::trace!("grid unstable, skipping region analysis");
            return ErasableSet::default();
        }

        let regions = self.find_regions(grid);
        let cells: BTreeSet<CellPos> = regions
            .iter()
            .filter(|region| region.len() >= self.threshold)
            .flat_map(|region| region.cells.iter().copied())
            .collect();

        tracing::trace!(
            regions = regions.len(),
            threshold = self.threshold,
            erasable = cells.len(),
            "region analysis done"
        );
        ErasableSet { cells }
    }
}

/// Erasable cells for `threshold` with the default (ungated) policy.
#[must_use]
pub fn find_erasable_regions(grid: &Grid, threshold: usize) -> ErasableSet {
    RegionAnalyzer::new(threshold).find_erasable(grid)
}

/// Grow the region containing `seed`, marking members visited.
///
/// Returns `None` if the seed was already visited or is a sentinel cell.
fn flood_fill(grid: &Grid, seed: CellPos, visited: &mut [BitVec]) -> Option<Region> {
    if visited[seed.column][seed.row] {
        return None;
    }
    visited[seed.column].set(seed.row, true);

    let cell = grid.cell(seed)?;
    if cell.is_sentinel() {
        return None;
    }
    let color = cell.color();

    let mut cells = vec![seed];
    let mut stack = vec![seed];
    while let Some(pos) = stack.pop() {
        for (dx, dy) in NEIGHBOURS {
            let x = pos.column as isize + dx;
            let y = pos.row as isize + dy;
            let Some(neighbour) = grid.get(x, y) else {
                continue;
            };
            let next = CellPos::new(x as usize, y as usize);
            if visited[next.column][next.row] || neighbour.color() != color {
                continue;
            }
            visited[next.column].set(next.row, true);
            cells.push(next);
            stack.push(next);
        }
    }

    Some(Region {
        color: color.to_string(),
        cells,
    })
}
