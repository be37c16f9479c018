//! Board construction from unordered snapshot data.

use crate::cell::Cell;
use crate::classifier::Classifier;
use crate::model::{Node, Workload};
use std::collections::HashMap;
use std::fmt;

/// Position of a cell on the board: column (node) and row (stack height).
///
/// Cells are identified by position rather than by value, since two
/// workloads may look identical while sitting in different places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Column index, in node order.
    pub column: usize,
    /// Row index, 0 at the floor.
    pub row: usize,
}

impl CellPos {
    /// Create a position.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// All cells stacked on one node, oldest at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    node_name: String,
    cells: Vec<Cell>,
}

impl Column {
    fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            cells: Vec::new(),
        }
    }

    /// Name of the node this column represents.
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Cells from the floor up.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The board for one snapshot: one column per node.
///
/// A grid is immutable once built. Refreshing means building a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Column>,
}

impl Grid {
    /// Columns in node order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Height of the tallest column.
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Cell at signed coordinates. Anything off the board is `None`.
    #[must_use]
    pub fn get(&self, x: isize, y: isize) -> Option<&Cell> {
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.cell(CellPos::new(column, row))
    }

    /// Cell at `pos`, if occupied.
    #[must_use]
    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.columns.get(pos.column)?.cells.get(pos.row)
    }

    /// Every cell with its position, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &Cell)> + '_ {
        self.columns.iter().enumerate().flat_map(|(x, column)| {
            column
                .cells
                .iter()
                .enumerate()
                .map(move |(y, cell)| (CellPos::new(x, y), cell))
        })
    }

    /// True iff every cell on the board is stable.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.cells().all(|(_, cell)| cell.is_stable())
    }
}

/// Builds a [`Grid`] using a fixed classification strategy.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder<C> {
    classifier: C,
}

impl<C: Classifier> GridBuilder<C> {
    /// Create a builder that colors cells with `classifier`.
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Classifier in use.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Lay out `workloads` on `nodes`.
    ///
    /// Nodes become columns ordered by `(creation_timestamp, name)`;
    /// workloads are stacked in the same order. Workloads whose node is not
    /// in `nodes`, or which are unscheduled, are left off the board. The
    /// inputs are not modified and their order does not affect the result.
    pub fn build(&self, workloads: &[Workload], nodes: &[Node]) -> Grid {
        let mut nodes: Vec<&Node> = nodes.iter().collect();
        nodes.sort_by(|a, b| {
            a.creation_timestamp
                .cmp(&b.creation_timestamp)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut workloads: Vec<&Workload> = workloads.iter().collect();
        workloads.sort_by(|a, b| {
            a.creation_timestamp
                .cmp(&b.creation_timestamp)
                .then_with(|| a.name.cmp(&b.name))
        });

        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.as_str(), i))
            .collect();
        let mut columns: Vec<Column> = nodes.iter().map(|n| Column::new(&n.name)).collect();

        let mut skipped = 0usize;
        for workload in workloads {
            let target = workload
                .node_name
                .as_deref()
                .and_then(|name| index.get(name).copied());
            match target {
                Some(x) => columns[x]
                    .cells
                    .push(Cell::new(workload.clone(), &self.classifier)),
                None => {
                    skipped += 1;
                    tracing::debug!(
                        workload = %workload.name,
                        node = workload.node_name.as_deref().unwrap_or(""),
                        "skipping workload without a known node"
                    );
                }
            }
        }

        let grid = Grid { columns };
        tracing::trace!(
            classifier = self.classifier.name(),
            columns = grid.width(),
            cells = grid.cell_count(),
            skipped,
            "grid built"
        );
        grid
    }
}
