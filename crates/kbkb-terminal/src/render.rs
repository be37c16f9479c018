//! Board to text.

use crate::charset::CharSet;
use kbkb_core::Grid;

/// Draw `grid` as a walled pit with the floor on the last line.
///
/// Rows are stacked upward from the floor, one slot per column. Drawing
/// stops after the first row with no cells, which stays on top as headroom.
/// Every line, including the last, ends with `\n`.
#[must_use]
pub fn render(grid: &Grid, charset: &CharSet) -> String {
    let width = grid.width();
    let mut lines = vec![format!(
        "{}{}{}",
        charset.left_corner,
        charset.floor.repeat(width),
        charset.right_corner
    )];

    for row in 0.. {
        let mut line = charset.wall.clone();
        let mut empty = true;
        for column in grid.columns() {
            match column.cells().get(row) {
                Some(cell) => {
                    line.push_str(&charset.paint(cell));
                    empty = false;
                }
                None => line.push_str(&charset.blank),
            }
        }
        line.push_str(&charset.wall);
        lines.push(line);
        if empty {
            break;
        }
    }

    lines.iter().rev().fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use kbkb_core::{AnnotationClassifier, GridBuilder, Node, Workload, DEFAULT_COLOR_ANNOTATION};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 8, d, 0, 0, 0).unwrap()
    }

    fn pod(name: &str, d: u32, node: &str, color: &str, ready: bool) -> Workload {
        Workload::new(name, day(d))
            .on_node(node)
            .with_annotation(DEFAULT_COLOR_ANNOTATION, color)
            .with_container("app", ready)
    }

    fn grid() -> Grid {
        let nodes = vec![Node::new("a", day(1)), Node::new("b", day(2))];
        let workloads = vec![
            pod("p1", 3, "a", "red", true),
            pod("p2", 4, "b", "blue", false),
            pod("p3", 5, "a", "green", true),
        ];
        GridBuilder::new(AnnotationClassifier::default()).build(&workloads, &nodes)
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(render(&Grid::default(), &CharSet::narrow()), "||\n++\n");
    }

    #[test]
    fn test_empty_columns() {
        let nodes = vec![Node::new("a", day(1)), Node::new("b", day(2))];
        let grid = GridBuilder::new(AnnotationClassifier::default()).build(&[], &nodes);
        assert_eq!(render(&grid, &CharSet::narrow()), "|  |\n+--+\n");
        assert_eq!(render(&grid, &CharSet::wide()), "|    |\n+----+\n");
    }

    #[test]
    fn test_rows_stack_upward() {
        let out = render(&grid(), &CharSet::narrow());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "|  |",
                "|\x1b[0;32m@\x1b[0m |",
                "|\x1b[0;31m@\x1b[0m\x1b[0;34mo\x1b[0m|",
                "+--+",
            ]
        );
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_height_is_tallest_column_plus_headroom_and_floor() {
        let out = render(&grid(), &CharSet::wide());
        assert_eq!(out.lines().count(), grid().height() + 2);
        assert!(out.contains('●'));
        assert!(out.contains('○'));
    }
}
