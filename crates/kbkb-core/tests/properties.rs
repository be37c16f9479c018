//! Property tests for board construction and region analysis.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kbkb_core::{
    find_erasable_regions, AnnotationClassifier, CellPos, Grid, GridBuilder, Node, RegionAnalyzer,
    Workload, DEFAULT_COLOR_ANNOTATION, SENTINEL_COLOR,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

const COLORS: [&str; 4] = ["red", "blue", "green", ""];

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 8, 1, 0, 0, 0).unwrap()
}

/// (node index, color index, creation offset, ready)
type PodSpec = (usize, usize, i64, bool);

fn snapshot(node_offsets: &[i64], pods: &[PodSpec]) -> (Vec<Node>, Vec<Workload>) {
    let nodes = node_offsets
        .iter()
        .enumerate()
        .map(|(i, off)| Node::new(format!("node{i}"), base() + Duration::hours(*off)))
        .collect();
    let workloads = pods
        .iter()
        .enumerate()
        .map(|(i, (node, color, off, ready))| {
            let mut w = Workload::new(format!("pod{i}"), base() + Duration::hours(*off))
                .on_node(format!("node{}", node % node_offsets.len()))
                .with_container("app", *ready);
            if !COLORS[*color].is_empty() {
                w = w.with_annotation(DEFAULT_COLOR_ANNOTATION, COLORS[*color]);
            }
            w
        })
        .collect();
    (nodes, workloads)
}

fn build(nodes: &[Node], workloads: &[Workload]) -> Grid {
    GridBuilder::new(AnnotationClassifier::default()).build(workloads, nodes)
}

fn pod_strategy() -> impl Strategy<Value = PodSpec> {
    (0usize..6, 0usize..COLORS.len(), 0i64..8, any::<bool>())
}

proptest! {
    #[test]
    fn prop_result_independent_of_input_order(
        node_offsets in prop::collection::vec(0i64..4, 1..6),
        pods in prop::collection::vec(pod_strategy(), 0..40),
        seed in any::<u64>(),
        threshold in 0usize..6,
    ) {
        let (nodes, workloads) = snapshot(&node_offsets, &pods);
        let grid = build(&nodes, &workloads);

        // Deterministic permutation driven by the seed.
        let mut shuffled_nodes = nodes.clone();
        let mut shuffled_workloads = workloads.clone();
        let n = shuffled_nodes.len();
        shuffled_nodes.rotate_left((seed as usize) % n);
        shuffled_workloads.reverse();
        if !shuffled_workloads.is_empty() {
            let k = (seed as usize) % shuffled_workloads.len();
            shuffled_workloads.rotate_left(k);
        }
        let other = build(&shuffled_nodes, &shuffled_workloads);

        prop_assert_eq!(&grid, &other);
        prop_assert_eq!(
            find_erasable_regions(&grid, threshold),
            find_erasable_regions(&other, threshold)
        );
    }

    #[test]
    fn prop_regions_partition_classified_cells(
        node_offsets in prop::collection::vec(0i64..4, 1..6),
        pods in prop::collection::vec(pod_strategy(), 0..40),
    ) {
        let (nodes, workloads) = snapshot(&node_offsets, &pods);
        let grid = build(&nodes, &workloads);
        let regions = RegionAnalyzer::new(1).find_regions(&grid);

        let mut seen: BTreeSet<CellPos> = BTreeSet::new();
        for region in &regions {
            prop_assert!(!region.is_empty());
            prop_assert_ne!(region.color(), SENTINEL_COLOR);
            for pos in region.cells() {
                prop_assert!(seen.insert(*pos));
            }
        }
        let classified: BTreeSet<CellPos> = grid
            .cells()
            .filter(|(_, c)| !c.is_sentinel())
            .map(|(p, _)| p)
            .collect();
        prop_assert_eq!(seen, classified);
    }

    #[test]
    fn prop_higher_threshold_is_subset(
        node_offsets in prop::collection::vec(0i64..4, 1..6),
        pods in prop::collection::vec(pod_strategy(), 0..40),
        t1 in 0usize..6,
        delta in 1usize..4,
    ) {
        let (nodes, workloads) = snapshot(&node_offsets, &pods);
        let grid = build(&nodes, &workloads);
        let low = find_erasable_regions(&grid, t1);
        let high = find_erasable_regions(&grid, t1 + delta);
        prop_assert!(high.is_subset(&low));
    }

    #[test]
    fn prop_sentinel_never_erasable(
        node_offsets in prop::collection::vec(0i64..4, 1..6),
        pods in prop::collection::vec(pod_strategy(), 0..40),
        threshold in 1usize..6,
    ) {
        let (nodes, workloads) = snapshot(&node_offsets, &pods);
        let grid = build(&nodes, &workloads);
        let erasable = find_erasable_regions(&grid, threshold);
        for cell in erasable.cells(&grid) {
            prop_assert!(!cell.is_sentinel());
        }
    }

    #[test]
    fn prop_threshold_one_erases_all_classified(
        node_offsets in prop::collection::vec(0i64..4, 1..6),
        pods in prop::collection::vec(pod_strategy(), 0..40),
    ) {
        let (nodes, workloads) = snapshot(&node_offsets, &pods);
        let grid = build(&nodes, &workloads);
        let classified = grid.cells().filter(|(_, c)| !c.is_sentinel()).count();
        prop_assert_eq!(find_erasable_regions(&grid, 1).len(), classified);
    }

    #[test]
    fn prop_column_count_matches_nodes(
        node_offsets in prop::collection::vec(0i64..4, 0..6),
        pods in prop::collection::vec(pod_strategy(), 0..20),
    ) {
        let nodes: Vec<Node> = node_offsets
            .iter()
            .enumerate()
            .map(|(i, off)| Node::new(format!("node{i}"), base() + Duration::hours(*off)))
            .collect();
        let workloads: Vec<Workload> = pods
            .iter()
            .enumerate()
            .map(|(i, (node, _, off, _))| {
                Workload::new(format!("pod{i}"), base() + Duration::hours(*off))
                    .on_node(format!("node{node}"))
            })
            .collect();
        let grid = build(&nodes, &workloads);
        prop_assert_eq!(grid.width(), nodes.len());
        let placed = pods.iter().filter(|(node, ..)| *node < nodes.len()).count();
        prop_assert_eq!(grid.cell_count(), placed);
    }

    #[test]
    fn prop_stability_derivation(readiness in prop::collection::vec(any::<bool>(), 0..6)) {
        let mut w = Workload::new("pod", base()).on_node("node0");
        for (i, ready) in readiness.iter().enumerate() {
            w = w.with_container(format!("c{i}"), *ready);
        }
        let grid = build(&[Node::new("node0", base())], &[w]);
        let cell = grid.cell(CellPos::new(0, 0)).unwrap();
        prop_assert_eq!(cell.is_stable(), readiness.iter().all(|r| *r));
    }
}
