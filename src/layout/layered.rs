// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;

use crate::compile::DiagramGraph;

pub const NODE_MIN_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 60.0;
pub const CHAR_WIDTH: f64 = 8.0;
pub const LABEL_PADDING: f64 = 40.0;
pub const ORIGIN_X: f64 = 150.0;
pub const ORIGIN_Y: f64 = 150.0;
pub const LEVEL_GAP: f64 = 100.0;
pub const ROW_SPACING: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LayeredLayout {
    levels: Vec<Vec<usize>>,
    placements: Vec<NodePlacement>,
}

impl LayeredLayout {
    /// Node indices grouped by level, each group in assignment order.
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    pub fn placement(&self, node_index: usize) -> Option<&NodePlacement> {
        self.placements.get(node_index)
    }

    pub fn placements(&self) -> &[NodePlacement] {
        &self.placements
    }

    /// Node indices in emission order: level by level, then position within the level.
    pub fn ordered_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.iter().flat_map(|level| level.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    level: usize,
    index_in_level: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl NodePlacement {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn index_in_level(&self) -> usize {
        self.index_in_level
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Box width for a label: characters times a fixed glyph width plus padding, never below the
/// minimum.
pub fn node_width(label: &str) -> f64 {
    let chars = label.chars().count() as f64;
    (chars * CHAR_WIDTH + LABEL_PADDING).max(NODE_MIN_WIDTH)
}

/// BFS distance of every node from node 0 (the first-mentioned node).
///
/// Returns `(level per node index, assignment order)`. Nodes that node 0 cannot reach get level
/// 0 and are appended to the assignment order after the traversal, in node order; they share the
/// first column with the start node.
pub fn bfs_levels(graph: &DiagramGraph) -> (Vec<usize>, Vec<usize>) {
    let node_count = graph.nodes().len();
    if node_count == 0 {
        return (Vec::new(), Vec::new());
    }

    let adjacency = graph.adjacency();
    let mut levels: Vec<Option<usize>> = vec![None; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut queue = VecDeque::new();

    levels[0] = Some(0);
    order.push(0);
    queue.push_back(0);

    while let Some(node) = queue.pop_front() {
        let next_level = levels[node].unwrap_or(0) + 1;
        for &neighbor in &adjacency[node] {
            if levels[neighbor].is_none() {
                levels[neighbor] = Some(next_level);
                order.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    for (node, level) in levels.iter_mut().enumerate() {
        if level.is_none() {
            *level = Some(0);
            order.push(node);
        }
    }

    (levels.into_iter().map(|level| level.unwrap_or(0)).collect(), order)
}

/// Deterministic left-to-right layout: one column per BFS level.
///
/// Column `L` starts at `ORIGIN_X + sum over l < L of (widest node in l + LEVEL_GAP)`; the node
/// at position `i` in its column sits at `ORIGIN_Y + i * ROW_SPACING`.
pub fn layout_layered(graph: &DiagramGraph) -> LayeredLayout {
    let (node_levels, order) = bfs_levels(graph);
    let max_level = node_levels.iter().copied().max();

    let mut levels = vec![Vec::<usize>::new(); max_level.map_or(0, |max| max + 1)];
    for node in order {
        levels[node_levels[node]].push(node);
    }

    let widths = graph.nodes().iter().map(|label| node_width(label)).collect::<Vec<_>>();

    let mut placements = vec![
        NodePlacement {
            level: 0,
            index_in_level: 0,
            x: 0.0,
            y: 0.0,
            width: NODE_MIN_WIDTH,
            height: NODE_HEIGHT,
        };
        graph.nodes().len()
    ];

    let mut column_x = ORIGIN_X;
    for (level, members) in levels.iter().enumerate() {
        let mut widest = NODE_MIN_WIDTH;
        for (index_in_level, &node) in members.iter().enumerate() {
            widest = widest.max(widths[node]);
            placements[node] = NodePlacement {
                level,
                index_in_level,
                x: column_x,
                y: ORIGIN_Y + index_in_level as f64 * ROW_SPACING,
                width: widths[node],
                height: NODE_HEIGHT,
            };
        }
        column_x += widest + LEVEL_GAP;
    }

    LayeredLayout { levels, placements }
}

#[cfg(test)]
mod tests {
    use super::{bfs_levels, layout_layered, node_width, NODE_MIN_WIDTH};
    use crate::compile::{DiagramGraph, GraphEdge};

    fn graph(edges: &[(&str, &str)]) -> DiagramGraph {
        DiagramGraph::from_edges(edges.iter().map(|(a, b)| GraphEdge::new(*a, *b)).collect())
    }

    fn xy(layout: &super::LayeredLayout, node: usize) -> (f64, f64) {
        let placement = layout.placement(node).expect("placement");
        (placement.x(), placement.y())
    }

    #[test]
    fn width_grows_with_label_past_minimum() {
        assert_eq!(node_width("A"), NODE_MIN_WIDTH);
        assert_eq!(node_width(&"x".repeat(20)), 200.0);
        assert_eq!(node_width("ÄÖÜ"), NODE_MIN_WIDTH);
    }

    #[test]
    fn chain_gets_increasing_levels() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let (levels, order) = bfs_levels(&g);
        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(order, vec![0, 1, 2]);

        let layout = layout_layered(&g);
        assert_eq!(xy(&layout, 0), (150.0, 150.0));
        assert_eq!(xy(&layout, 1), (400.0, 150.0));
        assert_eq!(xy(&layout, 2), (650.0, 150.0));
    }

    #[test]
    fn siblings_stack_vertically() {
        let g = graph(&[("API", "DB"), ("API", "Cache")]);
        let layout = layout_layered(&g);
        assert_eq!(layout.levels(), &[vec![0], vec![1, 2]]);
        assert_eq!(xy(&layout, 1), (400.0, 150.0));
        assert_eq!(xy(&layout, 2), (400.0, 350.0));
    }

    #[test]
    fn column_offset_accumulates_widest_node_per_level() {
        let long = "x".repeat(30); // 30 * 8 + 40 = 280
        let g = graph(&[("A", long.as_str()), ("A", "B"), (long.as_str(), "C")]);
        let layout = layout_layered(&g);

        assert_eq!(layout.placement(1).expect("long").width(), 280.0);
        // Level 1 is 280 wide, so level 2 starts at 150 + (150 + 100) + (280 + 100).
        assert_eq!(xy(&layout, 3), (780.0, 150.0));
    }

    #[test]
    fn unreachable_nodes_share_the_first_column() {
        let g = graph(&[("A", "B"), ("C", "D")]);
        let (levels, order) = bfs_levels(&g);
        assert_eq!(levels, vec![0, 1, 0, 0]);
        assert_eq!(order, vec![0, 1, 2, 3]);

        let layout = layout_layered(&g);
        assert_eq!(layout.levels(), &[vec![0, 2, 3], vec![1]]);
        assert_eq!(xy(&layout, 2), (150.0, 350.0));
        assert_eq!(xy(&layout, 3), (150.0, 550.0));
    }

    #[test]
    fn cycles_terminate() {
        let g = graph(&[("A", "B"), ("B", "A"), ("B", "B")]);
        let (levels, _) = bfs_levels(&g);
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn empty_graph_has_no_levels() {
        let layout = layout_layered(&DiagramGraph::default());
        assert!(layout.levels().is_empty());
        assert_eq!(layout.ordered_nodes().count(), 0);
    }

    #[test]
    fn layout_is_deterministic() {
        let g = graph(&[("A", "B"), ("A", "C"), ("C", "D"), ("E", "F")]);
        assert_eq!(layout_layered(&g), layout_layered(&g));
    }
}
