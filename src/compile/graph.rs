// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// Nodes and directed edges extracted from a description.
///
/// Nodes are exactly the edge endpoints, in first-mention order. A token that never takes part
/// in an edge has no node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<GraphEdge>,
}

impl DiagramGraph {
    pub fn from_edges(edges: Vec<GraphEdge>) -> Self {
        let mut graph = Self::default();
        for edge in &edges {
            graph.intern(&edge.from);
            graph.intern(&edge.to);
        }
        graph.edges = edges;
        graph
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(label.to_owned());
        self.index.insert(label.to_owned(), idx);
        idx
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Outgoing neighbours per node index, in edge order.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let (Some(from), Some(to)) = (self.node_index(&edge.from), self.node_index(&edge.to))
            {
                adjacency[from].push(to);
            }
        }
        adjacency
    }
}

/// Element id of the node at `index`.
pub fn node_element_id(index: usize) -> String {
    format!("node-{index}")
}

/// Element id of the edge at `index`.
pub fn edge_element_id(index: usize) -> String {
    format!("arrow-{index}")
}

#[cfg(test)]
mod tests {
    use super::{DiagramGraph, GraphEdge};

    #[test]
    fn nodes_follow_first_mention_order() {
        let graph = DiagramGraph::from_edges(vec![
            GraphEdge::new("B", "C"),
            GraphEdge::new("A", "B"),
            GraphEdge::new("C", "A"),
        ]);
        assert_eq!(graph.nodes(), ["B", "C", "A"]);
        assert_eq!(graph.node_index("A"), Some(2));
        assert_eq!(graph.adjacency(), vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn empty_edges_make_empty_graph() {
        assert!(DiagramGraph::from_edges(Vec::new()).is_empty());
    }
}
