// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Description-to-scene compiler.
//!
//! Pipeline: validate → sanitize → extract edges (phrases, arrows, chains) → build the node set
//! → classify shapes → layered layout → emit elements (nodes first, then one arrow per edge).

pub mod extract;
pub mod graph;
pub mod patterns;
pub mod sanitize;
pub mod shape;

use crate::layout::{layout_layered, LayeredLayout};
use crate::model::DiagramElement;

pub use extract::extract_edges;
pub use graph::{edge_element_id, node_element_id, DiagramGraph, GraphEdge};
pub use patterns::{PatternCatalogue, PatternSpec};
pub use sanitize::{sanitize_description, MAX_DESCRIPTION_CHARS};
pub use shape::{classify_shape, palette_style};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description too long (max {max} characters)")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("Too many elements generated ({count} > {max})")]
    TooManyElements { count: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub max_elements: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { max_elements: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompileOutcome {
    /// Nothing in the description produced an edge.
    Empty,
    Diagram(CompiledDiagram),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDiagram {
    graph: DiagramGraph,
    layout: LayeredLayout,
    elements: Vec<DiagramElement>,
}

impl CompiledDiagram {
    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }

    pub fn layout(&self) -> &LayeredLayout {
        &self.layout
    }

    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<DiagramElement> {
        self.elements
    }
}

pub fn compile(
    description: &str,
    options: &CompileOptions,
) -> Result<CompileOutcome, CompileError> {
    compile_with(description, options, PatternCatalogue::builtin())
}

pub fn compile_with(
    description: &str,
    options: &CompileOptions,
    catalogue: &PatternCatalogue,
) -> Result<CompileOutcome, CompileError> {
    if description.trim().is_empty() {
        return Err(CompileError::EmptyDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(CompileError::DescriptionTooLong { len, max: MAX_DESCRIPTION_CHARS });
    }

    let text = sanitize_description(description);
    let graph = DiagramGraph::from_edges(extract_edges(&text, catalogue));
    if graph.is_empty() {
        return Ok(CompileOutcome::Empty);
    }

    let count = graph.nodes().len() + graph.edges().len();
    if count > options.max_elements {
        return Err(CompileError::TooManyElements { count, max: options.max_elements });
    }

    let layout = layout_layered(&graph);
    let elements = emit_elements(&graph, &layout);
    Ok(CompileOutcome::Diagram(CompiledDiagram { graph, layout, elements }))
}

fn emit_elements(graph: &DiagramGraph, layout: &LayeredLayout) -> Vec<DiagramElement> {
    let mut elements = Vec::with_capacity(graph.nodes().len() + graph.edges().len());

    for node in layout.ordered_nodes() {
        let Some(placement) = layout.placement(node) else {
            continue;
        };
        let label = &graph.nodes()[node];
        let slot = elements.len();
        elements.push(
            DiagramElement::shape(
                node_element_id(node),
                classify_shape(label),
                placement.x(),
                placement.y(),
                placement.width(),
                placement.height(),
            )
            .with_text(label.clone())
            .with_style(palette_style(slot)),
        );
    }

    for (idx, edge) in graph.edges().iter().enumerate() {
        let (Some(from), Some(to)) = (graph.node_index(&edge.from), graph.node_index(&edge.to))
        else {
            continue;
        };
        elements.push(DiagramElement::arrow(
            edge_element_id(idx),
            node_element_id(from),
            node_element_id(to),
        ));
    }

    elements
}
