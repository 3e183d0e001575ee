// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::graph::GraphEdge;
use super::patterns::PatternCatalogue;

/// Runs phrase, arrow and chain extraction over already-sanitized text and merges the results,
/// keeping the first occurrence of each `(source, target)` pair.
pub fn extract_edges(text: &str, catalogue: &PatternCatalogue) -> Vec<GraphEdge> {
    let phrase = catalogue.phrase_pairs(text);
    let arrows = catalogue.arrow_pairs(text);
    let chains = catalogue.chain_pairs(text);

    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for (from, to) in phrase.into_iter().chain(arrows).chain(chains) {
        if seen.insert((from, to)) {
            edges.push(GraphEdge::new(from, to));
        }
    }

    tracing::debug!(edges = edges.len(), "extracted edges");
    edges
}
