// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::element::DiagramElement;

/// The ordered collection of all current elements.
///
/// Order is insertion order. Arrow endpoints are not checked here; see
/// [`Scene::resolved_elements`] for the view that hides dangling connectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<DiagramElement>,
}

impl Scene {
    pub fn new(elements: Vec<DiagramElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<DiagramElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DiagramElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<DiagramElement> {
        &mut self.elements
    }

    /// Ids of every non-connector element.
    pub fn node_ids(&self) -> HashSet<&str> {
        self.elements
            .iter()
            .filter(|element| !element.is_arrow())
            .map(|element| element.id.as_str())
            .collect()
    }

    /// Elements in scene order, minus arrows whose endpoints are missing or do not name a
    /// node of this scene.
    pub fn resolved_elements(&self) -> Vec<&DiagramElement> {
        let nodes = self.node_ids();
        self.elements
            .iter()
            .filter(|element| {
                if !element.is_arrow() {
                    return true;
                }
                element
                    .endpoints()
                    .is_some_and(|(from, to)| nodes.contains(from) && nodes.contains(to))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Scene;
    use crate::model::{DiagramElement, ElementKind};

    fn node(id: &str) -> DiagramElement {
        DiagramElement::shape(id, ElementKind::Rectangle, 0.0, 0.0, 150.0, 60.0)
    }

    #[test]
    fn resolved_elements_hides_dangling_arrows() {
        let mut incomplete = DiagramElement::arrow("a-3", "n-1", "n-2");
        incomplete.from_id = None;

        let scene = Scene::new(vec![
            node("n-1"),
            node("n-2"),
            DiagramElement::arrow("a-1", "n-1", "n-2"),
            DiagramElement::arrow("a-2", "n-1", "missing"),
            incomplete,
            // An arrow cannot anchor another arrow.
            DiagramElement::arrow("a-4", "a-1", "n-2"),
        ]);

        let ids = scene.resolved_elements().iter().map(|e| e.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["n-1", "n-2", "a-1"]);
        assert_eq!(scene.len(), 6);
    }

    #[test]
    fn node_ids_excludes_arrows() {
        let scene = Scene::new(vec![node("n-1"), DiagramElement::arrow("a-1", "n-1", "n-1")]);
        let nodes = scene.node_ids();
        assert!(nodes.contains("n-1"));
        assert!(!nodes.contains("a-1"));
    }
}
