// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use thiserror::Error;

use super::collections;
use super::element::{Element, ElementKind};
use super::ids::ElementId;
use super::invariants::{self, Violation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("element not found (id={id})")]
    NotFound { id: ElementId },
    #[error("element already exists (id={id})")]
    AlreadyExists { id: ElementId },
    #[error("invalid attribute '{key}': {reason}")]
    InvalidAttribute { key: String, reason: String },
    #[error(transparent)]
    Invariant(#[from] Violation),
}

/// Arena of diagram elements keyed by id, rooted at a single [`ElementKind::Root`].
///
/// Equality is structural over every element, which is what undo/redo restoration is
/// checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    root: ElementId,
    elements: BTreeMap<ElementId, Element>,
}

impl Graph {
    pub fn new(root: ElementId) -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(root.clone(), Element::root(root.clone()));
        Self { root, elements }
    }

    pub fn root(&self) -> &ElementId {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element(&self, id: &ElementId) -> Result<&Element, GraphError> {
        self.elements
            .get(id)
            .ok_or_else(|| GraphError::NotFound { id: id.clone() })
    }

    pub(crate) fn element_mut(&mut self, id: &ElementId) -> Result<&mut Element, GraphError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| GraphError::NotFound { id: id.clone() })
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Elements in paint order: a depth-first walk of `children` from the root.
    pub fn walk(&self) -> Vec<&Element> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack = vec![&self.root];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            out.push(element);
            stack.extend(element.children.iter().rev());
        }
        out
    }

    /// Position of `id` within its parent's `children`.
    pub fn index_in_parent(&self, id: &ElementId) -> Option<usize> {
        let parent = self.get(id)?.parent.as_ref()?;
        collections::index_of(&self.get(parent)?.children, id)
    }

    /// Parent chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors<'a>(&'a self, id: &ElementId) -> impl Iterator<Item = &'a Element> + 'a {
        let mut next = self.get(id).and_then(|e| e.parent.as_ref());
        std::iter::from_fn(move || {
            let element = self.get(next?)?;
            next = element.parent.as_ref();
            Some(element)
        })
    }

    pub fn is_ancestor_of(&self, ancestor: &ElementId, id: &ElementId) -> bool {
        self.ancestors(id).any(|element| &element.id == ancestor)
    }

    /// Checks every structural invariant; empty when the graph is consistent.
    pub fn violations(&self) -> Vec<Violation> {
        invariants::check(self)
    }

    /// Imports `element` under `parent`, wiring the inverse side of each relation the
    /// element names (`host`, `source`, `target`, `label_target`).
    ///
    /// This builds a document before editing starts and is not recorded; once a
    /// [`CommandStack`](crate::command::CommandStack) owns the graph, all edits go
    /// through commands.
    pub fn add(&mut self, mut element: Element, parent: &ElementId) -> Result<(), GraphError> {
        if self.contains(&element.id) {
            return Err(GraphError::AlreadyExists { id: element.id });
        }
        if element.is_root() {
            return Err(Violation::WrongKind {
                id: element.id,
                kind: ElementKind::Root,
            }
            .into());
        }
        if !element.children.is_empty()
            || !element.attachers.is_empty()
            || !element.incoming.is_empty()
            || !element.outgoing.is_empty()
            || element.label.is_some()
        {
            return Err(Violation::NotDetached { id: element.id }.into());
        }

        self.element(parent)?.ensure_kind(&[ElementKind::Root, ElementKind::Shape])?;
        if let Some(host) = &element.host {
            self.element(host)?.ensure_kind(&[ElementKind::Shape])?;
        }
        for endpoint in [&element.source, &element.target].into_iter().flatten() {
            self.element(endpoint)?;
        }
        if let Some(target) = &element.label_target {
            if self.element(target)?.label.is_some() {
                return Err(Violation::LabelAlreadySet { id: target.clone() }.into());
            }
        }

        let id = element.id.clone();
        element.parent = Some(parent.clone());
        if let Some(host) = &element.host {
            self.element_mut(host)?.attachers.push(id.clone());
        }
        if let Some(source) = &element.source {
            self.element_mut(source)?.outgoing.push(id.clone());
        }
        if let Some(target) = &element.target {
            self.element_mut(target)?.incoming.push(id.clone());
        }
        if let Some(target) = &element.label_target {
            self.element_mut(target)?.label = Some(id.clone());
        }
        self.element_mut(parent)?.children.push(id.clone());
        self.elements.insert(id, element);
        Ok(())
    }

    pub(crate) fn insert(&mut self, element: Element) -> Result<(), GraphError> {
        if self.contains(&element.id) {
            return Err(GraphError::AlreadyExists { id: element.id });
        }
        self.elements.insert(element.id.clone(), element);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &ElementId) -> Result<Element, GraphError> {
        if id == &self.root {
            return Err(Violation::RootRemoval { id: id.clone() }.into());
        }
        self.elements
            .remove(id)
            .ok_or_else(|| GraphError::NotFound { id: id.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::{Graph, GraphError};
    use crate::model::fixtures::eid;
    use crate::model::{Bounds, Element, Violation};

    #[test]
    fn add_wires_inverse_relations() {
        let mut graph = Graph::new(eid("root"));
        graph
            .add(Element::shape(eid("host"), Bounds::new(0.0, 0.0, 100.0, 100.0)), &eid("root"))
            .expect("host");
        graph
            .add(
                Element::shape(eid("attacher"), Bounds::new(75.0, 75.0, 50.0, 50.0))
                    .with_host(eid("host")),
                &eid("root"),
            )
            .expect("attacher");

        let host = graph.element(&eid("host")).expect("host");
        assert_eq!(host.attachers(), &[eid("attacher")]);
        assert_eq!(
            graph.element(&eid("root")).expect("root").children(),
            &[eid("host"), eid("attacher")]
        );
        assert!(graph.violations().is_empty());
    }

    #[test]
    fn add_rejects_duplicates_and_unknown_parents() {
        let mut graph = Graph::new(eid("root"));
        let shape = Element::shape(eid("a"), Bounds::default());
        graph.add(shape.clone(), &eid("root")).expect("first add");

        assert_eq!(
            graph.add(shape, &eid("root")),
            Err(GraphError::AlreadyExists { id: eid("a") })
        );
        assert_eq!(
            graph.add(Element::shape(eid("b"), Bounds::default()), &eid("missing")),
            Err(GraphError::NotFound { id: eid("missing") })
        );
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut graph = Graph::new(eid("root"));
        assert_eq!(
            graph.remove(&eid("root")),
            Err(GraphError::Invariant(Violation::RootRemoval { id: eid("root") }))
        );
    }

    #[test]
    fn ancestors_walk_up_to_root() {
        let mut graph = Graph::new(eid("root"));
        graph
            .add(Element::shape(eid("outer"), Bounds::default()), &eid("root"))
            .expect("outer");
        graph
            .add(Element::shape(eid("inner"), Bounds::default()), &eid("outer"))
            .expect("inner");

        let chain: Vec<_> = graph.ancestors(&eid("inner")).map(|e| e.id().clone()).collect();
        assert_eq!(chain, vec![eid("outer"), eid("root")]);
        assert!(graph.is_ancestor_of(&eid("root"), &eid("inner")));
        assert!(!graph.is_ancestor_of(&eid("inner"), &eid("outer")));
    }
}
