// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde_json::Value;
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::geometry::{Bounds, Point};
use super::ids::ElementId;
use super::invariants::Violation;

/// Caller-supplied attributes that carry no structural meaning, kept verbatim.
pub type Attrs = BTreeMap<SmolStr, Value>;

pub type Waypoints = SmallVec<[Point; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Root,
    Shape,
    Label,
    Connection,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Shape => "shape",
            Self::Label => "label",
            Self::Connection => "connection",
        }
    }
}

/// A node of the diagram graph.
///
/// Every relation is an id into the owning [`Graph`](super::Graph). Elements built here
/// are detached; the graph (on import) or a command (while editing) wires the inverse
/// side of each relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    pub(crate) bounds: Option<Bounds>,
    pub(crate) waypoints: Waypoints,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) incoming: Vec<ElementId>,
    pub(crate) outgoing: Vec<ElementId>,
    pub(crate) source: Option<ElementId>,
    pub(crate) target: Option<ElementId>,
    pub(crate) host: Option<ElementId>,
    pub(crate) attachers: Vec<ElementId>,
    pub(crate) label: Option<ElementId>,
    pub(crate) label_target: Option<ElementId>,
    pub(crate) attrs: Attrs,
}

impl Element {
    fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            bounds: None,
            waypoints: Waypoints::new(),
            parent: None,
            children: Vec::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            source: None,
            target: None,
            host: None,
            attachers: Vec::new(),
            label: None,
            label_target: None,
            attrs: Attrs::new(),
        }
    }

    pub fn root(id: ElementId) -> Self {
        Self::new(id, ElementKind::Root)
    }

    pub fn shape(id: ElementId, bounds: Bounds) -> Self {
        let mut element = Self::new(id, ElementKind::Shape);
        element.bounds = Some(bounds);
        element
    }

    pub fn label(id: ElementId, bounds: Bounds) -> Self {
        let mut element = Self::new(id, ElementKind::Label);
        element.bounds = Some(bounds);
        element
    }

    pub fn connection(id: ElementId, waypoints: impl IntoIterator<Item = Point>) -> Self {
        let mut element = Self::new(id, ElementKind::Connection);
        element.waypoints = waypoints.into_iter().collect();
        element
    }

    /// Names the host of a shape being imported with [`Graph::add`](super::Graph::add).
    pub fn with_host(mut self, host: ElementId) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_source(mut self, source: ElementId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_label_target(mut self, label_target: ElementId) -> Self {
        self.label_target = Some(label_target);
        self
    }

    pub fn with_attr(mut self, key: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.kind == ElementKind::Root
    }

    pub fn is_connection(&self) -> bool {
        self.kind == ElementKind::Connection
    }

    /// Shapes and labels: the elements that carry bounds.
    pub fn is_shape_like(&self) -> bool {
        matches!(self.kind, ElementKind::Shape | ElementKind::Label)
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Top-left corner of a shape or label.
    pub fn position(&self) -> Option<Point> {
        self.bounds.map(|b| b.top_left())
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn parent(&self) -> Option<&ElementId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn incoming(&self) -> &[ElementId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ElementId] {
        &self.outgoing
    }

    pub fn source(&self) -> Option<&ElementId> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&ElementId> {
        self.target.as_ref()
    }

    pub fn host(&self) -> Option<&ElementId> {
        self.host.as_ref()
    }

    pub fn attachers(&self) -> &[ElementId] {
        &self.attachers
    }

    pub fn label_id(&self) -> Option<&ElementId> {
        self.label.as_ref()
    }

    pub fn label_target(&self) -> Option<&ElementId> {
        self.label_target.as_ref()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub(crate) fn ensure_kind(&self, expected: &'static [ElementKind]) -> Result<(), Violation> {
        if expected.contains(&self.kind) {
            return Ok(());
        }
        Err(Violation::WrongKind {
            id: self.id.clone(),
            kind: self.kind,
        })
    }

    /// Elements entering the graph through a command must not carry relations yet.
    pub(crate) fn ensure_detached(&self) -> Result<(), Violation> {
        let detached = self.parent.is_none()
            && self.children.is_empty()
            && self.incoming.is_empty()
            && self.outgoing.is_empty()
            && self.source.is_none()
            && self.target.is_none()
            && self.host.is_none()
            && self.attachers.is_empty()
            && self.label.is_none()
            && self.label_target.is_none();
        if detached {
            Ok(())
        } else {
            Err(Violation::NotDetached { id: self.id.clone() })
        }
    }
}
