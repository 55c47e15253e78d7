// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};
use smol_str::SmolStr;

use super::element::{Element, ElementKind, Waypoints};
use super::geometry::{Bounds, Point};
use super::graph::{Graph, GraphError};
use super::ids::ElementId;

pub const DEFAULT_SHAPE_SIZE: (f64, f64) = (100.0, 80.0);
pub const DEFAULT_LABEL_SIZE: (f64, f64) = (90.0, 20.0);

const TYPED_KEYS: [&str; 6] = ["id", "x", "y", "width", "height", "waypoints"];

/// Builds detached elements from loosely typed attribute objects.
///
/// Typed keys map onto element fields; every other key is copied verbatim into the element's
/// custom attributes. Missing extents fall back to a per-kind default instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ElementFactory {
    next: u64,
}

impl ElementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_shape(&mut self, attrs: Map<String, Value>) -> Result<Element, GraphError> {
        self.create(ElementKind::Shape, attrs)
    }

    pub fn create_label(&mut self, attrs: Map<String, Value>) -> Result<Element, GraphError> {
        self.create(ElementKind::Label, attrs)
    }

    pub fn create_connection(&mut self, attrs: Map<String, Value>) -> Result<Element, GraphError> {
        self.create(ElementKind::Connection, attrs)
    }

    /// Generates `<prefix>_<n>`, skipping ids already present in `graph`.
    pub fn next_id(&mut self, prefix: &str, graph: &Graph) -> Result<ElementId, GraphError> {
        loop {
            self.next += 1;
            let id = ElementId::new(format!("{prefix}_{}", self.next)).map_err(|err| {
                GraphError::InvalidAttribute {
                    key: "id".to_owned(),
                    reason: err.to_string(),
                }
            })?;
            if !graph.contains(&id) {
                return Ok(id);
            }
        }
    }

    fn create(&mut self, kind: ElementKind, attrs: Map<String, Value>) -> Result<Element, GraphError> {
        let id = match attrs.get("id") {
            Some(Value::String(raw)) => {
                ElementId::new(raw).map_err(|err| GraphError::InvalidAttribute {
                    key: "id".to_owned(),
                    reason: err.to_string(),
                })?
            }
            Some(_) => return Err(invalid("id", "expected a string")),
            None => self.generated_id(kind)?,
        };

        let mut element = match kind {
            ElementKind::Shape | ElementKind::Label => {
                let (default_width, default_height) = if kind == ElementKind::Label {
                    DEFAULT_LABEL_SIZE
                } else {
                    DEFAULT_SHAPE_SIZE
                };
                let bounds = Bounds::new(
                    number(&attrs, "x")?.unwrap_or(0.0),
                    number(&attrs, "y")?.unwrap_or(0.0),
                    number(&attrs, "width")?.unwrap_or(default_width),
                    number(&attrs, "height")?.unwrap_or(default_height),
                );
                if kind == ElementKind::Label {
                    Element::label(id, bounds)
                } else {
                    Element::shape(id, bounds)
                }
            }
            ElementKind::Connection => Element::connection(id, waypoints(&attrs)?),
            ElementKind::Root => Element::root(id),
        };

        for (key, value) in attrs {
            if !TYPED_KEYS.contains(&key.as_str()) {
                element.attrs.insert(SmolStr::new(key), value);
            }
        }
        Ok(element)
    }

    fn generated_id(&mut self, kind: ElementKind) -> Result<ElementId, GraphError> {
        self.next += 1;
        ElementId::new(format!("{}_{}", kind.as_str(), self.next)).map_err(|err| {
            GraphError::InvalidAttribute {
                key: "id".to_owned(),
                reason: err.to_string(),
            }
        })
    }
}

fn invalid(key: &str, reason: &str) -> GraphError {
    GraphError::InvalidAttribute {
        key: key.to_owned(),
        reason: reason.to_owned(),
    }
}

fn number(attrs: &Map<String, Value>, key: &str) -> Result<Option<f64>, GraphError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(key, "expected a number")),
    }
}

fn waypoints(attrs: &Map<String, Value>) -> Result<Waypoints, GraphError> {
    match attrs.get("waypoints") {
        None | Some(Value::Null) => Ok(Waypoints::new()),
        Some(value) => {
            let points: Vec<Point> = serde_json::from_value(value.clone())
                .map_err(|err| invalid("waypoints", &err.to_string()))?;
            Ok(points.into_iter().collect())
        }
    }
}
