// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `shapes.move`.
//!
//! Every element reachable from the moved set through `children` and `label` is translated
//! exactly once, no matter how many paths lead to it. Connections that leave the moved set only
//! have their docked end point translated.

use std::collections::BTreeSet;

use log::trace;

use crate::command::{CommandError, CommandName};
use crate::model::collections;
use crate::model::invariants::owns;
use crate::model::{Bounds, ElementId, ElementKind, Graph, Point, Violation, Waypoints};

#[derive(Debug, Clone, PartialEq)]
pub struct MoveShapesInput {
    pub shapes: Vec<ElementId>,
    pub delta: Point,
    /// Re-parents the top-level moved elements (appended) when it differs from their parent.
    pub new_parent: Option<ElementId>,
    /// Read by attachment hooks after the move; the move itself never changes hosts.
    pub new_host: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
struct Reparent {
    id: ElementId,
    old_parent: ElementId,
    old_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: MoveShapesInput,
    old_bounds: Vec<(ElementId, Bounds)>,
    old_waypoints: Vec<(ElementId, Waypoints)>,
    reparented: Vec<Reparent>,
}

#[derive(Debug, Default)]
struct Closure {
    seen: BTreeSet<ElementId>,
    shapes: Vec<ElementId>,
    connections: Vec<ElementId>,
}

impl Closure {
    fn collect(graph: &Graph, roots: &[ElementId]) -> Result<Self, CommandError> {
        let mut closure = Self::default();
        let mut pending: Vec<ElementId> = roots.iter().rev().cloned().collect();
        while let Some(id) = pending.pop() {
            if closure.seen.contains(&id) {
                continue;
            }
            let element = graph.element(&id)?;
            if element.is_connection() {
                closure.connections.push(id.clone());
            } else {
                closure.shapes.push(id.clone());
            }
            pending.extend(element.children.iter().rev().cloned());
            pending.extend(element.label.clone());
            closure.seen.insert(id);
        }
        Ok(closure)
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.seen.contains(id)
    }
}

pub(crate) fn execute(graph: &mut Graph, input: &MoveShapesInput) -> Result<Applied, CommandError> {
    if input.shapes.is_empty() {
        return Err(CommandError::MissingContext {
            command: CommandName::ShapesMove,
            field: "shapes",
        });
    }
    for id in &input.shapes {
        graph.element(id)?.ensure_kind(&[
            ElementKind::Shape,
            ElementKind::Label,
            ElementKind::Connection,
        ])?;
    }

    let closure = Closure::collect(graph, &input.shapes)?;
    if let Some(new_parent) = &input.new_parent {
        graph
            .element(new_parent)?
            .ensure_kind(&[ElementKind::Root, ElementKind::Shape])?;
        let owner = input
            .shapes
            .iter()
            .find(|id| *id == new_parent || owns(graph, id, new_parent));
        if closure.contains(new_parent) || owner.is_some() {
            let element = owner.unwrap_or(new_parent);
            return Err(Violation::ParentCycle {
                element: element.clone(),
                parent: new_parent.clone(),
            }
            .into());
        }
    }

    let delta = input.delta;
    let mut old_bounds = Vec::with_capacity(closure.shapes.len());
    for id in &closure.shapes {
        let element = graph.element_mut(id)?;
        if let Some(bounds) = element.bounds {
            old_bounds.push((id.clone(), bounds));
            element.bounds = Some(bounds.translated(delta));
        }
    }

    let mut old_waypoints = Vec::new();
    let mut touched = BTreeSet::new();
    for id in &closure.connections {
        touched.insert(id.clone());
        translate_waypoints(graph, id, delta, Dock::Both, &mut old_waypoints)?;
    }
    for id in &closure.shapes {
        let element = graph.element(id)?;
        let adjacent: Vec<ElementId> = element
            .incoming
            .iter()
            .chain(&element.outgoing)
            .filter(|c| !touched.contains(*c))
            .cloned()
            .collect();
        for connection_id in adjacent {
            if !touched.insert(connection_id.clone()) {
                continue;
            }
            let connection = graph.element(&connection_id)?;
            let source_moved = connection.source.as_ref().is_some_and(|s| closure.contains(s));
            let target_moved = connection.target.as_ref().is_some_and(|t| closure.contains(t));
            let dock = match (source_moved, target_moved) {
                (true, true) => Dock::Both,
                (true, false) => Dock::Start,
                (false, true) => Dock::End,
                (false, false) => continue,
            };
            translate_waypoints(graph, &connection_id, delta, dock, &mut old_waypoints)?;
        }
    }

    let mut reparented = Vec::new();
    if let Some(new_parent) = &input.new_parent {
        for id in top_level(graph, &input.shapes)? {
            let old_parent = match graph.element(&id)?.parent.clone() {
                Some(parent) if &parent != new_parent => parent,
                _ => continue,
            };
            let old_index = collections::remove(&mut graph.element_mut(&old_parent)?.children, &id);
            collections::add(&mut graph.element_mut(new_parent)?.children, id.clone(), None);
            graph.element_mut(&id)?.parent = Some(new_parent.clone());
            reparented.push(Reparent {
                id,
                old_parent,
                old_index,
            });
        }
    }

    trace!(
        shapes = closure.shapes.len(), connections = old_waypoints.len(),
        reparented = reparented.len(), delta:? = delta;
        "Moved shapes",
    );
    Ok(Applied {
        input: input.clone(),
        old_bounds,
        old_waypoints,
        reparented,
    })
}

pub(crate) fn revert(graph: &mut Graph, applied: Applied) -> Result<(), CommandError> {
    for reparent in applied.reparented.into_iter().rev() {
        let element = graph.element_mut(&reparent.id)?;
        let current = element.parent.replace(reparent.old_parent.clone());
        if let Some(current) = current {
            collections::remove(&mut graph.element_mut(&current)?.children, &reparent.id);
        }
        collections::add(
            &mut graph.element_mut(&reparent.old_parent)?.children,
            reparent.id,
            reparent.old_index,
        );
    }
    for (id, waypoints) in applied.old_waypoints.into_iter().rev() {
        graph.element_mut(&id)?.waypoints = waypoints;
    }
    for (id, bounds) in applied.old_bounds.into_iter().rev() {
        graph.element_mut(&id)?.bounds = Some(bounds);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dock {
    Both,
    Start,
    End,
}

fn translate_waypoints(
    graph: &mut Graph,
    id: &ElementId,
    delta: Point,
    dock: Dock,
    old: &mut Vec<(ElementId, Waypoints)>,
) -> Result<(), CommandError> {
    let connection = graph.element_mut(id)?;
    old.push((id.clone(), connection.waypoints.clone()));
    let last = connection.waypoints.len().saturating_sub(1);
    for (index, point) in connection.waypoints.iter_mut().enumerate() {
        let moves = match dock {
            Dock::Both => true,
            Dock::Start => index == 0,
            Dock::End => index == last,
        };
        if moves {
            *point = *point + delta;
        }
    }
    Ok(())
}

/// Listed elements without a listed ancestor, each followed by its label.
fn top_level(graph: &Graph, listed: &[ElementId]) -> Result<Vec<ElementId>, CommandError> {
    let listed_set: BTreeSet<&ElementId> = listed.iter().collect();
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    let nested = |id: &ElementId| graph.ancestors(id).any(|a| listed_set.contains(&a.id));
    for id in listed {
        if nested(id) {
            continue;
        }
        if seen.insert(id.clone()) {
            out.push(id.clone());
        }
        if let Some(label) = graph.element(id)?.label.clone() {
            if !nested(&label) && seen.insert(label.clone()) {
                out.push(label);
            }
        }
    }
    Ok(out)
}
