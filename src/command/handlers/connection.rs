// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `connection.create`, `connection.delete` and `connection.reconnect`.

use log::trace;

use crate::canvas::Canvas;
use crate::command::{CommandError, CommandStack};
use crate::model::collections;
use crate::model::{mid, Element, ElementId, ElementKind, Graph, GraphError, Point, Waypoints};

const SHAPES: &[ElementKind] = &[ElementKind::Shape];

#[derive(Debug, Clone, PartialEq)]
pub struct CreateConnectionInput {
    pub connection: Element,
    pub source: ElementId,
    pub target: ElementId,
    pub parent: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Created {
    pub(crate) input: CreateConnectionInput,
}

pub(crate) fn create(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    input: &CreateConnectionInput,
) -> Result<Created, CommandError> {
    let connection = &input.connection;
    connection.ensure_kind(&[ElementKind::Connection])?;
    connection.ensure_detached()?;
    if graph.contains(&connection.id) {
        return Err(GraphError::AlreadyExists {
            id: connection.id.clone(),
        }
        .into());
    }
    let source = graph.element(&input.source)?;
    source.ensure_kind(SHAPES)?;
    let target = graph.element(&input.target)?;
    target.ensure_kind(SHAPES)?;
    graph
        .element(&input.parent)?
        .ensure_kind(&[ElementKind::Root, ElementKind::Shape])?;

    let mut element = connection.clone();
    if element.waypoints.is_empty() {
        element.waypoints = Waypoints::from_iter([
            mid(source.bounds(), Point::ZERO),
            mid(target.bounds(), Point::ZERO),
        ]);
    }
    element.source = Some(input.source.clone());
    element.target = Some(input.target.clone());
    element.parent = Some(input.parent.clone());

    let id = element.id.clone();
    canvas.add_connection(&element, Some(&input.parent));
    graph.insert(element)?;
    collections::add(&mut graph.element_mut(&input.parent)?.children, id.clone(), None);
    collections::add(&mut graph.element_mut(&input.source)?.outgoing, id.clone(), None);
    collections::add(&mut graph.element_mut(&input.target)?.incoming, id.clone(), None);

    trace!(connection:? = id, source:? = input.source, target:? = input.target; "Created connection");
    Ok(Created {
        input: input.clone(),
    })
}

pub(crate) fn revert_create(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    created: Created,
) -> Result<(), CommandError> {
    let input = created.input;
    let id = &input.connection.id;
    canvas.remove_connection(id);
    collections::remove(&mut graph.element_mut(&input.target)?.incoming, id);
    collections::remove(&mut graph.element_mut(&input.source)?.outgoing, id);
    collections::remove(&mut graph.element_mut(&input.parent)?.children, id);
    graph.remove(id)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConnectionInput {
    pub connection: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Deleted {
    pub(crate) input: DeleteConnectionInput,
    removed: Element,
    parent_index: Option<usize>,
    source_index: Option<usize>,
    target_index: Option<usize>,
}

pub(crate) fn pre_delete(
    stack: &mut CommandStack,
    input: &DeleteConnectionInput,
) -> Result<(), CommandError> {
    let connection = stack.graph().element(&input.connection)?;
    connection.ensure_kind(&[ElementKind::Connection])?;
    if let Some(label) = connection.label.clone() {
        stack.modeling().remove_shape(&label)?;
    }
    Ok(())
}

pub(crate) fn delete(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    input: &DeleteConnectionInput,
) -> Result<Deleted, CommandError> {
    let id = &input.connection;
    let connection = graph.element(id)?;
    connection.ensure_kind(&[ElementKind::Connection])?;
    let parent = connection.parent.clone();
    let source = connection.source.clone();
    let target = connection.target.clone();
    let label = connection.label.clone();

    let parent_index = match &parent {
        Some(parent) => collections::remove(&mut graph.element_mut(parent)?.children, id),
        None => None,
    };
    let source_index = match &source {
        Some(source) => collections::remove(&mut graph.element_mut(source)?.outgoing, id),
        None => None,
    };
    let target_index = match &target {
        Some(target) => collections::remove(&mut graph.element_mut(target)?.incoming, id),
        None => None,
    };
    if let Some(label) = &label {
        if let Ok(label) = graph.element_mut(label) {
            label.label_target = None;
        }
    }

    canvas.remove_connection(id);
    let removed = graph.remove(id)?;
    trace!(connection:? = id; "Deleted connection");

    Ok(Deleted {
        input: input.clone(),
        removed,
        parent_index,
        source_index,
        target_index,
    })
}

pub(crate) fn revert_delete(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    deleted: Deleted,
) -> Result<(), CommandError> {
    let Deleted {
        removed,
        parent_index,
        source_index,
        target_index,
        ..
    } = deleted;
    let id = removed.id.clone();

    if let Some(parent) = &removed.parent {
        collections::add(&mut graph.element_mut(parent)?.children, id.clone(), parent_index);
    }
    if let Some(source) = &removed.source {
        collections::add(&mut graph.element_mut(source)?.outgoing, id.clone(), source_index);
    }
    if let Some(target) = &removed.target {
        collections::add(&mut graph.element_mut(target)?.incoming, id.clone(), target_index);
    }
    if let Some(label) = &removed.label {
        if let Ok(label) = graph.element_mut(label) {
            label.label_target = Some(id.clone());
        }
    }

    canvas.add_connection(&removed, removed.parent.as_ref());
    graph.insert(removed)?;
    Ok(())
}

/// Moves one or both ends of a connection; the waypoint docked at a moved end snaps to the
/// new endpoint's center.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectInput {
    pub connection: ElementId,
    pub new_source: Option<ElementId>,
    pub new_target: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reconnected {
    pub(crate) input: ReconnectInput,
    old_source: Option<(ElementId, Option<usize>)>,
    old_target: Option<(ElementId, Option<usize>)>,
    old_waypoints: Waypoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Start,
    End,
}

pub(crate) fn reconnect(graph: &mut Graph, input: &ReconnectInput) -> Result<Reconnected, CommandError> {
    let id = &input.connection;
    let connection = graph.element(id)?;
    connection.ensure_kind(&[ElementKind::Connection])?;
    let old_waypoints = connection.waypoints.clone();
    for end in [&input.new_source, &input.new_target].into_iter().flatten() {
        graph.element(end)?.ensure_kind(SHAPES)?;
    }

    let old_source = match &input.new_source {
        Some(new_source) => Some(rehome(graph, id, new_source, End::Start)?),
        None => None,
    };
    let old_target = match &input.new_target {
        Some(new_target) => Some(rehome(graph, id, new_target, End::End)?),
        None => None,
    };

    trace!(connection:? = id, new_source:? = input.new_source, new_target:? = input.new_target; "Reconnected");
    Ok(Reconnected {
        input: input.clone(),
        old_source: old_source.flatten(),
        old_target: old_target.flatten(),
        old_waypoints,
    })
}

/// Swaps one end of `connection` to `endpoint`, returning the previous end and its list index.
fn rehome(
    graph: &mut Graph,
    connection: &ElementId,
    endpoint: &ElementId,
    end: End,
) -> Result<Option<(ElementId, Option<usize>)>, CommandError> {
    let docked = mid(graph.element(endpoint)?.bounds(), Point::ZERO);
    let element = graph.element_mut(connection)?;
    let previous = match end {
        End::Start => element.source.replace(endpoint.clone()),
        End::End => element.target.replace(endpoint.clone()),
    };
    let slot = match end {
        End::Start => element.waypoints.first_mut(),
        End::End => element.waypoints.last_mut(),
    };
    match slot {
        Some(point) => *point = docked,
        None => element.waypoints.push(docked),
    }

    let old = match &previous {
        Some(previous) => {
            let index = collections::remove(list(graph.element_mut(previous)?, end), connection);
            Some((previous.clone(), index))
        }
        None => None,
    };
    collections::add(list(graph.element_mut(endpoint)?, end), connection.clone(), None);
    Ok(old)
}

fn list(element: &mut Element, end: End) -> &mut Vec<ElementId> {
    match end {
        End::Start => &mut element.outgoing,
        End::End => &mut element.incoming,
    }
}

pub(crate) fn revert_reconnect(graph: &mut Graph, reconnected: Reconnected) -> Result<(), CommandError> {
    let Reconnected {
        input,
        old_source,
        old_target,
        old_waypoints,
    } = reconnected;
    let id = &input.connection;

    let ends = [
        (input.new_target, old_target, End::End),
        (input.new_source, old_source, End::Start),
    ];
    for (new_end, old_end, end) in ends {
        let Some(new_end) = new_end else {
            continue;
        };
        collections::remove(list(graph.element_mut(&new_end)?, end), id);
        let restored = match old_end {
            Some((old, index)) => {
                collections::add(list(graph.element_mut(&old)?, end), id.clone(), index);
                Some(old)
            }
            None => None,
        };
        let element = graph.element_mut(id)?;
        match end {
            End::Start => element.source = restored,
            End::End => element.target = restored,
        }
    }
    graph.element_mut(id)?.waypoints = old_waypoints;
    Ok(())
}
