// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::trace;

use crate::canvas::Canvas;
use crate::command::{CommandError, CommandStack};
use crate::model::collections;
use crate::model::{Element, ElementId, ElementKind, Graph, Violation};

/// `shape.delete`: removes a shape or label together with everything that depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShapeInput {
    pub shape: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: DeleteShapeInput,
    removed: Element,
    parent_index: Option<usize>,
    host_index: Option<usize>,
}

/// Removes dependents one recorded command at a time: the label, then incoming, outgoing,
/// children and attachers. Each list is drained from the front until empty, so an element
/// already removed through another path is simply no longer there.
pub(crate) fn pre_execute(stack: &mut CommandStack, input: &DeleteShapeInput) -> Result<(), CommandError> {
    let shape = stack.graph().element(&input.shape)?;
    if shape.is_root() {
        return Err(Violation::RootRemoval {
            id: input.shape.clone(),
        }
        .into());
    }
    shape.ensure_kind(&[ElementKind::Shape, ElementKind::Label])?;

    if let Some(label) = shape.label.clone() {
        stack.modeling().remove_shape(&label)?;
    }
    while let Some(connection) = first(stack, &input.shape, |e| &e.incoming)? {
        stack.modeling().remove_connection(&connection)?;
    }
    while let Some(connection) = first(stack, &input.shape, |e| &e.outgoing)? {
        stack.modeling().remove_connection(&connection)?;
    }
    while let Some(child) = first(stack, &input.shape, |e| &e.children)? {
        if stack.graph().element(&child)?.is_connection() {
            stack.modeling().remove_connection(&child)?;
        } else {
            stack.modeling().remove_shape(&child)?;
        }
    }
    while let Some(attacher) = first(stack, &input.shape, |e| &e.attachers)? {
        stack.modeling().remove_shape(&attacher)?;
    }
    Ok(())
}

fn first(
    stack: &CommandStack,
    id: &ElementId,
    list: impl Fn(&Element) -> &Vec<ElementId>,
) -> Result<Option<ElementId>, CommandError> {
    Ok(list(stack.graph().element(id)?).first().cloned())
}

pub(crate) fn execute(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    input: &DeleteShapeInput,
) -> Result<Applied, CommandError> {
    let id = &input.shape;
    let shape = graph.element(id)?;
    if shape.is_root() {
        return Err(Violation::RootRemoval { id: id.clone() }.into());
    }
    shape.ensure_kind(&[ElementKind::Shape, ElementKind::Label])?;
    if !shape.children.is_empty()
        || !shape.incoming.is_empty()
        || !shape.outgoing.is_empty()
        || !shape.attachers.is_empty()
    {
        return Err(Violation::NotDetached { id: id.clone() }.into());
    }

    let parent = shape.parent.clone();
    let host = shape.host.clone();
    let label_target = shape.label_target.clone();
    let own_label = shape.label.clone();

    let parent_index = match &parent {
        Some(parent) => collections::remove(&mut graph.element_mut(parent)?.children, id),
        None => None,
    };
    let host_index = match &host {
        Some(host) => collections::remove(&mut graph.element_mut(host)?.attachers, id),
        None => None,
    };
    if let Some(target) = &label_target {
        let target = graph.element_mut(target)?;
        if target.label.as_ref() == Some(id) {
            target.label = None;
        }
    }
    if let Some(label) = &own_label {
        if let Ok(label) = graph.element_mut(label) {
            label.label_target = None;
        }
    }

    canvas.remove_shape(id);
    let removed = graph.remove(id)?;
    trace!(shape:? = id, parent_index:? = parent_index, host_index:? = host_index; "Deleted shape");

    Ok(Applied {
        input: input.clone(),
        removed,
        parent_index,
        host_index,
    })
}

pub(crate) fn revert(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    applied: Applied,
) -> Result<(), CommandError> {
    let Applied {
        removed,
        parent_index,
        host_index,
        ..
    } = applied;
    let id = removed.id.clone();

    if let Some(parent) = &removed.parent {
        collections::add(&mut graph.element_mut(parent)?.children, id.clone(), parent_index);
    }
    if let Some(host) = &removed.host {
        collections::add(&mut graph.element_mut(host)?.attachers, id.clone(), host_index);
    }
    if let Some(target) = &removed.label_target {
        graph.element_mut(target)?.label = Some(id.clone());
    }
    if let Some(label) = &removed.label {
        if let Ok(label) = graph.element_mut(label) {
            label.label_target = Some(id.clone());
        }
    }

    canvas.add_shape(&removed, removed.parent.as_ref());
    graph.insert(removed)?;
    Ok(())
}
