// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::trace;

use crate::command::{CommandError, CommandStack};
use crate::model::collections::{self, index_of};
use crate::model::invariants::{owns, would_create_host_cycle};
use crate::model::{ElementId, ElementKind, Graph, Violation};

/// `shape.attach`: makes `new_host` the host of `shape`, or detaches it when `new_host` is unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachShapeInput {
    pub shape: ElementId,
    pub new_host: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: AttachShapeInput,
    old_host: Option<ElementId>,
    old_index: Option<usize>,
}

pub(crate) fn execute(graph: &mut Graph, input: &AttachShapeInput) -> Result<Applied, CommandError> {
    let shape = graph.element(&input.shape)?;
    shape.ensure_kind(&[ElementKind::Shape])?;
    let old_host = shape.host.clone();

    if let Some(new_host) = &input.new_host {
        if new_host == &input.shape {
            return Err(Violation::SelfHosted {
                id: input.shape.clone(),
            }
            .into());
        }
        graph.element(new_host)?.ensure_kind(&[ElementKind::Shape])?;
        if would_create_host_cycle(graph, &input.shape, new_host)
            || owns(graph, &input.shape, new_host)
        {
            return Err(Violation::HostCycle {
                shape: input.shape.clone(),
                host: new_host.clone(),
            }
            .into());
        }
    }

    let old_index = match &old_host {
        Some(host) => collections::remove(&mut graph.element_mut(host)?.attachers, &input.shape),
        None => None,
    };
    if let Some(new_host) = &input.new_host {
        collections::add(
            &mut graph.element_mut(new_host)?.attachers,
            input.shape.clone(),
            None,
        );
    }
    graph.element_mut(&input.shape)?.host = input.new_host.clone();

    trace!(shape:? = input.shape, old_host:? = old_host, new_host:? = input.new_host; "Attached shape");
    Ok(Applied {
        input: input.clone(),
        old_host,
        old_index,
    })
}

pub(crate) fn revert(graph: &mut Graph, applied: Applied) -> Result<(), CommandError> {
    let Applied {
        input,
        old_host,
        old_index,
    } = applied;

    if let Some(new_host) = &input.new_host {
        collections::remove(&mut graph.element_mut(new_host)?.attachers, &input.shape);
    }
    if let Some(host) = &old_host {
        collections::add(
            &mut graph.element_mut(host)?.attachers,
            input.shape.clone(),
            old_index,
        );
    }
    graph.element_mut(&input.shape)?.host = old_host;
    Ok(())
}

/// Puts `attacher` directly above `host` when the host is stacked above it in their shared
/// parent, then keeps the attacher's label directly above the attacher.
///
/// Both moves are issued as `element.reorder` commands so they are undone with the
/// surrounding command.
pub(crate) fn restack_attacher(
    stack: &mut CommandStack,
    attacher: &ElementId,
    host: &ElementId,
) -> Result<(), CommandError> {
    let element = stack.graph().element(attacher)?;
    let Some(parent) = element.parent.clone() else {
        return Ok(());
    };
    let label = element.label.clone();

    let children = &stack.graph().element(&parent)?.children;
    let mut raised = false;
    if let (Some(attacher_index), Some(host_index)) =
        (index_of(children, attacher), index_of(children, host))
    {
        if host_index > attacher_index {
            // Once the attacher is taken out the host sits at `host_index - 1`.
            stack.modeling().reorder(attacher, host_index)?;
            raised = true;
        }
    }

    let Some(label) = label else {
        return Ok(());
    };
    let children = &stack.graph().element(&parent)?.children;
    if let (Some(attacher_index), Some(label_index)) =
        (index_of(children, attacher), index_of(children, &label))
    {
        let below = label_index < attacher_index;
        let wanted = if below {
            attacher_index
        } else {
            attacher_index + 1
        };
        if (raised || below) && wanted != label_index {
            stack.modeling().reorder(&label, wanted)?;
        }
    }
    Ok(())
}
