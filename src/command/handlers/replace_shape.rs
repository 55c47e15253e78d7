// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `shape.replace`.
//!
//! The replacement takes over the old shape's place: same top-left corner, same parent and
//! host, its children and connections. Attachers survive only when listed in
//! `retain_attachments`; the rest are deleted together with the old shape.

use log::debug;

use super::attach_shape::restack_attacher;
use crate::command::{CommandError, CommandName, CommandStack};
use crate::model::{Element, ElementId, ElementKind, Graph, GraphError, Point};

/// Attribute listing the attacher ids a replacement keeps.
pub const RETAIN_ATTACHMENTS_ATTR: &str = "retainAttachmentIds";

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceShapeInput {
    pub old_shape: ElementId,
    pub new_shape: Element,
    pub retain_attachments: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: ReplaceShapeInput,
}

/// Reads `retainAttachmentIds` from the replacement's custom attributes.
pub(crate) fn retained_attachments(shape: &Element) -> Result<Vec<ElementId>, GraphError> {
    let Some(value) = shape.attr(RETAIN_ATTACHMENTS_ATTR) else {
        return Ok(Vec::new());
    };
    let invalid = |reason: String| GraphError::InvalidAttribute {
        key: RETAIN_ATTACHMENTS_ATTR.to_owned(),
        reason,
    };
    let ids = value
        .as_array()
        .ok_or_else(|| invalid("expected an array of ids".to_owned()))?;
    ids.iter()
        .map(|id| {
            let raw = id
                .as_str()
                .ok_or_else(|| invalid("expected an array of ids".to_owned()))?;
            ElementId::new(raw).map_err(|err| invalid(err.to_string()))
        })
        .collect()
}

pub(crate) fn pre_execute(stack: &mut CommandStack, input: &ReplaceShapeInput) -> Result<(), CommandError> {
    let old = stack.graph().element(&input.old_shape)?;
    old.ensure_kind(&[ElementKind::Shape])?;
    let parent = old.parent.clone().ok_or(CommandError::MissingContext {
        command: CommandName::ShapeReplace,
        field: "parent",
    })?;
    let old_bounds = old.bounds.unwrap_or_default();
    let host = old.host.clone();
    let children = old.children.clone();
    let incoming = old.incoming.clone();
    let outgoing = old.outgoing.clone();
    let attachers = old.attachers.clone();

    let (width, height) = match input.new_shape.bounds {
        Some(b) if b.width > 0.0 && b.height > 0.0 => (b.width, b.height),
        _ => (old_bounds.width, old_bounds.height),
    };
    let mut replacement = input.new_shape.clone();
    if let Some(bounds) = replacement.bounds.as_mut() {
        bounds.width = width;
        bounds.height = height;
    }
    let center = Point::new(
        old_bounds.x + (width / 2.0).round(),
        old_bounds.y + (height / 2.0).round(),
    );
    let new_id = stack
        .modeling()
        .create_shape(replacement, center, &parent, false)?;

    if let Some(host) = &host {
        stack.modeling().attach_shape(&new_id, Some(host))?;
    }
    if !children.is_empty() {
        stack
            .modeling()
            .move_shapes(&children, Point::ZERO, Some(&new_id), false)?;
    }
    for connection in &incoming {
        stack.modeling().reconnect_end(connection, &new_id)?;
    }
    for connection in &outgoing {
        stack.modeling().reconnect_start(connection, &new_id)?;
    }
    for attacher in attachers
        .iter()
        .filter(|a| input.retain_attachments.contains(a))
    {
        stack.modeling().attach_shape(attacher, Some(&new_id))?;
        restack_attacher(stack, attacher, &new_id)?;
    }

    stack.modeling().remove_shape(&input.old_shape)?;
    debug!(old:? = input.old_shape, new:? = new_id; "Replaced shape");
    Ok(())
}

pub(crate) fn execute(graph: &Graph, input: &ReplaceShapeInput) -> Result<Applied, CommandError> {
    graph.element(&input.new_shape.id)?;
    Ok(Applied {
        input: input.clone(),
    })
}
