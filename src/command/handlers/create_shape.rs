// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::trace;

use crate::canvas::Canvas;
use crate::command::CommandError;
use crate::model::collections;
use crate::model::factory::DEFAULT_SHAPE_SIZE;
use crate::model::{Bounds, Element, ElementId, ElementKind, Graph, GraphError, Point};

/// `shape.create`: inserts a detached shape centered on `position` under `parent`.
///
/// `host` is only carried for attachment hooks; creating a shape never sets a host by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateShapeInput {
    pub shape: Element,
    pub position: Point,
    pub parent: ElementId,
    pub host: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: CreateShapeInput,
}

pub(crate) fn execute(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    input: &CreateShapeInput,
) -> Result<Applied, CommandError> {
    let shape = &input.shape;
    shape.ensure_kind(&[ElementKind::Shape])?;
    shape.ensure_detached()?;
    if graph.contains(&shape.id) {
        return Err(GraphError::AlreadyExists {
            id: shape.id.clone(),
        }
        .into());
    }
    graph
        .element(&input.parent)?
        .ensure_kind(&[ElementKind::Root, ElementKind::Shape])?;
    if let Some(host) = &input.host {
        graph.element(host)?.ensure_kind(&[ElementKind::Shape])?;
    }

    let (width, height) = shape
        .bounds
        .map(|b| (b.width, b.height))
        .unwrap_or(DEFAULT_SHAPE_SIZE);
    let mut element = shape.clone();
    element.bounds = Some(Bounds::centered_at(input.position, width, height));
    element.parent = Some(input.parent.clone());

    canvas.add_shape(&element, Some(&input.parent));
    graph.insert(element)?;
    collections::add(
        &mut graph.element_mut(&input.parent)?.children,
        shape.id.clone(),
        None,
    );

    trace!(shape:? = shape.id, parent:? = input.parent; "Created shape");
    Ok(Applied {
        input: input.clone(),
    })
}

pub(crate) fn revert(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    applied: Applied,
) -> Result<(), CommandError> {
    let id = &applied.input.shape.id;
    canvas.remove_shape(id);
    collections::remove(
        &mut graph.element_mut(&applied.input.parent)?.children,
        id,
    );
    graph.remove(id)?;
    Ok(())
}
