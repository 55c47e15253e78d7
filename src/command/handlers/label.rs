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
use crate::model::factory::DEFAULT_LABEL_SIZE;
use crate::model::{Bounds, Element, ElementId, ElementKind, Graph, GraphError, Point, Violation};

/// `label.create`: adds `label` centered on `position` and pairs it with `label_target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLabelInput {
    pub label: Element,
    pub label_target: ElementId,
    pub position: Point,
    pub parent: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: CreateLabelInput,
}

pub(crate) fn execute(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    input: &CreateLabelInput,
) -> Result<Applied, CommandError> {
    let label = &input.label;
    label.ensure_kind(&[ElementKind::Label])?;
    label.ensure_detached()?;
    if graph.contains(&label.id) {
        return Err(GraphError::AlreadyExists {
            id: label.id.clone(),
        }
        .into());
    }
    let target = graph.element(&input.label_target)?;
    target.ensure_kind(&[ElementKind::Shape, ElementKind::Connection])?;
    if target.label.is_some() {
        return Err(Violation::LabelAlreadySet {
            id: input.label_target.clone(),
        }
        .into());
    }
    graph
        .element(&input.parent)?
        .ensure_kind(&[ElementKind::Root, ElementKind::Shape])?;

    let (width, height) = label
        .bounds
        .map(|b| (b.width, b.height))
        .unwrap_or(DEFAULT_LABEL_SIZE);
    let mut element = label.clone();
    element.bounds = Some(Bounds::centered_at(input.position, width, height));
    element.parent = Some(input.parent.clone());
    element.label_target = Some(input.label_target.clone());

    let id = element.id.clone();
    canvas.add_shape(&element, Some(&input.parent));
    graph.insert(element)?;
    collections::add(&mut graph.element_mut(&input.parent)?.children, id.clone(), None);
    graph.element_mut(&input.label_target)?.label = Some(id.clone());

    trace!(label:? = id, target:? = input.label_target; "Created label");
    Ok(Applied {
        input: input.clone(),
    })
}

pub(crate) fn revert(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    applied: Applied,
) -> Result<(), CommandError> {
    let input = applied.input;
    let id = &input.label.id;
    canvas.remove_shape(id);
    graph.element_mut(&input.label_target)?.label = None;
    collections::remove(&mut graph.element_mut(&input.parent)?.children, id);
    graph.remove(id)?;
    Ok(())
}
