// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::command::{CommandError, CommandStack};
use crate::model::{Element, ElementId, ElementKind, Graph, Point};

/// `shape.append`: creates `shape` under `target` and connects `source` to it.
///
/// The shape and the connection are created by nested commands; this command only groups them.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendShapeInput {
    pub source: ElementId,
    pub shape: Element,
    pub position: Point,
    pub target: ElementId,
    pub connection: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: AppendShapeInput,
}

pub(crate) fn pre_execute(stack: &mut CommandStack, input: &AppendShapeInput) -> Result<(), CommandError> {
    stack
        .graph()
        .element(&input.source)?
        .ensure_kind(&[ElementKind::Shape])?;
    stack
        .modeling()
        .create_shape(input.shape.clone(), input.position, &input.target, false)?;
    Ok(())
}

pub(crate) fn execute(graph: &Graph, input: &AppendShapeInput) -> Result<Applied, CommandError> {
    graph.element(&input.shape.id)?;
    Ok(Applied {
        input: input.clone(),
    })
}

pub(crate) fn post_execute(stack: &mut CommandStack, input: &AppendShapeInput) -> Result<(), CommandError> {
    stack.modeling().create_connection(
        &input.source,
        &input.shape.id,
        input.connection.clone(),
        None,
    )?;
    Ok(())
}
