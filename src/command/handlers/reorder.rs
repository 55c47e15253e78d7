// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::trace;

use crate::command::{CommandError, CommandName};
use crate::model::collections::{self, index_of};
use crate::model::{ElementId, Graph};

/// `element.reorder`: moves `element` to `index` within its parent's children.
///
/// `index` is the final position, counted in the list without the element itself; indices
/// past the end put it on top.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderInput {
    pub element: ElementId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Applied {
    pub(crate) input: ReorderInput,
    parent: ElementId,
    old_index: Option<usize>,
}

pub(crate) fn execute(graph: &mut Graph, input: &ReorderInput) -> Result<Applied, CommandError> {
    let parent = graph
        .element(&input.element)?
        .parent
        .clone()
        .ok_or(CommandError::MissingContext {
            command: CommandName::ElementReorder,
            field: "parent",
        })?;
    let children = &mut graph.element_mut(&parent)?.children;
    let old_index = index_of(children, &input.element);
    collections::add(children, input.element.clone(), Some(input.index));

    trace!(element:? = input.element, old_index:? = old_index, index = input.index; "Reordered element");
    Ok(Applied {
        input: input.clone(),
        parent,
        old_index,
    })
}

pub(crate) fn revert(graph: &mut Graph, applied: Applied) -> Result<(), CommandError> {
    let children = &mut graph.element_mut(&applied.parent)?.children;
    match applied.old_index {
        Some(index) => collections::add(children, applied.input.element, Some(index)),
        None => {
            collections::remove(children, &applied.input.element);
        }
    }
    Ok(())
}
