// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host/attacher semantics for moves and creates.
//!
//! Attachers travel with their hosts: they are dropped from a move selection that already
//! contains the host, dragged along visually and folded into the move command. A single moved
//! shape is attached to the new host (or detached) once the move is done, and kept stacked
//! above its host.

use std::collections::BTreeSet;

use log::trace;

use super::moving::MoveWorkflow;
use crate::command::handlers::attach_shape::restack_attacher;
use crate::command::{Command, CommandName, CommandStack, HIGH_PRIORITY, LOW_PRIORITY};
use crate::model::{ElementId, Graph};

#[derive(Debug, Clone, Copy, Default)]
pub struct AttachSupport;

impl AttachSupport {
    /// Registers the command hooks on `stack` and the start hooks on `moves`.
    pub fn install(stack: &mut CommandStack, moves: &mut MoveWorkflow) {
        moves.on_start(HIGH_PRIORITY, |graph, context| {
            context.shapes = remove_attached(graph, &context.shapes);
        });
        moves.on_start(LOW_PRIORITY, |graph, context| {
            let attachers = attachers_of(graph, &context.shapes);
            for attacher in &attachers {
                context.add_dragger(attacher.clone());
            }
            context.moved_attachers = attachers;
        });

        let interceptor = stack.interceptor_mut();
        interceptor.pre_execute(CommandName::ShapesMove, |stack, command| {
            let Command::MoveShapes(input) = command else {
                return Ok(());
            };
            for attacher in attachers_of(stack.graph(), &input.shapes) {
                if !input.shapes.contains(&attacher) {
                    input.shapes.push(attacher);
                }
            }
            Ok(())
        });

        interceptor.post_execute(CommandName::ShapesMove, |stack, command| {
            let Command::MoveShapes(input) = command else {
                return Ok(());
            };
            // Multi-shape moves keep every attachment as it is.
            let [shape] = input.shapes.as_slice() else {
                return Ok(());
            };
            match &input.new_host {
                Some(host) => {
                    stack.modeling().attach_shape(shape, Some(host))?;
                    restack_attacher(stack, shape, host)
                }
                None => {
                    if stack.graph().element(shape)?.host().is_some() {
                        trace!(shape:? = shape; "Detaching moved attacher");
                        stack.modeling().attach_shape(shape, None)?;
                    }
                    Ok(())
                }
            }
        });

        interceptor.post_execute(CommandName::ShapeCreate, |stack, command| {
            let Command::CreateShape(input) = command else {
                return Ok(());
            };
            let Some(host) = &input.host else {
                return Ok(());
            };
            let shape = input.shape.id();
            stack.modeling().attach_shape(shape, Some(host))?;
            restack_attacher(stack, shape, host)
        });
    }
}

/// Attachers of `shapes`, one level deep, in host order.
pub fn attachers_of(graph: &Graph, shapes: &[ElementId]) -> Vec<ElementId> {
    shapes
        .iter()
        .filter_map(|id| graph.get(id))
        .flat_map(|shape| shape.attachers().iter().cloned())
        .collect()
}

/// Drops every element whose own host, or the host of any ancestor, is part of `elements`.
pub fn remove_attached(graph: &Graph, elements: &[ElementId]) -> Vec<ElementId> {
    let selected: BTreeSet<&ElementId> = elements.iter().collect();
    elements
        .iter()
        .filter(|id| {
            let hosted_in_selection = graph
                .get(id)
                .into_iter()
                .chain(graph.ancestors(id))
                .any(|element| element.host().is_some_and(|host| selected.contains(host)));
            !hosted_in_selection
        })
        .cloned()
        .collect()
}
