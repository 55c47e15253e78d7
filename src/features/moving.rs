// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive move of existing shapes.
//!
//! [`MoveWorkflow::start`] runs the start hooks over a fresh [`MoveContext`] and returns a
//! [`MoveSession`] that follows the pointer until it is ended or cleaned up.

use std::fmt;
use std::rc::Rc;

use log::debug;

use super::gesture::{DropMarker, GestureEvent};
use crate::canvas::Marker;
use crate::command::{CommandError, CommandFilter, CommandStack, PriorityHooks, DEFAULT_PRIORITY};
use crate::config::EditorConfig;
use crate::model::{ElementId, Graph, Point};
use crate::rules::{RuleContext, Rules, Verdict};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveContext {
    /// Elements the move command will receive.
    pub shapes: Vec<ElementId>,
    /// Attachers travelling with their hosts.
    pub moved_attachers: Vec<ElementId>,
    /// Elements drawn as part of the drag visual.
    pub draggers: Vec<ElementId>,
}

impl MoveContext {
    pub fn add_dragger(&mut self, id: ElementId) {
        if !self.draggers.contains(&id) {
            self.draggers.push(id);
        }
    }
}

pub type MoveStartHook = Rc<dyn Fn(&Graph, &mut MoveContext)>;

pub struct MoveWorkflow {
    start_hooks: PriorityHooks<MoveStartHook>,
    round_delta: bool,
}

impl fmt::Debug for MoveWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveWorkflow")
            .field("start_hooks", &self.start_hooks)
            .field("round_delta", &self.round_delta)
            .finish()
    }
}

impl MoveWorkflow {
    pub fn new(config: &EditorConfig) -> Self {
        let mut workflow = Self {
            start_hooks: PriorityHooks::new(),
            round_delta: config.round_move_delta,
        };
        workflow.on_start(DEFAULT_PRIORITY, |_, context| {
            for shape in context.shapes.clone() {
                context.add_dragger(shape);
            }
        });
        workflow
    }

    pub fn on_start<F>(&mut self, priority: i32, hook: F)
    where
        F: Fn(&Graph, &mut MoveContext) + 'static,
    {
        self.start_hooks
            .add(priority, CommandFilter::Any, Rc::new(hook));
    }

    pub fn start(&self, stack: &mut CommandStack, origin: Point, shapes: Vec<ElementId>) -> MoveSession {
        let mut context = MoveContext {
            shapes,
            ..MoveContext::default()
        };
        for hook in self.start_hooks.iter() {
            hook(stack.graph(), &mut context);
        }
        for dragger in &context.draggers {
            stack.canvas_mut().add_marker(dragger, Marker::Dragging);
        }
        debug!(shapes = context.shapes.len(), draggers = context.draggers.len(); "Move started");

        MoveSession {
            context,
            origin,
            delta: Point::ZERO,
            round_delta: self.round_delta,
            target: None,
            can_execute: None,
            marker: DropMarker::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    context: MoveContext,
    origin: Point,
    delta: Point,
    round_delta: bool,
    target: Option<ElementId>,
    can_execute: Option<Verdict>,
    marker: DropMarker,
}

impl MoveSession {
    pub fn context(&self) -> &MoveContext {
        &self.context
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    pub fn target(&self) -> Option<&ElementId> {
        self.target.as_ref()
    }

    pub fn can_execute(&self) -> Option<Verdict> {
        self.can_execute
    }

    pub fn move_to(&mut self, stack: &mut CommandStack, rules: &dyn Rules, event: &GestureEvent) {
        let delta = event.position - self.origin;
        self.delta = if self.round_delta { delta.round() } else { delta };

        let Some(hover) = event.hover.as_ref() else {
            self.out(stack);
            return;
        };
        let verdict = rules.allowed(
            stack.graph(),
            &RuleContext::ShapesMove {
                shapes: &self.context.shapes,
                target: hover,
                delta: self.delta,
            },
        );
        self.can_execute = Some(verdict);
        if verdict == Verdict::Indeterminate {
            return;
        }
        self.target = Some(hover.clone());
        self.marker.show(stack.canvas_mut(), hover, verdict);
    }

    /// The pointer left the current target.
    pub fn out(&mut self, stack: &mut CommandStack) {
        self.marker.clear(stack.canvas_mut());
        self.target = None;
        self.can_execute = None;
    }

    /// Commits the move when the last verdict allows it; returns whether anything was moved.
    pub fn end(mut self, stack: &mut CommandStack) -> Result<bool, CommandError> {
        self.marker.clear(stack.canvas_mut());
        let result = match (self.can_execute, self.target.take()) {
            (Some(verdict), Some(target)) if verdict.is_allowed() => stack
                .modeling()
                .move_shapes(
                    &self.context.shapes,
                    self.delta,
                    Some(&target),
                    verdict == Verdict::Attach,
                )
                .map(|()| true),
            _ => Ok(false),
        };
        debug!(committed:? = result.as_ref().ok(), delta:? = self.delta; "Move ended");
        self.cleanup(stack);
        result
    }

    /// Drops every marker the session put on the canvas.
    pub fn cleanup(&mut self, stack: &mut CommandStack) {
        self.marker.clear(stack.canvas_mut());
        for dragger in self.context.draggers.drain(..) {
            stack.canvas_mut().remove_marker(&dragger, Marker::Dragging);
        }
    }
}
