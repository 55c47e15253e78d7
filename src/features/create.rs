// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive creation of a new shape, optionally appended to a source shape.

use log::{debug, trace};

use super::gesture::{DropMarker, GestureEvent};
use crate::canvas::PreviewHandle;
use crate::command::{CommandError, CommandName, CommandStack};
use crate::model::{Element, ElementId};
use crate::rules::{RuleContext, Rules, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateState {
    Idle,
    /// Started, no preview drawn yet.
    Dragging,
    Previewing,
    Resolved(Verdict),
    Committed,
    Cancelled,
}

impl CreateState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

/// The shape being created: a detached draft until the gesture commits it.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateShape {
    Draft(Element),
    Persisted(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateContext {
    pub shape: CreateShape,
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub can_execute: Option<Verdict>,
    pub preview: Option<PreviewHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSession {
    state: CreateState,
    context: CreateContext,
    marker: DropMarker,
}

impl CreateSession {
    pub fn start(shape: Element) -> Self {
        Self::with_source(shape, None)
    }

    /// Starts creating `shape` as a successor of `source`; committing appends and connects it.
    pub fn start_append(source: ElementId, shape: Element) -> Self {
        Self::with_source(shape, Some(source))
    }

    fn with_source(shape: Element, source: Option<ElementId>) -> Self {
        debug!(shape:? = shape.id(), source:? = source; "Create started");
        Self {
            state: CreateState::Dragging,
            context: CreateContext {
                shape: CreateShape::Draft(shape),
                source,
                target: None,
                can_execute: None,
                preview: None,
            },
            marker: DropMarker::default(),
        }
    }

    pub fn state(&self) -> CreateState {
        self.state
    }

    pub fn context(&self) -> &CreateContext {
        &self.context
    }

    pub fn move_to(&mut self, stack: &mut CommandStack, rules: &dyn Rules, event: &GestureEvent) {
        if self.state.is_finished() {
            return;
        }
        let CreateShape::Draft(shape) = &self.context.shape else {
            return;
        };

        let preview = match self.context.preview {
            Some(preview) => preview,
            None => {
                let preview = stack.canvas_mut().create_preview(shape);
                self.context.preview = Some(preview);
                self.state = CreateState::Previewing;
                preview
            }
        };
        stack.canvas_mut().translate_preview(preview, event.position);

        let Some(hover) = event.hover.as_ref() else {
            self.context.can_execute = None;
            return;
        };
        let context = match &self.context.source {
            Some(source) => RuleContext::ShapeAppend {
                source,
                shape,
                target: hover,
            },
            None => RuleContext::ShapeCreate {
                shape,
                target: hover,
                position: event.position,
            },
        };
        let verdict = rules.allowed(stack.graph(), &context);
        trace!(target:? = hover, verdict:? = verdict; "Create target classified");

        self.context.can_execute = Some(verdict);
        self.state = CreateState::Resolved(verdict);
        // No opinion: target and marker stay as the last decided tick left them.
        if verdict == Verdict::Indeterminate {
            return;
        }
        self.context.target = Some(hover.clone());
        self.marker.show(stack.canvas_mut(), hover, verdict);
    }

    /// The pointer left the current target.
    pub fn out(&mut self, stack: &mut CommandStack) {
        self.marker.clear(stack.canvas_mut());
    }

    /// Commits the shape when the last verdict allows it and returns the persisted id. A falsy
    /// or missing verdict cancels the gesture without touching the graph.
    pub fn end(
        &mut self,
        stack: &mut CommandStack,
        event: &GestureEvent,
    ) -> Result<Option<ElementId>, CommandError> {
        if self.state.is_finished() {
            return Ok(None);
        }
        self.marker.clear(stack.canvas_mut());

        let result = self.commit(stack, event);
        self.state = match &result {
            Ok(Some(_)) => CreateState::Committed,
            _ => CreateState::Cancelled,
        };
        debug!(state:? = self.state; "Create ended");
        self.cleanup(stack);
        result
    }

    fn commit(
        &mut self,
        stack: &mut CommandStack,
        event: &GestureEvent,
    ) -> Result<Option<ElementId>, CommandError> {
        let verdict = match self.context.can_execute {
            Some(verdict) if verdict.is_allowed() => verdict,
            _ => return Ok(None),
        };
        let CreateShape::Draft(shape) = &self.context.shape else {
            return Ok(None);
        };
        let target = self.context.target.clone();

        let id = match &self.context.source {
            Some(source) => stack.modeling().append_shape(
                source,
                shape.clone(),
                event.position,
                target.as_ref(),
            )?,
            None => {
                let target = target.ok_or(CommandError::MissingContext {
                    command: CommandName::ShapeCreate,
                    field: "target",
                })?;
                stack.modeling().create_shape(
                    shape.clone(),
                    event.position,
                    &target,
                    verdict == Verdict::Attach,
                )?
            }
        };
        self.context.shape = CreateShape::Persisted(id.clone());
        Ok(Some(id))
    }

    /// Removes the preview and any marker left behind.
    pub fn cleanup(&mut self, stack: &mut CommandStack) {
        self.marker.clear(stack.canvas_mut());
        if let Some(preview) = self.context.preview.take() {
            stack.canvas_mut().remove_preview(preview);
        }
        if !self.state.is_finished() {
            self.state = CreateState::Cancelled;
        }
    }
}
