// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Coarse-grained editing API.
//!
//! Each method resolves defaults (parents, hosts, generated ids) against the current graph and
//! issues one named command through the [`CommandStack`].

use crate::command::handlers::replace_shape::retained_attachments;
use crate::command::{
    AppendShapeInput, AttachShapeInput, Command, CommandError, CommandName, CommandStack,
    CreateConnectionInput, CreateLabelInput, CreateShapeInput, DeleteConnectionInput,
    DeleteShapeInput, MoveShapesInput, ReconnectInput, ReorderInput, ReplaceShapeInput,
};
use crate::model::{Element, ElementId, Point};

pub struct Modeling<'a> {
    stack: &'a mut CommandStack,
}

impl<'a> Modeling<'a> {
    pub(crate) fn new(stack: &'a mut CommandStack) -> Self {
        Self { stack }
    }

    /// Moves `shapes` by `delta`.
    ///
    /// With `is_attach` the target becomes the new host and the target's parent the new
    /// parent; otherwise the target is the new parent. Without a target nothing is re-parented.
    pub fn move_shapes(
        &mut self,
        shapes: &[ElementId],
        delta: Point,
        target: Option<&ElementId>,
        is_attach: bool,
    ) -> Result<(), CommandError> {
        let (new_parent, new_host) = match target {
            Some(target) if is_attach => (
                Some(self.parent_of(target, CommandName::ShapesMove)?),
                Some(target.clone()),
            ),
            Some(target) => (Some(target.clone()), None),
            None => (None, None),
        };
        self.stack.execute(Command::MoveShapes(MoveShapesInput {
            shapes: shapes.to_vec(),
            delta,
            new_parent,
            new_host,
        }))
    }

    pub fn move_shape(
        &mut self,
        shape: &ElementId,
        delta: Point,
        target: Option<&ElementId>,
        is_attach: bool,
    ) -> Result<(), CommandError> {
        self.move_shapes(std::slice::from_ref(shape), delta, target, is_attach)
    }

    /// Attaches `shape` to `new_host`, or detaches it when `new_host` is `None`.
    pub fn attach_shape(
        &mut self,
        shape: &ElementId,
        new_host: Option<&ElementId>,
    ) -> Result<(), CommandError> {
        self.stack.execute(Command::AttachShape(AttachShapeInput {
            shape: shape.clone(),
            new_host: new_host.cloned(),
        }))
    }

    pub fn remove_shape(&mut self, shape: &ElementId) -> Result<(), CommandError> {
        self.stack.execute(Command::DeleteShape(DeleteShapeInput {
            shape: shape.clone(),
        }))
    }

    pub fn remove_connection(&mut self, connection: &ElementId) -> Result<(), CommandError> {
        self.stack
            .execute(Command::DeleteConnection(DeleteConnectionInput {
                connection: connection.clone(),
            }))
    }

    /// Removes a mixed batch in one transaction. Elements already removed by an earlier
    /// cascade of the same batch are skipped.
    pub fn remove_elements(&mut self, elements: &[ElementId]) -> Result<(), CommandError> {
        self.stack.transaction(|stack| {
            for id in elements {
                let Some(element) = stack.graph().get(id) else {
                    continue;
                };
                if element.is_connection() {
                    stack.modeling().remove_connection(id)?;
                } else {
                    stack.modeling().remove_shape(id)?;
                }
            }
            Ok(())
        })
    }

    /// Creates `shape` centered on `position`.
    ///
    /// With `is_attach` the shape lands in the target's parent and is hosted by the target;
    /// otherwise the target is the parent.
    pub fn create_shape(
        &mut self,
        shape: Element,
        position: Point,
        target: &ElementId,
        is_attach: bool,
    ) -> Result<ElementId, CommandError> {
        let (parent, host) = if is_attach {
            (
                self.parent_of(target, CommandName::ShapeCreate)?,
                Some(target.clone()),
            )
        } else {
            (target.clone(), None)
        };
        let id = shape.id().clone();
        self.stack.execute(Command::CreateShape(CreateShapeInput {
            shape,
            position,
            parent,
            host,
        }))?;
        Ok(id)
    }

    /// Creates `shape` under `target` (the source's parent by default) and connects `source`
    /// to it with a generated connection.
    pub fn append_shape(
        &mut self,
        source: &ElementId,
        shape: Element,
        position: Point,
        target: Option<&ElementId>,
    ) -> Result<ElementId, CommandError> {
        let target = match target {
            Some(target) => target.clone(),
            None => self.parent_of(source, CommandName::ShapeAppend)?,
        };
        let (factory, graph) = self.stack.factory_and_graph();
        let connection = Element::connection(factory.next_id("connection", graph)?, []);
        let id = shape.id().clone();
        self.stack.execute(Command::AppendShape(AppendShapeInput {
            source: source.clone(),
            shape,
            position,
            target,
            connection,
        }))?;
        Ok(id)
    }

    /// Replaces `old_shape` with `new_shape`; attachers listed in the replacement's
    /// `retainAttachmentIds` attribute move over to it.
    pub fn replace_shape(
        &mut self,
        old_shape: &ElementId,
        new_shape: Element,
    ) -> Result<ElementId, CommandError> {
        let retain_attachments = retained_attachments(&new_shape)?;
        let id = new_shape.id().clone();
        self.stack.execute(Command::ReplaceShape(ReplaceShapeInput {
            old_shape: old_shape.clone(),
            new_shape,
            retain_attachments,
        }))?;
        Ok(id)
    }

    /// Connects `source` to `target`; the connection lives in `parent`, the source's parent by
    /// default.
    pub fn create_connection(
        &mut self,
        source: &ElementId,
        target: &ElementId,
        connection: Element,
        parent: Option<&ElementId>,
    ) -> Result<ElementId, CommandError> {
        let parent = match parent {
            Some(parent) => parent.clone(),
            None => self.parent_of(source, CommandName::ConnectionCreate)?,
        };
        let id = connection.id().clone();
        self.stack
            .execute(Command::CreateConnection(CreateConnectionInput {
                connection,
                source: source.clone(),
                target: target.clone(),
                parent,
            }))?;
        Ok(id)
    }

    pub fn reconnect_start(
        &mut self,
        connection: &ElementId,
        new_source: &ElementId,
    ) -> Result<(), CommandError> {
        self.stack
            .execute(Command::ReconnectConnection(ReconnectInput {
                connection: connection.clone(),
                new_source: Some(new_source.clone()),
                new_target: None,
            }))
    }

    pub fn reconnect_end(
        &mut self,
        connection: &ElementId,
        new_target: &ElementId,
    ) -> Result<(), CommandError> {
        self.stack
            .execute(Command::ReconnectConnection(ReconnectInput {
                connection: connection.clone(),
                new_source: None,
                new_target: Some(new_target.clone()),
            }))
    }

    /// Labels `target`; the label lives in `parent`, the target's parent by default.
    pub fn create_label(
        &mut self,
        target: &ElementId,
        position: Point,
        label: Element,
        parent: Option<&ElementId>,
    ) -> Result<ElementId, CommandError> {
        let parent = match parent {
            Some(parent) => parent.clone(),
            None => self.parent_of(target, CommandName::LabelCreate)?,
        };
        let id = label.id().clone();
        self.stack.execute(Command::CreateLabel(CreateLabelInput {
            label,
            label_target: target.clone(),
            position,
            parent,
        }))?;
        Ok(id)
    }

    pub fn reorder(&mut self, element: &ElementId, index: usize) -> Result<(), CommandError> {
        self.stack.execute(Command::Reorder(ReorderInput {
            element: element.clone(),
            index,
        }))
    }

    fn parent_of(&self, id: &ElementId, command: CommandName) -> Result<ElementId, CommandError> {
        self.stack
            .graph()
            .element(id)?
            .parent()
            .cloned()
            .ok_or(CommandError::MissingContext {
                command,
                field: "parent",
            })
    }
}
