// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One module per primitive command.
//!
//! `execute` validates before it mutates and returns a typed record holding the input plus
//! whatever the inverse needs; `revert` consumes that record. Compound commands do their work
//! through nested commands in `pre_execute`/`post_execute` and record an empty step.

pub mod append_shape;
pub mod attach_shape;
pub mod connection;
pub mod create_shape;
pub mod delete_shape;
pub mod label;
pub mod move_shapes;
pub mod reorder;
pub mod replace_shape;

use crate::canvas::Canvas;
use crate::model::Graph;

use super::{Command, CommandError, CommandName, CommandStack};

/// One executed primitive, able to undo itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    MoveShapes(move_shapes::Applied),
    AttachShape(attach_shape::Applied),
    DeleteShape(delete_shape::Applied),
    CreateShape(create_shape::Applied),
    AppendShape(append_shape::Applied),
    ReplaceShape(replace_shape::Applied),
    CreateConnection(connection::Created),
    DeleteConnection(connection::Deleted),
    ReconnectConnection(connection::Reconnected),
    CreateLabel(label::Applied),
    Reorder(reorder::Applied),
}

impl Step {
    pub(crate) fn name(&self) -> CommandName {
        self.command().name()
    }

    /// The command as it was executed, after pre-execute hooks had their say.
    pub(crate) fn command(&self) -> Command {
        match self {
            Self::MoveShapes(applied) => Command::MoveShapes(applied.input.clone()),
            Self::AttachShape(applied) => Command::AttachShape(applied.input.clone()),
            Self::DeleteShape(applied) => Command::DeleteShape(applied.input.clone()),
            Self::CreateShape(applied) => Command::CreateShape(applied.input.clone()),
            Self::AppendShape(applied) => Command::AppendShape(applied.input.clone()),
            Self::ReplaceShape(applied) => Command::ReplaceShape(applied.input.clone()),
            Self::CreateConnection(created) => Command::CreateConnection(created.input.clone()),
            Self::DeleteConnection(deleted) => Command::DeleteConnection(deleted.input.clone()),
            Self::ReconnectConnection(reconnected) => {
                Command::ReconnectConnection(reconnected.input.clone())
            }
            Self::CreateLabel(applied) => Command::CreateLabel(applied.input.clone()),
            Self::Reorder(applied) => Command::Reorder(applied.input.clone()),
        }
    }

    pub(crate) fn revert(self, graph: &mut Graph, canvas: &mut dyn Canvas) -> Result<(), CommandError> {
        match self {
            Self::MoveShapes(applied) => move_shapes::revert(graph, applied),
            Self::AttachShape(applied) => attach_shape::revert(graph, applied),
            Self::DeleteShape(applied) => delete_shape::revert(graph, canvas, applied),
            Self::CreateShape(applied) => create_shape::revert(graph, canvas, applied),
            Self::AppendShape(_) | Self::ReplaceShape(_) => Ok(()),
            Self::CreateConnection(created) => connection::revert_create(graph, canvas, created),
            Self::DeleteConnection(deleted) => connection::revert_delete(graph, canvas, deleted),
            Self::ReconnectConnection(reconnected) => connection::revert_reconnect(graph, reconnected),
            Self::CreateLabel(applied) => label::revert(graph, canvas, applied),
            Self::Reorder(applied) => reorder::revert(graph, applied),
        }
    }
}

pub(crate) fn pre_execute(stack: &mut CommandStack, command: &Command) -> Result<(), CommandError> {
    match command {
        Command::DeleteShape(input) => delete_shape::pre_execute(stack, input),
        Command::DeleteConnection(input) => connection::pre_delete(stack, input),
        Command::AppendShape(input) => append_shape::pre_execute(stack, input),
        Command::ReplaceShape(input) => replace_shape::pre_execute(stack, input),
        _ => Ok(()),
    }
}

pub(crate) fn execute(
    graph: &mut Graph,
    canvas: &mut dyn Canvas,
    command: &Command,
) -> Result<Step, CommandError> {
    let step = match command {
        Command::MoveShapes(input) => Step::MoveShapes(move_shapes::execute(graph, input)?),
        Command::AttachShape(input) => Step::AttachShape(attach_shape::execute(graph, input)?),
        Command::DeleteShape(input) => {
            Step::DeleteShape(delete_shape::execute(graph, canvas, input)?)
        }
        Command::CreateShape(input) => {
            Step::CreateShape(create_shape::execute(graph, canvas, input)?)
        }
        Command::AppendShape(input) => Step::AppendShape(append_shape::execute(graph, input)?),
        Command::ReplaceShape(input) => Step::ReplaceShape(replace_shape::execute(graph, input)?),
        Command::CreateConnection(input) => {
            Step::CreateConnection(connection::create(graph, canvas, input)?)
        }
        Command::DeleteConnection(input) => {
            Step::DeleteConnection(connection::delete(graph, canvas, input)?)
        }
        Command::ReconnectConnection(input) => {
            Step::ReconnectConnection(connection::reconnect(graph, input)?)
        }
        Command::CreateLabel(input) => Step::CreateLabel(label::execute(graph, canvas, input)?),
        Command::Reorder(input) => Step::Reorder(reorder::execute(graph, input)?),
    };
    Ok(step)
}

pub(crate) fn post_execute(stack: &mut CommandStack, command: &Command) -> Result<(), CommandError> {
    match command {
        Command::AppendShape(input) => append_shape::post_execute(stack, input),
        _ => Ok(()),
    }
}
