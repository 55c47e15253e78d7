// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reversible commands.
//!
//! A [`Command`] names one primitive edit and carries its forward input. The [`CommandStack`]
//! runs it through the interceptor pipeline and its handler, records the resulting step, and
//! replays recorded steps backwards on undo and forwards on redo.

use std::fmt;

use thiserror::Error;

use crate::model::{GraphError, Violation};

pub mod handlers;
pub mod interceptor;
pub mod stack;

pub use handlers::append_shape::AppendShapeInput;
pub use handlers::attach_shape::AttachShapeInput;
pub use handlers::connection::{CreateConnectionInput, DeleteConnectionInput, ReconnectInput};
pub use handlers::create_shape::CreateShapeInput;
pub use handlers::delete_shape::DeleteShapeInput;
pub use handlers::label::CreateLabelInput;
pub use handlers::move_shapes::MoveShapesInput;
pub use handlers::reorder::ReorderInput;
pub use handlers::replace_shape::{ReplaceShapeInput, RETAIN_ATTACHMENTS_ATTR};
pub use interceptor::{
    CommandFilter, CommandHook, Interceptor, Phase, PriorityHooks, DEFAULT_PRIORITY,
    HIGH_PRIORITY, LOW_PRIORITY,
};
pub use stack::CommandStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandName {
    ShapesMove,
    ShapeAttach,
    ShapeDelete,
    ShapeCreate,
    ShapeAppend,
    ShapeReplace,
    ConnectionCreate,
    ConnectionDelete,
    ConnectionReconnect,
    LabelCreate,
    ElementReorder,
}

impl CommandName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShapesMove => "shapes.move",
            Self::ShapeAttach => "shape.attach",
            Self::ShapeDelete => "shape.delete",
            Self::ShapeCreate => "shape.create",
            Self::ShapeAppend => "shape.append",
            Self::ShapeReplace => "shape.replace",
            Self::ConnectionCreate => "connection.create",
            Self::ConnectionDelete => "connection.delete",
            Self::ConnectionReconnect => "connection.reconnect",
            Self::LabelCreate => "label.create",
            Self::ElementReorder => "element.reorder",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveShapes(MoveShapesInput),
    AttachShape(AttachShapeInput),
    DeleteShape(DeleteShapeInput),
    CreateShape(CreateShapeInput),
    AppendShape(AppendShapeInput),
    ReplaceShape(ReplaceShapeInput),
    CreateConnection(CreateConnectionInput),
    DeleteConnection(DeleteConnectionInput),
    ReconnectConnection(ReconnectInput),
    CreateLabel(CreateLabelInput),
    Reorder(ReorderInput),
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Self::MoveShapes(_) => CommandName::ShapesMove,
            Self::AttachShape(_) => CommandName::ShapeAttach,
            Self::DeleteShape(_) => CommandName::ShapeDelete,
            Self::CreateShape(_) => CommandName::ShapeCreate,
            Self::AppendShape(_) => CommandName::ShapeAppend,
            Self::ReplaceShape(_) => CommandName::ShapeReplace,
            Self::CreateConnection(_) => CommandName::ConnectionCreate,
            Self::DeleteConnection(_) => CommandName::ConnectionDelete,
            Self::ReconnectConnection(_) => CommandName::ConnectionReconnect,
            Self::CreateLabel(_) => CommandName::LabelCreate,
            Self::Reorder(_) => CommandName::ElementReorder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Graph(GraphError),
    #[error(transparent)]
    Invariant(#[from] Violation),
    #[error("{command} is missing required context '{field}'")]
    MissingContext {
        command: CommandName,
        field: &'static str,
    },
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("commands cannot be issued while undo/redo is replaying")]
    ReplayInProgress,
    #[error("undo/redo is not available while a transaction is open")]
    TransactionOpen,
}

impl From<GraphError> for CommandError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Invariant(violation) => Self::Invariant(violation),
            other => Self::Graph(other),
        }
    }
}

#[cfg(test)]
mod tests;
