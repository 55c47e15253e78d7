// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gesture workflows and the cross-cutting behaviors that hook into them.

pub mod attach_support;
pub mod create;
pub mod gesture;
pub mod label_support;
pub mod moving;

pub use attach_support::AttachSupport;
pub use create::{CreateContext, CreateSession, CreateShape, CreateState};
pub use gesture::GestureEvent;
pub use label_support::LabelSupport;
pub use moving::{MoveContext, MoveSession, MoveStartHook, MoveWorkflow};
